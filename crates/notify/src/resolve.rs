//! Live object resolution for reference tokens.
//!
//! A message's `{kind.model.pk}` tokens are resolved through an
//! [`ObjectRegistry`]: the enclosing application registers one
//! [`ObjectSource`] per (kind, model) pair at startup, and rendering looks
//! objects up at display time so output always reflects current data.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use herald_core::codec::{MalformedReference, ObjectRef};
use herald_core::types::DbId;
use herald_db::repositories::UserRepo;
use herald_db::DbPool;

/// The renderable form of a resolved object: its plain string
/// representation and its canonical URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedObject {
    pub display: String,
    pub url: String,
}

/// Error type for reference resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The token body did not have `kind.model.pk` shape.
    #[error(transparent)]
    Malformed(#[from] MalformedReference),

    /// No source is registered for the referenced model.
    #[error("no object source registered for {kind}.{model}")]
    UnknownModel { kind: String, model: String },

    /// The referenced object no longer exists.
    #[error("referenced object {reference} not found")]
    NotFound { reference: String },

    /// The pk is not a valid key for the referenced model.
    #[error("invalid pk '{pk}' for {kind}.{model}")]
    BadPk {
        kind: String,
        model: String,
        pk: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A lookup capability for one registered (kind, model) pair.
///
/// Sources own whatever connection they need; the registry never hands them
/// one. `Ok(None)` means the object does not exist (the registry turns that
/// into [`ResolveError::NotFound`]).
#[async_trait]
pub trait ObjectSource: Send + Sync {
    async fn get(&self, reference: &ObjectRef) -> Result<Option<ResolvedObject>, ResolveError>;
}

/// Maps (kind, model) pairs to their registered [`ObjectSource`].
#[derive(Default)]
pub struct ObjectRegistry {
    sources: HashMap<(String, String), Arc<dyn ObjectSource>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source for a (kind, model) pair, replacing any previous
    /// registration.
    pub fn register(&mut self, kind: &str, model: &str, source: Arc<dyn ObjectSource>) {
        self.sources
            .insert((kind.to_string(), model.to_string()), source);
    }

    /// Resolve a token body (`kind.model.pk`) to a live object.
    pub async fn resolve(&self, body: &str) -> Result<ResolvedObject, ResolveError> {
        let reference = ObjectRef::parse(body)?;
        let source = self
            .sources
            .get(&(reference.kind.clone(), reference.model.clone()))
            .ok_or_else(|| ResolveError::UnknownModel {
                kind: reference.kind.clone(),
                model: reference.model.clone(),
            })?;
        match source.get(&reference).await? {
            Some(obj) => Ok(obj),
            None => Err(ResolveError::NotFound {
                reference: reference.to_string(),
            }),
        }
    }
}

/// Source for `accounts.User` references, backed by the `users` table.
pub struct UserSource {
    pool: DbPool,
}

impl UserSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObjectSource for UserSource {
    async fn get(&self, reference: &ObjectRef) -> Result<Option<ResolvedObject>, ResolveError> {
        // A non-numeric pk is a corrupt token, not a deleted user.
        let user_id: DbId = reference.pk.parse().map_err(|_| ResolveError::BadPk {
            kind: reference.kind.clone(),
            model: reference.model.clone(),
            pk: reference.pk.clone(),
        })?;
        Ok(UserRepo::get(&self.pool, user_id).await?.map(|user| {
            ResolvedObject {
                url: format!("/users/{}", user.id),
                display: user.username,
            }
        }))
    }
}
