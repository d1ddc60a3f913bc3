//! Notice dispatch.
//!
//! [`Dispatcher::send`] is how other features issue a notice: it encodes the
//! message, optionally persists one [`Notice`](herald_db::models::notice::Notice)
//! per recipient, consults each recipient's email preference, and sends one
//! email to everyone who opted in.

use std::sync::Arc;

use herald_core::codec::{encode_message, EncodeError, Referenced};
use herald_core::medium::MEDIUM_EMAIL;
use herald_db::models::user::User;
use herald_db::repositories::{NoticeRepo, NoticeSettingRepo, NoticeTypeRepo};
use herald_db::DbPool;

use crate::mail::{MailError, MailTransport};
use crate::render::{message_to_text, RenderError};
use crate::resolve::ObjectRegistry;
use crate::templates::NoticeTemplates;

/// Error type for dispatch failures. Every failure is fatal to the whole
/// dispatch; there are no retries.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown notice type label '{label}'")]
    UnknownNoticeType { label: String },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Default base URL when `SITE_URL` is not set.
const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Default sender address when `FROM_EMAIL` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@herald.local";

/// Site-level settings dispatch needs: where notices live and who mail
/// comes from.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Scheme + host of the enclosing application, no trailing slash needed.
    pub base_url: String,
    /// RFC 5322 "From" address for notice emails.
    pub from_address: String,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable     | Default                  |
    /// |--------------|--------------------------|
    /// | `SITE_URL`   | `http://localhost:3000`  |
    /// | `FROM_EMAIL` | `noreply@herald.local`   |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.into()),
            from_address: std::env::var("FROM_EMAIL")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.into()),
        }
    }

    /// Absolute URL of the notices index.
    pub fn notices_url(&self) -> String {
        format!("{}/notices/", self.base_url.trim_end_matches('/'))
    }
}

/// Issues notices and sends the corresponding email.
///
/// The mail transport, object registry, and templates are injected at
/// construction; dispatch depends only on the capability interfaces, never
/// on which concrete implementation satisfies them.
pub struct Dispatcher {
    pool: DbPool,
    registry: Arc<ObjectRegistry>,
    templates: Arc<dyn NoticeTemplates>,
    transport: Arc<dyn MailTransport>,
    site: SiteConfig,
}

impl Dispatcher {
    pub fn new(
        pool: DbPool,
        registry: Arc<ObjectRegistry>,
        templates: Arc<dyn NoticeTemplates>,
        transport: Arc<dyn MailTransport>,
        site: SiteConfig,
    ) -> Self {
        Self {
            pool,
            registry,
            templates,
            transport,
            site,
        }
    }

    /// Issue a notice of the given type to each user and email those who
    /// opted in.
    ///
    /// Steps, in order:
    /// 1. resolve the notice type by label;
    /// 2. encode `message_template` with `objects` (positional `%s`
    ///    substitution);
    /// 3. render the email subject and body from the templates;
    /// 4. per user: persist a notice when `issue_notice` is set, then
    ///    consult the stored email preference (defaulting to send) and
    ///    collect the address of everyone who opted in and has one;
    /// 5. send one email to the accumulated recipient list. An empty list
    ///    is an accepted no-op at the transport.
    pub async fn send(
        &self,
        users: &[User],
        notice_type_label: &str,
        message_template: &str,
        objects: &[&dyn Referenced],
        issue_notice: bool,
    ) -> Result<(), DispatchError> {
        let notice_type = NoticeTypeRepo::get_by_label(&self.pool, notice_type_label)
            .await?
            .ok_or_else(|| DispatchError::UnknownNoticeType {
                label: notice_type_label.to_string(),
            })?;

        let message = encode_message(message_template, objects)?;

        let subject = self.templates.subject(&notice_type.display);
        let text = message_to_text(&message, &self.registry).await?;
        let body = self.templates.body(&text, &self.site.notices_url());

        let mut recipients = Vec::new();
        for user in users {
            if issue_notice {
                NoticeRepo::create(&self.pool, user.id, notice_type.id, &message).await?;
            }
            let wants_email = NoticeSettingRepo::should_send(
                &self.pool,
                user.id,
                notice_type.id,
                MEDIUM_EMAIL,
                true,
            )
            .await?;
            if wants_email && user.has_email() {
                recipients.push(user.email.clone());
            }
        }

        self.transport
            .send_mail(&subject, &body, &self.site.from_address, &recipients)
            .await?;

        tracing::info!(
            label = notice_type_label,
            users = users.len(),
            recipients = recipients.len(),
            issued = issue_notice,
            "Dispatched notice"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_url_handles_trailing_slash() {
        let site = SiteConfig {
            base_url: "http://example.com/".to_string(),
            from_address: "noreply@example.com".to_string(),
        };
        assert_eq!(site.notices_url(), "http://example.com/notices/");
    }
}
