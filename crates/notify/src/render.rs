//! Message rendering.
//!
//! Walks an encoded message and replaces each reference token with either
//! the resolved object's plain string form (text mode) or an anchor element
//! linking to its canonical URL (HTML mode). Pure functions of the message
//! and the current object graph: nothing is cached, so a rendered notice
//! always shows the referenced objects as they are now.

use herald_core::codec::{parse_message, FormatError, Segment};

use crate::resolve::{ObjectRegistry, ResolveError};

/// Error type for rendering failures. Any error fails the whole render;
/// there is no partial output and no placeholder for missing objects.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Render an encoded message as plain text.
pub async fn message_to_text(
    message: &str,
    registry: &ObjectRegistry,
) -> Result<String, RenderError> {
    let segments = parse_message(message)?;
    let mut out = String::with_capacity(message.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Reference(body) => out.push_str(&registry.resolve(body).await?.display),
        }
    }
    Ok(out)
}

/// Render an encoded message as HTML, each reference becoming an anchor to
/// the resolved object's canonical URL.
pub async fn message_to_html(
    message: &str,
    registry: &ObjectRegistry,
) -> Result<String, RenderError> {
    let segments = parse_message(message)?;
    let mut out = String::with_capacity(message.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Reference(body) => {
                let obj = registry.resolve(body).await?;
                out.push_str(&format!("<a href=\"{}\">{}</a>", obj.url, obj.display));
            }
        }
    }
    Ok(out)
}
