//! Rendering and delivery for the Herald notification subsystem.
//!
//! [`resolve`] turns stored reference tokens back into live objects,
//! [`render`] produces text or HTML from an encoded message, [`mail`] is the
//! SMTP transport capability, and [`dispatch`] composes all of it into the
//! one entry point other features call to issue and email a notice.

pub mod dispatch;
pub mod mail;
pub mod render;
pub mod resolve;
pub mod templates;

pub use dispatch::{DispatchError, Dispatcher, SiteConfig};
pub use mail::{MailError, MailTransport, SmtpConfig, SmtpMailer};
pub use render::{message_to_html, message_to_text, RenderError};
pub use resolve::{ObjectRegistry, ObjectSource, ResolveError, ResolvedObject, UserSource};
pub use templates::{DefaultTemplates, NoticeTemplates};
