//! Well-known delivery medium name constants.
//!
//! These must match the medium values stored in the `notice_settings.medium`
//! column. The set is open: new media (SMS, push, ...) add a constant here
//! and a delivery path in `herald-notify` without any schema change.

/// Email delivery via SMTP.
pub const MEDIUM_EMAIL: &str = "email";
