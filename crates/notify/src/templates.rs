//! Subject and body templates for notice emails.
//!
//! The template engine is a capability seam: the enclosing application can
//! swap in its own implementation; [`DefaultTemplates`] covers the common
//! case.

/// Renders the two named templates a dispatch needs.
pub trait NoticeTemplates: Send + Sync {
    /// Email subject line. Input: the notice type's display name.
    fn subject(&self, display: &str) -> String;

    /// Email body. Inputs: the text-rendered message and the absolute
    /// notices index URL.
    fn body(&self, message: &str, notices_url: &str) -> String;
}

/// Plain-text default templates.
pub struct DefaultTemplates;

impl NoticeTemplates for DefaultTemplates {
    fn subject(&self, display: &str) -> String {
        display.to_string()
    }

    fn body(&self, message: &str, notices_url: &str) -> String {
        format!("{message}\n\nTo see other notices, visit {notices_url}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_subject_is_display_name() {
        assert_eq!(DefaultTemplates.subject("Friend Request"), "Friend Request");
    }

    #[test]
    fn default_body_includes_message_and_url() {
        let body = DefaultTemplates.body("bob sent you a request", "http://example.com/notices/");
        assert!(body.starts_with("bob sent you a request"));
        assert!(body.contains("http://example.com/notices/"));
    }
}
