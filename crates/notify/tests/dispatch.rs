//! Integration tests for notice dispatch against a real database,
//! with a recording in-memory mail transport.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use herald_core::codec::Referenced;
use herald_core::medium::MEDIUM_EMAIL;
use herald_db::models::user::User;
use herald_db::repositories::{NoticeRepo, NoticeSettingRepo, NoticeTypeRepo, UserRepo};
use herald_notify::{
    DefaultTemplates, DispatchError, Dispatcher, MailError, MailTransport, ObjectRegistry,
    SiteConfig, UserSource,
};
use sqlx::PgPool;

#[derive(Debug, Clone)]
struct SentMail {
    subject: String,
    body: String,
    from: String,
    recipients: Vec<String>,
}

/// Records every send instead of talking SMTP.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send_mail(
        &self,
        subject: &str,
        body: &str,
        from_address: &str,
        recipients: &[String],
    ) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            subject: subject.to_string(),
            body: body.to_string(),
            from: from_address.to_string(),
            recipients: recipients.to_vec(),
        });
        Ok(())
    }
}

fn test_site() -> SiteConfig {
    SiteConfig {
        base_url: "http://testserver".to_string(),
        from_address: "noreply@testserver".to_string(),
    }
}

fn build_dispatcher(pool: PgPool) -> (Dispatcher, Arc<RecordingTransport>) {
    let mut registry = ObjectRegistry::new();
    registry.register("accounts", "User", Arc::new(UserSource::new(pool.clone())));
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = Dispatcher::new(
        pool,
        Arc::new(registry),
        Arc::new(DefaultTemplates),
        transport.clone(),
        test_site(),
    );
    (dispatcher, transport)
}

async fn seed_user(pool: &PgPool, username: &str, email: &str) -> User {
    UserRepo::create(pool, username, email, false).await.unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn dispatch_issues_notices_and_emails_all_recipients(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    let bob = seed_user(&pool, "bob", "bob@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "friend_request", "Friend Request", "")
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    dispatcher
        .send(
            &[alice.clone(), bob.clone()],
            "friend_request",
            "%s sent you a friend request",
            &[&alice as &dyn Referenced],
            true,
        )
        .await
        .unwrap();

    // One notice per user, stored in encoded form.
    for user in [&alice, &bob] {
        let notices = NoticeRepo::notices_for(&pool, user, true).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].unseen);
        assert!(!notices[0].archived);
        assert_eq!(
            notices[0].message,
            format!("{{accounts.User.{}}} sent you a friend request", alice.id)
        );
    }

    // One combined email, with the reference resolved to text.
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Friend Request");
    assert_eq!(sent[0].from, "noreply@testserver");
    assert_eq!(
        sent[0].recipients,
        vec!["alice@example.com".to_string(), "bob@example.com".to_string()]
    );
    assert!(sent[0].body.starts_with("alice sent you a friend request"));
    assert!(sent[0].body.contains("http://testserver/notices/"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn dispatch_without_issue_notice_only_emails(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "reminder", "Reminder", "")
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    dispatcher
        .send(&[alice.clone()], "reminder", "nothing new", &[], false)
        .await
        .unwrap();

    let notices = NoticeRepo::notices_for(&pool, &alice, true).await.unwrap();
    assert!(notices.is_empty());
    assert_eq!(transport.sent().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn opted_out_user_still_gets_notice_but_no_email(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "digestible", "Digestible", "")
        .await
        .unwrap();
    let notice_type = NoticeTypeRepo::get_by_label(&pool, "digestible")
        .await
        .unwrap()
        .unwrap();
    NoticeSettingRepo::set(&pool, alice.id, notice_type.id, MEDIUM_EMAIL, false)
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    dispatcher
        .send(&[alice.clone()], "digestible", "hello", &[], true)
        .await
        .unwrap();

    let notices = NoticeRepo::notices_for(&pool, &alice, true).await.unwrap();
    assert_eq!(notices.len(), 1);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1, "transport is still called once");
    assert!(sent[0].recipients.is_empty(), "opted-out user must not receive email");
}

#[sqlx::test(migrations = "../../migrations")]
async fn user_without_email_is_skipped(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "").await;
    let bob = seed_user(&pool, "bob", "bob@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "comment", "Comment", "")
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    dispatcher
        .send(&[alice, bob], "comment", "new comment", &[], true)
        .await
        .unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].recipients, vec!["bob@example.com".to_string()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn dispatch_materializes_default_email_setting(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "comment", "Comment", "")
        .await
        .unwrap();

    let (dispatcher, _) = build_dispatcher(pool.clone());
    dispatcher
        .send(&[alice.clone()], "comment", "hi", &[], true)
        .await
        .unwrap();

    let settings = NoticeSettingRepo::list_for_user(&pool, alice.id).await.unwrap();
    assert_eq!(settings.len(), 1);
    assert!(settings[0].send, "lazily created setting defaults to send");
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_notice_type_fails(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    let (dispatcher, transport) = build_dispatcher(pool.clone());

    let result = dispatcher
        .send(&[alice], "no_such_label", "msg", &[], true)
        .await;
    assert_matches!(result, Err(DispatchError::UnknownNoticeType { label }) if label == "no_such_label");
    assert!(transport.sent().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn placeholder_mismatch_fails_before_any_write(pool: PgPool) {
    let alice = seed_user(&pool, "alice", "alice@example.com").await;
    NoticeTypeRepo::create_notice_type(&pool, "comment", "Comment", "")
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    let result = dispatcher
        .send(&[alice.clone()], "comment", "%s and %s", &[&alice as &dyn Referenced], true)
        .await;

    assert_matches!(result, Err(DispatchError::Encode(_)));
    assert!(transport.sent().is_empty());
    let notices = NoticeRepo::notices_for(&pool, &alice, true).await.unwrap();
    assert!(notices.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_user_list_is_a_noop_send(pool: PgPool) {
    NoticeTypeRepo::create_notice_type(&pool, "comment", "Comment", "")
        .await
        .unwrap();

    let (dispatcher, transport) = build_dispatcher(pool.clone());
    dispatcher.send(&[], "comment", "hi", &[], true).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].recipients.is_empty());
}
