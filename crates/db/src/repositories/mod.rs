//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod notice_repo;
pub mod notice_setting_repo;
pub mod notice_type_repo;
pub mod user_repo;

pub use notice_repo::NoticeRepo;
pub use notice_setting_repo::NoticeSettingRepo;
pub use notice_type_repo::{NoticeTypeRepo, ProvisionOutcome};
pub use user_repo::UserRepo;
