//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, where the caller may need a transaction, any
//! `PgExecutor`) as the first argument.

pub mod alert_repo;
pub mod cooldown_repo;
pub mod notification_config_repo;

pub use alert_repo::AlertRepo;
pub use cooldown_repo::CooldownRepo;
pub use notification_config_repo::NotificationConfigRepo;
