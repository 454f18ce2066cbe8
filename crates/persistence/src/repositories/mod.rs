//! Repository implementations for database operations.

pub mod admin_user;
pub mod pg_store;
pub mod setting;

pub use admin_user::AdminUserRepository;
pub use pg_store::{store_error, PgStore};
pub use setting::SettingRepository;
