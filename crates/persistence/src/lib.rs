//! Persistence layer for the church CMS backend.
//!
//! This crate contains:
//! - Database connection management and embedded migrations
//! - Entity definitions (database row mappings)
//! - The generic PostgreSQL resource store and the settings / admin repositories

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod table;

pub use repositories::PgStore;
pub use table::Table;
