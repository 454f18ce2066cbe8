//! Domain layer for the church CMS backend.
//!
//! This crate contains:
//! - Content models and their writable drafts (events, sermons, ministries, ...)
//! - The `Resource` / `ResourceStore` contracts shared by every content type
//! - Typed site settings
//! - The resource editor state model and an in-memory store

pub mod models;
pub mod resource;
pub mod services;

pub use resource::{OrderBy, Resource, ResourceStore, Scope, StoreError};
