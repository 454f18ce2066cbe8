//! Shared utilities and common types for the church CMS backend.
//!
//! This crate provides functionality used across all other crates:
//! - Slug derivation from titles
//! - Video URL parsing
//! - Password hashing with Argon2id
//! - Admin session tokens (JWT)
//! - Common validation logic

pub mod jwt;
pub mod password;
pub mod slug;
pub mod validation;
pub mod video;
