//! Custom Axum extractors.

pub mod admin_session;
