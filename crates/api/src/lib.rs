//! HTTP API for the church CMS.
//!
//! Public read and submission endpoints plus an admin CRUD surface over the
//! content resources defined in the `domain` crate.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
