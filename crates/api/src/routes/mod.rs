//! HTTP route handlers.

pub mod auth;
pub mod blog_posts;
pub mod health;
pub mod resources;
pub mod sermons;
pub mod settings;
pub mod submissions;
pub mod testimonials;
