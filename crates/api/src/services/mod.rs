//! Services that sit between the HTTP handlers and persistence.

pub mod admin_bootstrap;
pub mod auth;
pub mod video_metadata;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use auth::{AuthError, AuthService, LoginResult};
pub use video_metadata::{VideoMetadata, VideoMetadataClient, VideoMetadataError};
