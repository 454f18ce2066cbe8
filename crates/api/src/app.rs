use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::models::{
    BlogPost, ContactMessage, Event, KidsClass, KidsGalleryItem, Ministry, PrayerRequest, Sermon,
    Testimonial, Zone,
};
use domain::Resource;
use persistence::Table;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware,
    submission_rate_limit, trace_id, RateLimiterState,
};
use crate::routes::{
    auth, blog_posts, health, resources, sermons, settings, submissions, testimonials,
};
use crate::services::{VideoMetadataClient, VideoMetadataError};

/// Shared, immutable request state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub submission_limiter: Option<Arc<RateLimiterState>>,
    pub video: Arc<VideoMetadataClient>,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("Failed to initialize JWT keys: {0}")]
    Jwt(#[from] JwtError),

    #[error("Failed to initialize video metadata client: {0}")]
    Video(#[from] VideoMetadataError),
}

impl AppState {
    /// Builds state from configuration, parsing the RS256 key pair.
    pub fn new(config: Config, pool: PgPool) -> Result<Self, AppInitError> {
        let jwt = JwtConfig::with_leeway(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.leeway_secs,
        )?;
        let video = VideoMetadataClient::new(&config.video)?;
        Ok(Self::with_parts(config, pool, jwt, video))
    }

    /// Builds state from already constructed collaborators.
    pub fn with_parts(
        config: Config,
        pool: PgPool,
        jwt: JwtConfig,
        video: VideoMetadataClient,
    ) -> Self {
        let submission_limiter =
            RateLimiterState::new(config.security.submission_rate_limit_per_minute).map(Arc::new);

        Self {
            pool,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            submission_limiter,
            video: Arc::new(video),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

fn public_path<R: Resource>() -> String {
    format!("/api/v1/{}", R::NAME)
}

fn admin_path<R: Resource>() -> String {
    format!("/api/v1/admin/{}", R::NAME)
}

/// Mounts the generic admin CRUD routes for one resource.
fn admin_crud<R: Table>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&admin_path::<R>(), resources::admin_routes::<R>())
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Public read routes
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route(&public_path::<Event>(), get(resources::list_public::<Event>))
        .route(&public_path::<Sermon>(), get(resources::list_public::<Sermon>))
        .route(&public_path::<Ministry>(), get(resources::list_public::<Ministry>))
        .route(&public_path::<Zone>(), get(resources::list_public::<Zone>))
        .route(&public_path::<BlogPost>(), get(resources::list_public::<BlogPost>))
        .route("/api/v1/blog-posts/:slug", get(blog_posts::get_by_slug))
        .route(
            &public_path::<Testimonial>(),
            get(resources::list_public::<Testimonial>),
        )
        .route(&public_path::<KidsClass>(), get(resources::list_public::<KidsClass>))
        .route(
            &public_path::<KidsGalleryItem>(),
            get(resources::list_public::<KidsGalleryItem>),
        )
        .route("/api/v1/settings", get(settings::list_public))
        .route("/api/v1/settings/:key", get(settings::get_public))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/session", get(auth::session));

    // Public submissions (rate limited per client IP)
    let submission_routes = Router::new()
        .route(
            &public_path::<PrayerRequest>(),
            post(submissions::submit_prayer_request),
        )
        .route(
            &public_path::<ContactMessage>(),
            post(submissions::submit_contact_message),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            submission_rate_limit,
        ));

    // Admin routes (require a valid admin bearer token)
    let mut admin_routes = Router::new();
    admin_routes = admin_crud::<Event>(admin_routes);
    admin_routes = admin_crud::<Ministry>(admin_routes);
    admin_routes = admin_crud::<Zone>(admin_routes);
    admin_routes = admin_crud::<BlogPost>(admin_routes);
    admin_routes = admin_crud::<PrayerRequest>(admin_routes);
    admin_routes = admin_crud::<ContactMessage>(admin_routes);
    admin_routes = admin_crud::<KidsClass>(admin_routes);
    admin_routes = admin_crud::<KidsGalleryItem>(admin_routes);
    let admin_routes = admin_routes
        .nest(&admin_path::<Sermon>(), sermons::admin_routes())
        .nest(
            &admin_path::<Testimonial>(),
            resources::admin_routes::<Testimonial>()
                .route("/:id/messages", get(testimonials::messages)),
        )
        .route("/api/v1/admin/settings", get(settings::list_admin))
        .route("/api/v1/admin/settings/:key", put(settings::upsert))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(submission_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
