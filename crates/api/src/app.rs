use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};
use domain::services::mail::MailTransport;
use shared::jwt::JwtConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{require_auth, require_super_admin};
use crate::routes::{admins, auth, dashboard, files, health, license_types, notifications, requests};
use crate::services::requests::RequestService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    /// The request lifecycle service, wired to this state's pool and
    /// transport. Cheap to build per request: only pool clones.
    pub fn request_service(&self) -> RequestService {
        RequestService::new(
            self.pool.clone(),
            self.mailer.clone(),
            self.config.notifications.recipient_username.clone(),
        )
    }
}

pub fn create_app(config: Config, pool: PgPool, mailer: Arc<dyn MailTransport>) -> Router {
    let jwt = Arc::new(JwtConfig::with_leeway(
        &config.jwt.secret,
        config.jwt.token_expiry_secs,
        config.jwt.leeway_secs,
    ));
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        mailer,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
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
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/jenis-perizinan", get(license_types::list_public))
        .route("/api/v1/jenis-perizinan/:id", get(license_types::get))
        .route("/api/v1/permohonan", post(requests::create))
        .route("/api/v1/download/:filename", get(files::download));

    // Staff routes (require a valid token)
    let staff_routes = Router::new()
        .route("/api/v1/auth/profile", get(auth::profile))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/admin/permohonan", get(requests::list))
        .route("/api/v1/admin/permohonan/:id", get(requests::get))
        .route(
            "/api/v1/admin/permohonan/status/:status",
            get(requests::list_by_status),
        )
        .route(
            "/api/v1/admin/permohonan/:id/status",
            patch(requests::update_status),
        )
        .route(
            "/api/v1/admin/permohonan/:id/balasan",
            post(requests::send_reply),
        )
        .route(
            "/api/v1/admin/permohonan/:id/email-logs",
            get(requests::email_logs),
        )
        .route("/api/v1/admin/notifikasi", get(notifications::list))
        .route(
            "/api/v1/admin/notifikasi/count",
            get(notifications::unread_count),
        )
        .route(
            "/api/v1/admin/notifikasi/:id/read",
            patch(notifications::mark_read),
        )
        .route(
            "/api/v1/admin/notifikasi/read-all",
            patch(notifications::mark_all_read),
        )
        .route(
            "/api/v1/admin/dashboard/statistik",
            get(dashboard::statistics),
        )
        .route("/api/v1/admin/dashboard/recent", get(dashboard::recent))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Super admin routes (management surface). Every path lives in
    // exactly one router; merging layered method routers across groups
    // is not supported.
    let super_admin_routes = Router::new()
        .route(
            "/api/v1/admin/jenis-perizinan",
            get(license_types::list_all).post(license_types::create),
        )
        .route(
            "/api/v1/admin/jenis-perizinan/:id",
            get(license_types::get)
                .put(license_types::update)
                .delete(license_types::delete),
        )
        .route("/api/v1/admin/admins", get(admins::list).post(admins::create))
        .route(
            "/api/v1/admin/admins/:id",
            get(admins::get).put(admins::update).delete(admins::delete),
        )
        .route(
            "/api/v1/admin/admins/:id/reset-password",
            post(admins::reset_password),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_super_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(staff_routes)
        .merge(super_admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.uploads.max_file_size_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
