use anyhow::Result;
use tracing::info;

use perizinan_api::{app, config::Config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Perizinan API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Seed the default super admin and license types on first run
    services::bootstrap::bootstrap(&pool, &config.bootstrap).await?;

    // Build application
    let mailer = services::email::build_transport(&config.email);
    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool, mailer);

    // Start server
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
