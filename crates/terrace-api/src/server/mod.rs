//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use terrace_cache::{RedisPool, RedisPoolConfig};
use terrace_common::{AppConfig, AppError, JwtService};
use terrace_core::SnowflakeGenerator;
use terrace_db::{
    create_pool, PgActivityRepository, PgCommentRepository, PgReactionRepository, PgUserRepository,
};
use terrace_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let rate_limit = state.config().rate_limit.clone();
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    // Health probes bypass the rate limiter
    let api = apply_rate_limit(create_router(), &rate_limit);
    let router = health_routes().merge(api);
    let router = apply_middleware(router, &cors, is_production);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = terrace_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool.clone()));
    let activity_repo = Arc::new(PgActivityRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .user_repo(user_repo)
        .comment_repo(comment_repo)
        .reaction_repo(reaction_repo)
        .activity_repo(activity_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
