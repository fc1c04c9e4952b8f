//! Service context - dependency container for services
//!
//! Holds all repositories, the event publisher, and other dependencies
//! needed by services. Everything is injected explicitly at construction;
//! there is no process-wide mutable state.

use std::sync::Arc;

use terrace_cache::{Publisher, SharedRedisPool};
use terrace_common::auth::JwtService;
use terrace_core::traits::{
    ActivityRepository, CommentRepository, ReactionRepository, UserRepository,
};
use terrace_core::SnowflakeGenerator;
use terrace_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis pub/sub for best-effort engagement events
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    activity_repo: Arc<dyn ActivityRepository>,

    // Pub/Sub
    publisher: Publisher,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        // Clone the inner RedisPool from the Arc for the publisher
        let publisher = Publisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            user_repo,
            comment_repo,
            reaction_repo,
            activity_repo,
            publisher,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the activity repository
    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    // === Pub/Sub ===

    /// Get the Redis pub/sub publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> terrace_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.activity_repo
                .ok_or_else(|| ServiceError::validation("activity_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
