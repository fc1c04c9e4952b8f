//! # terrace-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `terrace-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the single-transaction reaction
//!   toggle that keeps the denormalized comment counters consistent
//!
//! ## Usage
//!
//! ```rust,ignore
//! use terrace_db::pool::{create_pool, DatabaseConfig};
//! use terrace_db::repositories::PgReactionRepository;
//! use terrace_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let reaction_repo = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgActivityRepository, PgCommentRepository, PgReactionRepository, PgUserRepository,
};
