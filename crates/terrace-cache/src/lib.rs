//! # terrace-cache
//!
//! Cache layer: Redis connection pool and the pub/sub publisher used for
//! best-effort engagement event emission. Event publishing is decoupled from
//! the primary mutations; a Redis outage never fails a toggle or a comment.

pub mod pool;
pub mod pubsub;

// Re-export commonly used types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use pubsub::{EngagementChannel, EngagementEvent, Publisher};
