//! Pub/Sub channel definitions.
//!
//! Channel naming conventions for Redis Pub/Sub. Consumers (live reaction
//! bars, notification workers) subscribe by entity page or by user.

use terrace_core::{EntityType, Snowflake};

/// Channel prefix for entity-page events (player/rumor detail pages)
pub const ENTITY_CHANNEL_PREFIX: &str = "entity:";
/// Channel prefix for user-specific events (mention notifications)
pub const USER_CHANNEL_PREFIX: &str = "user:";
/// Channel for site-wide events (global activity feed)
pub const FEED_CHANNEL: &str = "feed";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngagementChannel {
    /// Events scoped to one player or rumor page
    Entity(EntityType, Snowflake),
    /// Events for a specific user
    User(Snowflake),
    /// Site-wide feed events
    Feed,
}

impl EngagementChannel {
    /// Create an entity-page channel
    #[must_use]
    pub fn entity(entity_type: EntityType, entity_id: Snowflake) -> Self {
        Self::Entity(entity_type, entity_id)
    }

    /// Create a user channel
    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    /// Create the feed channel
    #[must_use]
    pub fn feed() -> Self {
        Self::Feed
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Entity(entity_type, id) => {
                format!("{ENTITY_CHANNEL_PREFIX}{entity_type}:{id}")
            }
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
            Self::Feed => FEED_CHANNEL.to_string(),
        }
    }
}

impl std::fmt::Display for EngagementChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
