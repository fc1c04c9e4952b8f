//! Redis Pub/Sub publisher.
//!
//! Publishes engagement events to Redis channels. Callers treat publishing
//! as best-effort: the services log a warning on failure and carry on.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::EngagementChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementEvent {
    /// Event type name (e.g., "REACTION_TOGGLE", "COMMENT_CREATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl EngagementEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the receiver count
    pub async fn publish(
        &self,
        channel: &EngagementChannel,
        event: &EngagementEvent,
    ) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish the same event to several channels
    pub async fn publish_many(
        &self,
        channels: &[EngagementChannel],
        event: &EngagementEvent,
    ) -> RedisResult<u32> {
        let payload = event.to_json()?;
        let mut total_receivers = 0;
        let mut conn = self.pool.get().await?;

        for channel in channels {
            let channel_name = channel.name();
            let receivers: u32 = conn.publish(&channel_name, &payload).await?;
            total_receivers += receivers;
        }

        tracing::debug!(
            channels = channels.len(),
            event_type = %event.event_type,
            total_receivers = total_receivers,
            "Published event to multiple channels"
        );

        Ok(total_receivers)
    }
}
