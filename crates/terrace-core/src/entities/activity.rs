//! Activity entry - append-only audit / point-ledger record
//!
//! Entries are written once and never mutated or deleted. Deleting a comment
//! leaves its historical entries behind as orphaned pointers.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::value_objects::{ActivityTargetKind, ActivityType, Snowflake};

/// One entry in the activity ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub id: Snowflake,
    /// User the entry is attributed to. For mentions this is the *mentioned*
    /// user, not the comment author.
    pub user_id: Snowflake,
    pub activity_type: ActivityType,
    /// Persian, user-facing action text
    pub action: String,
    pub target_kind: Option<ActivityTargetKind>,
    pub target_id: Option<Snowflake>,
    pub metadata: JsonValue,
    pub points_earned: i32,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    /// Create a new entry with no target and no points
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        activity_type: ActivityType,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            activity_type,
            action: action.into(),
            target_kind: None,
            target_id: None,
            metadata: JsonValue::Object(serde_json::Map::new()),
            points_earned: 0,
            created_at: Utc::now(),
        }
    }

    /// Attach the target the entry refers to
    pub fn with_target(mut self, kind: ActivityTargetKind, id: Snowflake) -> Self {
        self.target_kind = Some(kind);
        self.target_id = Some(id);
        self
    }

    /// Attach a metadata bag
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the points earned by this action
    pub fn with_points(mut self, points: i32) -> Self {
        self.points_earned = points;
        self
    }

    /// Check if this entry awards points
    #[inline]
    pub fn earns_points(&self) -> bool {
        self.points_earned > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chain() {
        let entry = ActivityEntry::new(
            Snowflake::new(1),
            Snowflake::new(10),
            ActivityType::ReactionAdded,
            "واکنش لایک اضافه شد",
        )
        .with_target(ActivityTargetKind::Comment, Snowflake::new(100))
        .with_metadata(json!({"reactionType": "like"}))
        .with_points(1);

        assert_eq!(entry.target_kind, Some(ActivityTargetKind::Comment));
        assert_eq!(entry.target_id, Some(Snowflake::new(100)));
        assert_eq!(entry.points_earned, 1);
        assert!(entry.earns_points());
    }

    #[test]
    fn test_mention_entries_earn_no_points() {
        let entry = ActivityEntry::new(
            Snowflake::new(2),
            Snowflake::new(11),
            ActivityType::UserMentioned,
            "سارا شما را منشن کرد",
        );
        assert_eq!(entry.points_earned, 0);
        assert!(!entry.earns_points());
    }
}
