//! Comment entity - a user comment on a player or transfer rumor

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityType, ReactionCounts, Snowflake};

/// Comment entity
///
/// `reaction_counts` is denormalized: it must always equal the number of live
/// reactions of each kind targeting this comment. The reaction toggle adjusts
/// it in the same transaction that mutates the reaction rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub entity_type: EntityType,
    pub entity_id: Snowflake,
    pub content: String,
    pub parent_id: Option<Snowflake>,
    /// Users referenced by `@username` tokens, each at most once
    pub mentions: Vec<Snowflake>,
    pub reaction_counts: ReactionCounts,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new top-level Comment
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        entity_type: EntityType,
        entity_id: Snowflake,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            entity_type,
            entity_id,
            content,
            parent_id: None,
            mentions: Vec::new(),
            reaction_counts: ReactionCounts::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a reply to another comment on the same entity
    pub fn new_reply(
        id: Snowflake,
        author_id: Snowflake,
        entity_type: EntityType,
        entity_id: Snowflake,
        content: String,
        parent_id: Snowflake,
    ) -> Self {
        let mut comment = Self::new(id, author_id, entity_type, entity_id, content);
        comment.parent_id = Some(parent_id);
        comment
    }

    /// Check if this comment is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if the given user owns this comment
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Sum of all reaction counters
    #[inline]
    pub fn total_reactions(&self) -> i32 {
        self.reaction_counts.total()
    }
}
