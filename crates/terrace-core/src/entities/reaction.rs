//! Reaction entity - one user's reaction to a comment, player, or rumor

use chrono::{DateTime, Utc};

use crate::value_objects::{ReactionKind, Snowflake, TargetType};

/// Reaction entity
///
/// A user holds at most one reaction per (target_type, target_id); the
/// kind can be swapped by toggling a different kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub target_type: TargetType,
    pub target_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) -> Self {
        Self {
            id,
            user_id,
            target_type,
            target_id,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Check whether this reaction points at the given target
    #[inline]
    pub fn targets(&self, target_type: TargetType, target_id: Snowflake) -> bool {
        self.target_type == target_type && self.target_id == target_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_creation() {
        let reaction = Reaction::new(
            Snowflake::new(1),
            Snowflake::new(10),
            TargetType::Comment,
            Snowflake::new(100),
            ReactionKind::Fire,
        );
        assert_eq!(reaction.kind, ReactionKind::Fire);
        assert!(reaction.targets(TargetType::Comment, Snowflake::new(100)));
        assert!(!reaction.targets(TargetType::Player, Snowflake::new(100)));
        assert!(!reaction.targets(TargetType::Comment, Snowflake::new(101)));
    }
}
