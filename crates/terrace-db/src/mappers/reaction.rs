//! Reaction entity <-> model mapper

use terrace_core::entities::Reaction;
use terrace_core::value_objects::{ReactionKind, Snowflake, TargetType};

use crate::models::ReactionModel;

/// Rows are guarded by CHECK constraints; unknown values fall back to comment/like.
fn parse_target_type(type_str: &str) -> TargetType {
    TargetType::parse(type_str).unwrap_or(TargetType::Comment)
}

fn parse_kind(kind_str: &str) -> ReactionKind {
    ReactionKind::parse(kind_str).unwrap_or(ReactionKind::Like)
}

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            target_type: parse_target_type(&model.target_type),
            target_id: Snowflake::new(model.target_id),
            kind: parse_kind(&model.kind),
            created_at: model.created_at,
        }
    }
}

/// Convert Reaction entity reference to values for database insertion
pub struct ReactionInsert {
    pub id: i64,
    pub user_id: i64,
    pub target_type: &'static str,
    pub target_id: i64,
    pub kind: &'static str,
}

impl ReactionInsert {
    pub fn new(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            target_type: reaction.target_type.as_str(),
            target_id: reaction.target_id.into_inner(),
            kind: reaction.kind.as_str(),
        }
    }
}
