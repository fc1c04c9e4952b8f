//! Comment entity <-> model mapper

use terrace_core::entities::Comment;
use terrace_core::value_objects::{EntityType, ReactionCounts, Snowflake};

use crate::models::CommentModel;

/// Convert database entity type string to EntityType enum.
/// Rows are guarded by a CHECK constraint; unknown values fall back to player.
fn parse_entity_type(type_str: &str) -> EntityType {
    EntityType::parse(type_str).unwrap_or(EntityType::Player)
}

/// Convert CommentModel to Comment entity.
/// Mentions live in a join table; the repository stitches them in afterwards.
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            entity_type: parse_entity_type(&model.entity_type),
            entity_id: Snowflake::new(model.entity_id),
            content: model.content,
            parent_id: model.parent_id.map(Snowflake::new),
            mentions: Vec::new(),
            reaction_counts: ReactionCounts {
                like: model.like_count,
                fire: model.fire_count,
                suspicious: model.suspicious_count,
                funny: model.funny_count,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert Comment entity reference to values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub entity_type: &'static str,
    pub entity_id: i64,
    pub content: &'a str,
    pub parent_id: Option<i64>,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            author_id: comment.author_id.into_inner(),
            entity_type: comment.entity_type.as_str(),
            entity_id: comment.entity_id.into_inner(),
            content: &comment.content,
            parent_id: comment.parent_id.map(Snowflake::into_inner),
        }
    }
}
