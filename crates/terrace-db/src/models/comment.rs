//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
///
/// The four `*_count` columns are the denormalized per-kind reaction tallies.
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub author_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub content: String,
    pub parent_id: Option<i64>,
    pub like_count: i32,
    pub fire_count: i32,
    pub suspicious_count: i32,
    pub funny_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for comment_mentions join table
#[derive(Debug, Clone, FromRow)]
pub struct CommentMentionModel {
    pub comment_id: i64,
    pub user_id: i64,
}
