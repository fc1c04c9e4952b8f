//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub user_id: i64,
    pub target_type: String,
    pub target_id: i64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregated per-kind count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub kind: String,
    pub count: i64,
}
