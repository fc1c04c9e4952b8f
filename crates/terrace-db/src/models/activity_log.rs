//! Activity log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for activity_logs table. Rows are insert-only.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogModel {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    pub action: String,
    pub target_kind: Option<String>,
    pub target_id: Option<i64>,
    pub metadata: JsonValue,
    pub points_earned: i32,
    pub created_at: DateTime<Utc>,
}

/// Aggregated points per user (from leaderboard query)
#[derive(Debug, Clone, FromRow)]
pub struct PointsTotalModel {
    pub user_id: i64,
    pub points: i64,
}
