//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub points: i32,
    pub level: i32,
    pub reputation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
