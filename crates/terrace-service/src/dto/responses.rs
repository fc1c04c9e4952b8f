//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase field names.
//! Snowflake IDs serialize as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use terrace_core::{ReactionCounts, Snowflake};

// ============================================================================
// Pagination
// ============================================================================

/// Page-based pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    /// Build metadata for a page, computing the page count from the total
    #[must_use]
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Light user shape embedded in comments, reactions, and feed entries
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Snowflake,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Public profile returned by the users endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Snowflake,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub points: i32,
    pub level: i32,
    pub reputation: i32,
    /// Lifetime points from the activity ledger
    pub total_points: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// One reaction row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub target_type: String,
    pub target_id: Snowflake,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Reaction with its reacting user populated (target listing)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionWithUserResponse {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: String,
    pub user: UserResponse,
    pub created_at: DateTime<Utc>,
}

/// Reactions for a target, grouped by kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedReactionsResponse {
    pub like: Vec<ReactionWithUserResponse>,
    pub fire: Vec<ReactionWithUserResponse>,
    pub suspicious: Vec<ReactionWithUserResponse>,
    pub funny: Vec<ReactionWithUserResponse>,
}

/// Toggle result: new state plus recomputed live counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionResponse {
    pub added: bool,
    pub reaction: Option<ReactionResponse>,
    pub counts: ReactionCounts,
}

/// Full reaction listing for a target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReactionsResponse {
    pub reactions: GroupedReactionsResponse,
    pub counts: ReactionCounts,
    pub total: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// One comment with author and mentioned users populated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Snowflake,
    pub user: UserResponse,
    pub entity_type: String,
    pub entity_id: Snowflake,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    pub mentions: Vec<UserResponse>,
    pub reaction_counts: ReactionCounts,
    pub total_reactions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paginated comment listing
#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Activity Responses
// ============================================================================

/// One activity feed entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub author: UserResponse,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
    pub metadata: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

/// Paginated activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeedResponse {
    pub activities: Vec<ActivityResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub rank: i64,
    pub user: UserResponse,
    pub points: i64,
}

/// Leaderboard listing
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub leaders: Vec<LeaderboardEntryResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, redis: bool) -> Self {
        Self {
            status: if database && redis { "ready" } else { "degraded" },
            database,
            redis,
        }
    }
}
