//! Request DTOs for API endpoints
//!
//! The wire format is camelCase, matching the existing frontend. Closed
//! vocabularies (target type, reaction kind, entity type) arrive as strings
//! and are parsed in the service layer so that every request is re-validated
//! server-side regardless of client checks.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Reaction Requests
// ============================================================================

/// Toggle a reaction on a target
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionRequest {
    /// "comment", "player", or "rumor"
    pub target_type: String,

    /// Target Snowflake id as string
    pub target_id: String,

    /// "like", "fire", "suspicious", or "funny"
    #[serde(rename = "type")]
    pub kind: String,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create a comment on a player or rumor
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// "player" or "rumor"
    pub entity_type: String,

    /// Entity Snowflake id as string
    pub entity_id: String,

    #[validate(length(min = 1, max = 500, message = "Comment must be 1-500 characters"))]
    pub content: String,

    /// Optional comment being replied to (Snowflake as string)
    pub parent_id: Option<String>,
}
