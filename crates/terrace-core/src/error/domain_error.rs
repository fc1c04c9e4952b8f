//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Username not found: {0}")]
    UsernameNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Reaction not found")]
    ReactionNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    #[error("Invalid target type: {0}")]
    InvalidTargetType(String),

    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid activity type: {0}")]
    InvalidActivityType(String),

    #[error("Content is empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Parent comment belongs to a different entity")]
    ParentEntityMismatch,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Concurrent reaction update")]
    ReactionConflict,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::UsernameNotFound(_) => "UNKNOWN_USERNAME",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ReactionNotFound => "UNKNOWN_REACTION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEntityType(_) => "INVALID_ENTITY_TYPE",
            Self::InvalidTargetType(_) => "INVALID_TARGET_TYPE",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidActivityType(_) => "INVALID_ACTIVITY_TYPE",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::ParentEntityMismatch => "PARENT_ENTITY_MISMATCH",

            // Authorization
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::ReactionConflict => "REACTION_CONFLICT",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UsernameNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ReactionNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEntityType(_)
                | Self::InvalidTargetType(_)
                | Self::InvalidReactionKind(_)
                | Self::InvalidActivityType(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::ParentEntityMismatch
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionConflict | Self::UsernameAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::InvalidReactionKind("angry".to_string());
        assert_eq!(err.code(), "INVALID_REACTION_KIND");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::CommentNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::EmptyContent.is_validation());
        assert!(DomainError::ContentTooLong { max: 500 }.is_validation());
        assert!(DomainError::NotCommentAuthor.is_authorization());
        assert!(DomainError::ReactionConflict.is_conflict());
        assert!(!DomainError::DatabaseError("x".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ContentTooLong { max: 500 };
        assert_eq!(err.to_string(), "Content too long: max 500 characters");

        let err = DomainError::UsernameNotFound("ghost".to_string());
        assert_eq!(err.to_string(), "Username not found: ghost");
    }
}
