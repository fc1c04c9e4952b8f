//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{ActivityEntry, Comment, Reaction, User};
use crate::error::DomainError;
use crate::value_objects::{
    ActivityType, EntityType, ReactionCounts, ReactionKind, Snowflake, TargetType,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Resolve a set of usernames to users; unknown names are omitted
    async fn find_by_usernames(&self, usernames: &[String]) -> RepoResult<Vec<User>>;

    /// Batch lookup by IDs for response population; unknown IDs are omitted
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// Page-based pagination options for comment queries
#[derive(Debug, Clone, Copy)]
pub struct CommentQuery {
    /// 1-based page number
    pub page: i64,
    /// Page size
    pub limit: i64,
}

impl Default for CommentQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl CommentQuery {
    /// Rows to skip for this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0) * self.limit
    }

    /// Number of pages needed for `total` rows
    pub fn pages(&self, total: i64) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// List comments for an entity, newest first, paginated
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Snowflake,
        query: CommentQuery,
    ) -> RepoResult<Vec<Comment>>;

    /// Count comments for an entity
    async fn count_by_entity(&self, entity_type: EntityType, entity_id: Snowflake)
        -> RepoResult<i64>;

    /// Persist a comment together with its mention references
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment and every reaction targeting it, atomically.
    /// Activity entries referencing the comment are left untouched.
    async fn delete_with_reactions(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// Result of an atomic toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// True when a reaction now exists for (user, target), false when the
    /// toggle removed it
    pub added: bool,
    /// The live reaction after the toggle, if any
    pub reaction: Option<Reaction>,
    /// Kind that was removed (same-kind toggle-off or kind swap)
    pub removed_kind: Option<ReactionKind>,
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Toggle the user's reaction on a target, atomically.
    ///
    /// Runs the whole add / remove / swap decision and the comment counter
    /// adjustment in a single transaction. A concurrent insert racing on the
    /// (user, target) unique index surfaces as `DomainError::ReactionConflict`.
    async fn toggle(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<ToggleOutcome>;

    /// Get the user's live reaction on a target, if any
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Option<Reaction>>;

    /// All reactions on a target, newest first
    async fn find_by_target(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Vec<Reaction>>;

    /// Live per-kind counts for a target (aggregated, not denormalized)
    async fn count_by_kind(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Activity Repository
// ============================================================================

/// Pagination and filter options for the activity feed
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    /// 1-based page number (0 treated as 1)
    pub page: i64,
    /// Page size
    pub limit: i64,
    /// Restrict to one activity type
    pub activity_type: Option<ActivityType>,
}

/// Aggregated points for one user, for the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsTotal {
    pub user_id: Snowflake,
    pub points: i64,
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append one entry. Entries are write-once; there is no update or delete.
    async fn append(&self, entry: &ActivityEntry) -> RepoResult<()>;

    /// Global feed, newest first
    async fn find_recent(&self, query: ActivityQuery) -> RepoResult<Vec<ActivityEntry>>;

    /// Count entries matching the query's filter
    async fn count(&self, activity_type: Option<ActivityType>) -> RepoResult<i64>;

    /// One user's entries, newest first
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        query: ActivityQuery,
    ) -> RepoResult<Vec<ActivityEntry>>;

    /// Count one user's entries
    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Total points a user has earned across the ledger
    async fn sum_points(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Top users by total points earned
    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<PointsTotal>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_query_offset() {
        let q = CommentQuery { page: 1, limit: 20 };
        assert_eq!(q.offset(), 0);

        let q = CommentQuery { page: 3, limit: 20 };
        assert_eq!(q.offset(), 40);

        let q = CommentQuery { page: 0, limit: 20 };
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_comment_query_pages() {
        let q = CommentQuery { page: 1, limit: 20 };
        assert_eq!(q.pages(0), 0);
        assert_eq!(q.pages(1), 1);
        assert_eq!(q.pages(20), 1);
        assert_eq!(q.pages(21), 2);
        assert_eq!(q.pages(40), 2);
    }
}
