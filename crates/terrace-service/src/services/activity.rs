//! Activity service
//!
//! Append-only ledger of point-earning and notable actions, plus the feed
//! and leaderboard reads built on top of it.
//!
//! `record` is a best-effort side effect: the caller's mutation has already
//! committed, so a ledger failure is logged and swallowed rather than
//! propagated. No operation ever fails because activity logging failed.

use std::collections::HashMap;

use terrace_core::entities::{ActivityEntry, User};
use terrace_core::traits::ActivityQuery;
use terrace_core::{ActivityType, Snowflake};
use tracing::{instrument, warn};

use crate::dto::mappers::{activity_response, index_users, user_response};
use crate::dto::{
    ActivityFeedResponse, LeaderboardEntryResponse, LeaderboardResponse, PaginationMeta,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default leaderboard size
const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Activity service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an entry to the ledger, best-effort.
    ///
    /// Failures are logged and never surfaced to the caller.
    #[instrument(skip(self, entry), fields(activity_type = %entry.activity_type))]
    pub async fn record(&self, entry: ActivityEntry) {
        if let Err(e) = self.ctx.activity_repo().append(&entry).await {
            warn!(
                user_id = %entry.user_id,
                activity_type = %entry.activity_type,
                error = %e,
                "Failed to record activity entry"
            );
        }
    }

    /// Global activity feed, newest first
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        page: i64,
        limit: i64,
        activity_type: Option<&str>,
    ) -> ServiceResult<ActivityFeedResponse> {
        let activity_type = activity_type
            .map(ActivityType::parse)
            .transpose()
            .map_err(ServiceError::from)?;

        let query = ActivityQuery {
            page: page.max(1),
            limit: limit.clamp(1, 100),
            activity_type,
        };

        let entries = self.ctx.activity_repo().find_recent(query.clone()).await?;
        let total = self.ctx.activity_repo().count(activity_type).await?;

        let users = self.load_actors(&entries).await?;
        let activities = entries
            .iter()
            .map(|e| activity_response(&users, e))
            .collect();

        Ok(ActivityFeedResponse {
            activities,
            pagination: PaginationMeta::new(query.page, query.limit, total),
        })
    }

    /// One user's entries, newest first
    #[instrument(skip(self))]
    pub async fn user_feed(
        &self,
        user_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<ActivityFeedResponse> {
        let query = ActivityQuery {
            page: page.max(1),
            limit: limit.clamp(1, 100),
            activity_type: None,
        };

        let entries = self
            .ctx
            .activity_repo()
            .find_by_user(user_id, query.clone())
            .await?;
        let total = self.ctx.activity_repo().count_by_user(user_id).await?;

        let users = self.load_actors(&entries).await?;
        let activities = entries
            .iter()
            .map(|e| activity_response(&users, e))
            .collect();

        Ok(ActivityFeedResponse {
            activities,
            pagination: PaginationMeta::new(query.page, query.limit, total),
        })
    }

    /// Top users by points earned across the ledger
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, limit: Option<i64>) -> ServiceResult<LeaderboardResponse> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).clamp(1, 100);

        let totals = self.ctx.activity_repo().leaderboard(limit).await?;

        let ids: Vec<Snowflake> = totals.iter().map(|t| t.user_id).collect();
        let users = index_users(self.ctx.user_repo().find_by_ids(&ids).await?);

        let leaders = totals
            .iter()
            .enumerate()
            .map(|(i, total)| LeaderboardEntryResponse {
                rank: i as i64 + 1,
                user: user_response(&users, total.user_id),
                points: total.points,
            })
            .collect();

        Ok(LeaderboardResponse { leaders })
    }

    /// Batch-load the actors referenced by a page of entries
    async fn load_actors(
        &self,
        entries: &[ActivityEntry],
    ) -> ServiceResult<HashMap<Snowflake, User>> {
        let mut ids: Vec<Snowflake> = entries.iter().map(|e| e.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(index_users(self.ctx.user_repo().find_by_ids(&ids).await?))
    }
}
