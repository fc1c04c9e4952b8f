//! User service
//!
//! Public profile lookups. Profile points combine the stored user fields
//! with a lifetime total aggregated from the activity ledger.

use terrace_core::Snowflake;
use tracing::instrument;

use crate::dto::UserProfileResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile by username
    #[instrument(skip(self))]
    pub async fn get_profile(&self, username: &str) -> ServiceResult<UserProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        let total_points = self.ctx.activity_repo().sum_points(user.id).await?;

        Ok(UserProfileResponse {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            avatar: user.avatar,
            points: user.points,
            level: user.level,
            reputation: user.reputation,
            total_points,
            created_at: user.created_at,
        })
    }

    /// Profile by user id (own profile endpoints)
    #[instrument(skip(self))]
    pub async fn get_profile_by_id(&self, user_id: Snowflake) -> ServiceResult<UserProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let total_points = self.ctx.activity_repo().sum_points(user.id).await?;

        Ok(UserProfileResponse {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            avatar: user.avatar,
            points: user.points,
            level: user.level,
            reputation: user.reputation,
            total_points,
            created_at: user.created_at,
        })
    }
}
