//! Activity feed and leaderboard handlers

use axum::extract::{Query, State};
use serde::Deserialize;
use terrace_service::{ActivityService, LeaderboardResponse};

use crate::extractors::{AuthUser, PageQuery};
use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

/// Optional activity type filter for the feed
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    pub activity_type: Option<String>,
}

/// Leaderboard size
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// Global activity feed, newest first
///
/// GET /api/activity?page=&limit=&activityType=
pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    pagination: PageQuery,
) -> ApiResult<ApiSuccess<terrace_service::ActivityFeedResponse>> {
    let service = ActivityService::new(state.service_context());
    let result = service
        .feed(
            pagination.page,
            pagination.limit,
            query.activity_type.as_deref(),
        )
        .await?;

    Ok(ApiSuccess::ok("فعالیت‌ها با موفقیت دریافت شد", result))
}

/// The caller's own activity feed
///
/// GET /api/activity/me?page=&limit=
pub async fn get_my_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: PageQuery,
) -> ApiResult<ApiSuccess<terrace_service::ActivityFeedResponse>> {
    let service = ActivityService::new(state.service_context());
    let result = service
        .user_feed(auth.user_id, pagination.page, pagination.limit)
        .await?;

    Ok(ApiSuccess::ok("فعالیت‌های شما دریافت شد", result))
}

/// Points leaderboard aggregated from the activity ledger
///
/// GET /api/leaderboard?limit=
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<ApiSuccess<LeaderboardResponse>> {
    let service = ActivityService::new(state.service_context());
    let result = service.leaderboard(query.limit).await?;

    Ok(ApiSuccess::ok("جدول امتیازات دریافت شد", result))
}
