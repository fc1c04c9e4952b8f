//! User profile handlers

use axum::extract::{Path, State};
use terrace_service::{UserProfileResponse, UserService};

use crate::response::{ApiResult, ApiSuccess};
use crate::state::AppState;

/// Public profile by username
///
/// GET /api/users/:username
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<ApiSuccess<serde_json::Value>> {
    let service = UserService::new(state.service_context());
    let profile: UserProfileResponse = service.get_profile(&username).await?;

    Ok(ApiSuccess::ok(
        "پروفایل کاربر دریافت شد",
        serde_json::json!({ "user": profile }),
    ))
}
