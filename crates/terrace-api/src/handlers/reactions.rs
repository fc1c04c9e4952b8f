//! Reaction handlers
//!
//! Toggle and query endpoints for reactions on comments, players, and rumors.

use axum::extract::{Query, State};
use serde::Deserialize;
use terrace_service::{ReactionService, ToggleReactionRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, ApiSuccess};
use crate::state::AppState;

/// Target selector shared by the reaction query endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetQuery {
    pub target_type: Option<String>,
    pub target_id: Option<String>,
}

impl TargetQuery {
    /// Both parameters are required; missing ones get the Persian message
    /// the frontend shows verbatim
    fn require(self) -> Result<(String, String), ApiError> {
        match (self.target_type, self.target_id) {
            (Some(target_type), Some(target_id)) => Ok((target_type, target_id)),
            _ => Err(ApiError::MissingParam("targetType و targetId")),
        }
    }
}

/// Toggle a reaction (add / remove / swap)
///
/// POST /api/reactions/toggle
pub async fn toggle_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<ApiSuccess<terrace_service::ToggleReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let result = service.toggle(auth.user_id, request).await?;

    let message = if result.added {
        "واکنش اضافه شد"
    } else {
        "واکنش حذف شد"
    };

    Ok(ApiSuccess::ok(message, result))
}

/// Get reactions for a target, grouped by kind
///
/// GET /api/reactions?targetType=&targetId=
pub async fn get_reactions(
    State(state): State<AppState>,
    Query(query): Query<TargetQuery>,
) -> ApiResult<ApiSuccess<terrace_service::TargetReactionsResponse>> {
    let (target_type, target_id) = query.require()?;

    let service = ReactionService::new(state.service_context());
    let result = service.get_reactions(&target_type, &target_id).await?;

    Ok(ApiSuccess::ok("واکنش‌ها با موفقیت دریافت شد", result))
}

/// Get the caller's reaction for a target
///
/// GET /api/reactions/user?targetType=&targetId=
pub async fn get_user_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TargetQuery>,
) -> ApiResult<ApiSuccess<serde_json::Value>> {
    let (target_type, target_id) = query.require()?;

    let service = ReactionService::new(state.service_context());
    let reaction = service
        .get_user_reaction(auth.user_id, &target_type, &target_id)
        .await?;

    Ok(ApiSuccess::ok(
        "واکنش کاربر دریافت شد",
        serde_json::json!({ "reaction": reaction }),
    ))
}
