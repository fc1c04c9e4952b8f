//! Comment handlers
//!
//! Create, list, and delete comments on players and transfer rumors.

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use terrace_core::Snowflake;
use terrace_service::{CommentListResponse, CommentResponse, CommentService, CreateCommentRequest};

use crate::extractors::{AuthUser, PageQuery, ValidatedJson};
use crate::response::{ApiError, ApiMessage, ApiResult, ApiSuccess};
use crate::state::AppState;

/// Entity selector for the comment listing endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

impl EntityQuery {
    fn require(self) -> Result<(String, String), ApiError> {
        match (self.entity_type, self.entity_id) {
            (Some(entity_type), Some(entity_id)) => Ok((entity_type, entity_id)),
            _ => Err(ApiError::MissingParam("entityType و entityId")),
        }
    }
}

/// Create a comment
///
/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<ApiSuccess<serde_json::Value>> {
    let service = CommentService::new(state.service_context());
    let comment: CommentResponse = service.create_comment(auth.user_id, request).await?;

    Ok(ApiSuccess::created(
        "نظر با موفقیت ثبت شد",
        serde_json::json!({ "comment": comment }),
    ))
}

/// List comments for an entity, newest first
///
/// GET /api/comments?entityType=&entityId=&page=&limit=
pub async fn get_comments(
    State(state): State<AppState>,
    Query(query): Query<EntityQuery>,
    pagination: PageQuery,
) -> ApiResult<ApiSuccess<CommentListResponse>> {
    let (entity_type, entity_id) = query.require()?;

    let service = CommentService::new(state.service_context());
    let result = service
        .get_comments(
            &entity_type,
            &entity_id,
            Some(pagination.page),
            Some(pagination.limit),
        )
        .await?;

    Ok(ApiSuccess::ok("نظرات با موفقیت دریافت شد", result))
}

/// Delete a comment (author only)
///
/// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<ApiMessage> {
    let comment_id = id
        .parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_path("Invalid comment id format"))?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, auth.user_id).await?;

    Ok(ApiMessage("نظر با موفقیت حذف شد"))
}
