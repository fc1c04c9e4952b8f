//! Response types and error handling for API endpoints
//!
//! Every response uses the uniform envelope the frontend expects:
//! `{"success": true, "message": <Persian>, "data": ...}` on success and
//! `{"success": false, "message": <Persian>}` on error. Errors funnel
//! through `ApiError`, which maps the layered error types to an HTTP status
//! and a Persian user-facing message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use terrace_common::AppError;
use terrace_core::DomainError;
use terrace_service::ServiceError;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Domain(e) => domain_status(e),
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidPath(_)
            | Self::MissingParam(_) => StatusCode::BAD_REQUEST,
            Self::MissingAuth | Self::InvalidAuthFormat => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Persian user-facing message for this error
    #[must_use]
    pub fn message_fa(&self) -> String {
        match self {
            Self::Service(ServiceError::Domain(e)) | Self::Domain(e) => domain_message_fa(e),
            Self::App(e) => status_message_fa(e.status_code()),
            Self::Service(e) => status_message_fa(e.status_code()),
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidPath(_) => {
                "درخواست نامعتبر است".to_string()
            }
            Self::MissingParam(params) => format!("{params} الزامی است"),
            Self::MissingAuth | Self::InvalidAuthFormat => "ابتدا وارد شوید".to_string(),
            Self::Internal(_) => "خطای داخلی سرور".to_string(),
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Create an invalid path parameter error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

fn domain_status(e: &DomainError) -> StatusCode {
    if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else if e.is_authorization() {
        StatusCode::FORBIDDEN
    } else if e.is_validation() {
        StatusCode::BAD_REQUEST
    } else if e.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Persian messages for domain errors
fn domain_message_fa(e: &DomainError) -> String {
    match e {
        DomainError::CommentNotFound(_) => "نظر پیدا نشد".to_string(),
        DomainError::UserNotFound(_) | DomainError::UsernameNotFound(_) => {
            "کاربر پیدا نشد".to_string()
        }
        DomainError::ReactionNotFound => "واکنشی ثبت نشده است".to_string(),
        DomainError::InvalidReactionKind(_) => "نوع واکنش نامعتبر است".to_string(),
        DomainError::InvalidTargetType(_) => "نوع هدف نامعتبر است".to_string(),
        DomainError::InvalidEntityType(_) => "نوع موجودیت نامعتبر است".to_string(),
        DomainError::InvalidActivityType(_) => "نوع فعالیت نامعتبر است".to_string(),
        DomainError::EmptyContent => "متن نظر نمی‌تواند خالی باشد".to_string(),
        DomainError::ContentTooLong { max } => {
            format!("متن نظر حداکثر {max} کاراکتر است")
        }
        DomainError::ParentEntityMismatch => "نظر والد به این موجودیت تعلق ندارد".to_string(),
        DomainError::NotCommentAuthor => "شما اجازه حذف این نظر را ندارید".to_string(),
        DomainError::ReactionConflict => "درخواست همزمان؛ دوباره تلاش کنید".to_string(),
        DomainError::ValidationError(_) => "درخواست نامعتبر است".to_string(),
        _ => "خطای داخلی سرور".to_string(),
    }
}

/// Fallback Persian message by status class
fn status_message_fa(status: u16) -> String {
    match status {
        400 => "درخواست نامعتبر است",
        401 => "ابتدا وارد شوید",
        403 => "شما اجازه انجام این عملیات را ندارید",
        404 => "موردی یافت نشد",
        409 => "درخواست همزمان؛ دوباره تلاش کنید",
        429 => "تعداد درخواست‌ها بیش از حد مجاز است",
        _ => "خطای داخلی سرور",
    }
    .to_string()
}

/// Error envelope body
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors with the internal (English) detail
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorEnvelope {
            success: false,
            message: self.message_fa(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Success envelope with a Persian message and a data payload
pub struct ApiSuccess<T> {
    status: StatusCode,
    message: &'static str,
    data: T,
}

#[derive(Debug, Serialize)]
struct SuccessEnvelope<T> {
    success: bool,
    message: &'static str,
    data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    /// 200 OK with message and data
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message,
            data,
        }
    }

    /// 201 Created with message and data
    pub fn created(message: &'static str, data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            message,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let body = SuccessEnvelope {
            success: true,
            message: self.message,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Success envelope with no data payload (deletions)
pub struct ApiMessage(pub &'static str);

#[derive(Debug, Serialize)]
struct MessageEnvelope {
    success: bool,
    message: &'static str,
}

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        Json(MessageEnvelope {
            success: true,
            message: self.0,
        })
        .into_response()
    }
}
