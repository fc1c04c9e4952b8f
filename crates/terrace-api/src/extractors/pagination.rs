//! Pagination extractor
//!
//! Extracts page/limit pagination parameters from query strings, matching
//! the page-number style the frontend uses.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 20;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated page/limit pagination
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    /// 1-based page number
    pub page: i64,
    /// Page size, clamped to 1-100
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<PageParams> for PageQuery {
    fn from(params: PageParams) -> Self {
        Self {
            page: params.page.unwrap_or(1).max(1),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.to_string()))?;

        Ok(PageQuery::from(params))
    }
}
