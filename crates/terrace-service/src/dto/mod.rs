//! Data transfer objects for the REST API

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateCommentRequest, ToggleReactionRequest};
pub use responses::{
    ActivityFeedResponse, ActivityResponse, CommentListResponse, CommentResponse,
    GroupedReactionsResponse, HealthResponse, LeaderboardEntryResponse, LeaderboardResponse,
    PaginationMeta, ReactionResponse, ReadinessResponse, TargetReactionsResponse,
    ToggleReactionResponse, UserProfileResponse, UserResponse,
};
