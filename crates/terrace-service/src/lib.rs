//! # terrace-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    ActivityFeedResponse, ActivityResponse, CommentListResponse, CommentResponse,
    CreateCommentRequest, GroupedReactionsResponse, HealthResponse, LeaderboardEntryResponse,
    LeaderboardResponse, PaginationMeta, ReactionResponse, ReadinessResponse,
    TargetReactionsResponse, ToggleReactionRequest, ToggleReactionResponse, UserProfileResponse,
    UserResponse,
};
pub use services::{
    ActivityService, CommentService, ReactionService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
