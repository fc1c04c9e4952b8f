//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{activity, comments, health, reactions, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate
/// middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(reaction_routes())
        .merge(comment_routes())
        .merge(activity_routes())
        .merge(user_routes())
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reactions/toggle", post(reactions::toggle_reaction))
        .route("/reactions", get(reactions::get_reactions))
        .route("/reactions/user", get(reactions::get_user_reaction))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route("/comments", get(comments::get_comments))
        .route("/comments/:id", delete(comments::delete_comment))
}

/// Activity feed and leaderboard routes
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", get(activity::get_feed))
        .route("/activity/me", get(activity::get_my_feed))
        .route("/leaderboard", get(activity::get_leaderboard))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:username", get(users::get_user_profile))
}
