//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({"targetType": "player", "targetId": "1", "type": "like"});

    let response = server.post("/api/reactions/toggle", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_toggle_add_then_remove() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&user).unwrap();
    let player_id = fixtures::unique_entity_id();

    let body = json!({"targetType": "player", "targetId": player_id, "type": "fire"});

    // Add
    let response = server
        .post_auth("/api/reactions/toggle", &token, &body)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["message"], "واکنش اضافه شد");
    assert_eq!(envelope["data"]["added"], true);
    assert_eq!(envelope["data"]["reaction"]["type"], "fire");
    assert_eq!(envelope["data"]["counts"]["fire"], 1);

    // Remove (same kind toggles off)
    let response = server
        .post_auth("/api/reactions/toggle", &token, &body)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "واکنش حذف شد");
    assert_eq!(envelope["data"]["added"], false);
    assert!(envelope["data"]["reaction"].is_null());
    assert_eq!(envelope["data"]["counts"]["fire"], 0);
}

#[tokio::test]
async fn test_toggle_swaps_kind() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&user).unwrap();
    let rumor_id = fixtures::unique_entity_id();

    let like = json!({"targetType": "rumor", "targetId": rumor_id, "type": "like"});
    let suspicious = json!({"targetType": "rumor", "targetId": rumor_id, "type": "suspicious"});

    server
        .post_auth("/api/reactions/toggle", &token, &like)
        .await
        .unwrap();
    let response = server
        .post_auth("/api/reactions/toggle", &token, &suspicious)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(envelope["data"]["added"], true);
    assert_eq!(envelope["data"]["counts"]["like"], 0);
    assert_eq!(envelope["data"]["counts"]["suspicious"], 1);

    // The user endpoint reflects the single live reaction
    let response = server
        .get_auth(
            &format!("/api/reactions/user?targetType=rumor&targetId={rumor_id}"),
            &token,
        )
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["data"]["reaction"]["type"], "suspicious");
}

#[tokio::test]
async fn test_toggle_rejects_unknown_kind() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&user).unwrap();

    let body = json!({"targetType": "player", "targetId": "1", "type": "angry"});
    let response = server
        .post_auth("/api/reactions/toggle", &token, &body)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "نوع واکنش نامعتبر است");
}

#[tokio::test]
async fn test_get_reactions_requires_target_params() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/reactions?targetType=player").await.unwrap();
    let envelope: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "targetType و targetId الزامی است");
}

#[tokio::test]
async fn test_get_reactions_groups_and_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let reza = fixtures::seed_user(&pool).await.unwrap();
    let sara = fixtures::seed_user(&pool).await.unwrap();
    let player_id = fixtures::unique_entity_id();

    for (user, kind) in [(&reza, "like"), (&sara, "funny")] {
        let token = fixtures::token_for(user).unwrap();
        let body = json!({"targetType": "player", "targetId": player_id, "type": kind});
        server
            .post_auth("/api/reactions/toggle", &token, &body)
            .await
            .unwrap();
    }

    let response = server
        .get(&format!(
            "/api/reactions?targetType=player&targetId={player_id}"
        ))
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let data = &envelope["data"];
    assert_eq!(data["total"], 2);
    assert_eq!(data["counts"]["like"], 1);
    assert_eq!(data["counts"]["funny"], 1);
    assert_eq!(data["reactions"]["like"].as_array().unwrap().len(), 1);
    assert_eq!(data["reactions"]["funny"].as_array().unwrap().len(), 1);
    assert!(data["reactions"]["fire"].as_array().unwrap().is_empty());
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle_with_reaction_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let author = fixtures::seed_user(&pool).await.unwrap();
    let fan_a = fixtures::seed_user(&pool).await.unwrap();
    let fan_b = fixtures::seed_user(&pool).await.unwrap();
    let author_token = fixtures::token_for(&author).unwrap();
    let entity_id = fixtures::unique_entity_id();

    // Create a comment
    let body = json!({
        "entityType": "player",
        "entityId": entity_id,
        "content": "عجب بازیکنی!"
    });
    let response = server
        .post_auth("/api/comments", &author_token, &body)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(envelope["message"], "نظر با موفقیت ثبت شد");
    let comment_id = envelope["data"]["comment"]["id"].as_str().unwrap().to_string();

    // A likes, B fires, A un-likes
    for (user, kind) in [(&fan_a, "like"), (&fan_b, "fire"), (&fan_a, "like")] {
        let token = fixtures::token_for(user).unwrap();
        let body = json!({"targetType": "comment", "targetId": comment_id, "type": kind});
        server
            .post_auth("/api/reactions/toggle", &token, &body)
            .await
            .unwrap();
    }

    // Listing shows {like: 0, fire: 1, suspicious: 0, funny: 0}
    let response = server
        .get(&format!(
            "/api/comments?entityType=player&entityId={entity_id}"
        ))
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let comment = &envelope["data"]["comments"][0];
    assert_eq!(comment["reactionCounts"]["like"], 0);
    assert_eq!(comment["reactionCounts"]["fire"], 1);
    assert_eq!(comment["reactionCounts"]["suspicious"], 0);
    assert_eq!(comment["reactionCounts"]["funny"], 0);
    assert_eq!(envelope["data"]["pagination"]["total"], 1);

    // Delete cascades reactions
    let response = server
        .delete_auth(&format!("/api/comments/{comment_id}"), &author_token)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["message"], "نظر با موفقیت حذف شد");

    let response = server
        .get(&format!(
            "/api/reactions?targetType=comment&targetId={comment_id}"
        ))
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["data"]["total"], 0);
    assert_eq!(envelope["data"]["counts"]["fire"], 0);
}

#[tokio::test]
async fn test_comment_mentions_deduplicated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let author = fixtures::seed_user(&pool).await.unwrap();
    let alice = fixtures::seed_user(&pool).await.unwrap();
    let bob = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&author).unwrap();

    let content = format!(
        "@{a} @{b} @{a} دیدید؟",
        a = alice.username,
        b = bob.username
    );
    let body = json!({
        "entityType": "rumor",
        "entityId": fixtures::unique_entity_id(),
        "content": content
    });

    let response = server.post_auth("/api/comments", &token, &body).await.unwrap();
    let envelope: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    let mentions = envelope["data"]["comment"]["mentions"].as_array().unwrap();
    assert_eq!(mentions.len(), 2, "each mentioned user appears exactly once");
}

#[tokio::test]
async fn test_comment_content_limit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let author = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&author).unwrap();

    let body = json!({
        "entityType": "player",
        "entityId": fixtures::unique_entity_id(),
        "content": "x".repeat(501)
    });

    let response = server.post_auth("/api/comments", &token, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_comment_requires_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let author = fixtures::seed_user(&pool).await.unwrap();
    let intruder = fixtures::seed_user(&pool).await.unwrap();
    let author_token = fixtures::token_for(&author).unwrap();
    let intruder_token = fixtures::token_for(&intruder).unwrap();
    let entity_id = fixtures::unique_entity_id();

    let body = json!({
        "entityType": "player",
        "entityId": entity_id,
        "content": "نظر من"
    });
    let response = server
        .post_auth("/api/comments", &author_token, &body)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let comment_id = envelope["data"]["comment"]["id"].as_str().unwrap().to_string();

    // Non-owner delete fails with the Persian ownership message
    let response = server
        .delete_auth(&format!("/api/comments/{comment_id}"), &intruder_token)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(envelope["message"], "شما اجازه حذف این نظر را ندارید");

    // Comment is still there
    let response = server
        .get(&format!(
            "/api/comments?entityType=player&entityId={entity_id}"
        ))
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["data"]["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_delete_missing_comment_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&user).unwrap();

    let response = server
        .delete_auth("/api/comments/999999999999", &token)
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(envelope["message"], "نظر پیدا نشد");
}

// ============================================================================
// Activity / Leaderboard / Users Tests
// ============================================================================

#[tokio::test]
async fn test_activity_feed_records_engagement() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();
    let token = fixtures::token_for(&user).unwrap();

    let body = json!({
        "entityType": "player",
        "entityId": fixtures::unique_entity_id(),
        "content": "اولین نظر من"
    });
    server.post_auth("/api/comments", &token, &body).await.unwrap();

    let response = server.get_auth("/api/activity/me", &token).await.unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let activities = envelope["data"]["activities"].as_array().unwrap();
    assert!(!activities.is_empty());
    assert_eq!(activities[0]["type"], "comment_created");
    assert_eq!(activities[0]["pointsEarned"], 5);
}

#[tokio::test]
async fn test_leaderboard_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/leaderboard?limit=5").await.unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["success"], true);
    assert!(envelope["data"]["leaders"].is_array());
}

#[tokio::test]
async fn test_user_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = fixtures::test_pool().await.unwrap();
    let user = fixtures::seed_user(&pool).await.unwrap();

    let response = server
        .get(&format!("/api/users/{}", user.username))
        .await
        .unwrap();
    let envelope: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(envelope["data"]["user"]["username"], user.username.as_str());

    let response = server.get("/api/users/no_such_fan_00").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
