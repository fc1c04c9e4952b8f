//! Service-level tests with in-memory repositories
//!
//! These exercise the toggle state machine, mention handling, ownership
//! rules, and activity side effects without a database. The pools in the
//! context are lazy and never connected; event publishing fails quietly,
//! which is exactly the best-effort behavior the services promise.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use terrace_cache::{RedisPool, RedisPoolConfig};
use terrace_common::auth::JwtService;
use terrace_core::entities::{ActivityEntry, Comment, Reaction, User};
use terrace_core::traits::{
    ActivityQuery, ActivityRepository, CommentQuery, CommentRepository, PointsTotal,
    ReactionRepository, RepoResult, ToggleOutcome, UserRepository,
};
use terrace_core::value_objects::{
    ActivityType, EntityType, ReactionCounts, ReactionKind, Snowflake, TargetType,
};
use terrace_core::SnowflakeGenerator;
use terrace_service::{
    CommentService, CreateCommentRequest, ReactionService, ServiceContext, ServiceContextBuilder,
    ToggleReactionRequest,
};

// ============================================================================
// In-memory store shared by the mock repositories
// ============================================================================

#[derive(Default)]
struct Store {
    users: Mutex<Vec<User>>,
    comments: Mutex<Vec<Comment>>,
    reactions: Mutex<Vec<Reaction>>,
    activities: Mutex<Vec<ActivityEntry>>,
}

impl Store {
    fn adjust_counter(&self, target_id: Snowflake, kind: ReactionKind, delta: i32) {
        let mut comments = self.comments.lock().unwrap();
        if let Some(comment) = comments.iter_mut().find(|c| c.id == target_id) {
            comment.reaction_counts.apply(kind, delta);
        }
    }

    fn activities_of_type(&self, activity_type: ActivityType) -> Vec<ActivityEntry> {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.activity_type == activity_type)
            .cloned()
            .collect()
    }
}

struct MockUserRepository(Arc<Store>);

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.0.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_usernames(&self, usernames: &[String]) -> RepoResult<Vec<User>> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| usernames.contains(&u.username))
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.0.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, _user: &User) -> RepoResult<()> {
        Ok(())
    }
}

struct MockCommentRepository(Arc<Store>);

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self
            .0
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Snowflake,
        query: CommentQuery,
    ) -> RepoResult<Vec<Comment>> {
        let mut matching: Vec<Comment> = self
            .0
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.entity_type == entity_type && c.entity_id == entity_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Snowflake,
    ) -> RepoResult<i64> {
        Ok(self
            .0
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.entity_type == entity_type && c.entity_id == entity_id)
            .count() as i64)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.0.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn delete_with_reactions(&self, id: Snowflake) -> RepoResult<()> {
        self.0
            .reactions
            .lock()
            .unwrap()
            .retain(|r| !(r.target_type == TargetType::Comment && r.target_id == id));
        self.0.comments.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

struct MockReactionRepository(Arc<Store>);

#[async_trait]
impl ReactionRepository for MockReactionRepository {
    async fn toggle(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<ToggleOutcome> {
        let existing: Vec<Reaction> = {
            let reactions = self.0.reactions.lock().unwrap();
            reactions
                .iter()
                .filter(|r| r.user_id == user_id && r.targets(target_type, target_id))
                .cloned()
                .collect()
        };

        let had_same_kind = existing.iter().any(|r| r.kind == kind);

        self.0
            .reactions
            .lock()
            .unwrap()
            .retain(|r| !(r.user_id == user_id && r.targets(target_type, target_id)));
        if target_type.has_denormalized_counts() {
            for removed in &existing {
                self.0.adjust_counter(target_id, removed.kind, -1);
            }
        }

        if had_same_kind {
            return Ok(ToggleOutcome {
                added: false,
                reaction: None,
                removed_kind: Some(kind),
            });
        }

        let reaction = Reaction::new(id, user_id, target_type, target_id, kind);
        self.0.reactions.lock().unwrap().push(reaction.clone());
        if target_type.has_denormalized_counts() {
            self.0.adjust_counter(target_id, kind, 1);
        }

        Ok(ToggleOutcome {
            added: true,
            reaction: Some(reaction),
            removed_kind: existing.first().map(|r| r.kind),
        })
    }

    async fn find_for_user(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .0
            .reactions
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.targets(target_type, target_id))
            .cloned())
    }

    async fn find_by_target(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .0
            .reactions
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.targets(target_type, target_id))
            .cloned()
            .collect())
    }

    async fn count_by_kind(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<ReactionCounts> {
        let mut counts = ReactionCounts::default();
        for reaction in self.0.reactions.lock().unwrap().iter() {
            if reaction.targets(target_type, target_id) {
                counts.apply(reaction.kind, 1);
            }
        }
        Ok(counts)
    }
}

struct MockActivityRepository(Arc<Store>);

#[async_trait]
impl ActivityRepository for MockActivityRepository {
    async fn append(&self, entry: &ActivityEntry) -> RepoResult<()> {
        self.0.activities.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_recent(&self, query: ActivityQuery) -> RepoResult<Vec<ActivityEntry>> {
        let mut entries: Vec<ActivityEntry> = self
            .0
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| query.activity_type.is_none_or(|t| e.activity_type == t))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries.into_iter().take(query.limit.max(1) as usize).collect())
    }

    async fn count(&self, activity_type: Option<ActivityType>) -> RepoResult<i64> {
        Ok(self
            .0
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| activity_type.is_none_or(|t| e.activity_type == t))
            .count() as i64)
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
        _query: ActivityQuery,
    ) -> RepoResult<Vec<ActivityEntry>> {
        Ok(self
            .0
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .0
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .count() as i64)
    }

    async fn sum_points(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .0
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| i64::from(e.points_earned))
            .sum())
    }

    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<PointsTotal>> {
        let mut totals: HashMap<Snowflake, i64> = HashMap::new();
        for entry in self.0.activities.lock().unwrap().iter() {
            *totals.entry(entry.user_id).or_default() += i64::from(entry.points_earned);
        }
        let mut totals: Vec<PointsTotal> = totals
            .into_iter()
            .map(|(user_id, points)| PointsTotal { user_id, points })
            .collect();
        totals.sort_by(|a, b| b.points.cmp(&a.points));
        totals.truncate(limit as usize);
        Ok(totals)
    }
}

// ============================================================================
// Fixture
// ============================================================================

fn test_context(store: Arc<Store>) -> ServiceContext {
    // Lazy pools: never connected, the mocks intercept all data access
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unused")
        .expect("lazy pool");
    let redis_pool = Arc::new(RedisPool::new(RedisPoolConfig::default()).expect("lazy redis"));

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(redis_pool)
        .user_repo(Arc::new(MockUserRepository(Arc::clone(&store))))
        .comment_repo(Arc::new(MockCommentRepository(Arc::clone(&store))))
        .reaction_repo(Arc::new(MockReactionRepository(Arc::clone(&store))))
        .activity_repo(Arc::new(MockActivityRepository(Arc::clone(&store))))
        .jwt_service(Arc::new(JwtService::new("test-secret", 900)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .expect("context")
}

fn seed_user(store: &Store, id: i64, username: &str) -> User {
    let user = User::new(Snowflake::new(id), username.to_string());
    store.users.lock().unwrap().push(user.clone());
    user
}

fn seed_comment(store: &Store, id: i64, author: &User) -> Comment {
    let comment = Comment::new(
        Snowflake::new(id),
        author.id,
        EntityType::Player,
        Snowflake::new(9000),
        "گل تماشایی بود".to_string(),
    );
    store.comments.lock().unwrap().push(comment.clone());
    comment
}

fn toggle_request(target_id: Snowflake, kind: &str) -> ToggleReactionRequest {
    ToggleReactionRequest {
        target_type: "comment".to_string(),
        target_id: target_id.to_string(),
        kind: kind.to_string(),
    }
}

// ============================================================================
// Reaction toggle
// ============================================================================

#[tokio::test]
async fn toggle_twice_is_an_idempotent_pair() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user = seed_user(&store, 1, "reza");
    let comment = seed_comment(&store, 100, &user);

    let service = ReactionService::new(&ctx);

    let first = service
        .toggle(user.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();
    assert!(first.added);
    assert_eq!(first.counts.like, 1);
    assert_eq!(first.reaction.unwrap().kind, "like");

    let second = service
        .toggle(user.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();
    assert!(!second.added);
    assert!(second.reaction.is_none());
    assert_eq!(second.counts.like, 0);

    // Counter back to original value, no live rows
    let stored = store.comments.lock().unwrap()[0].clone();
    assert_eq!(stored.reaction_counts.like, 0);
    assert!(store.reactions.lock().unwrap().is_empty());

    // Only the add earned a ledger entry; removal logs nothing
    let added = store.activities_of_type(ActivityType::ReactionAdded);
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].points_earned, 1);
}

#[tokio::test]
async fn toggle_different_kind_swaps_and_nets_counters() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user = seed_user(&store, 1, "reza");
    let comment = seed_comment(&store, 100, &user);

    let service = ReactionService::new(&ctx);

    service
        .toggle(user.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();
    let swapped = service
        .toggle(user.id, toggle_request(comment.id, "fire"))
        .await
        .unwrap();

    assert!(swapped.added);
    assert_eq!(swapped.counts.like, 0);
    assert_eq!(swapped.counts.fire, 1);

    // Exactly one live reaction, the new kind
    let reactions = store.reactions.lock().unwrap().clone();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].kind, ReactionKind::Fire);

    // Both adds logged (remove side of the swap logs nothing)
    assert_eq!(store.activities_of_type(ActivityType::ReactionAdded).len(), 2);
}

#[tokio::test]
async fn toggle_cleans_up_duplicate_rows_seeded_out_of_band() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user = seed_user(&store, 1, "reza");
    let comment = seed_comment(&store, 100, &user);

    // Two kinds for the same (user, target), impossible through the API
    store.reactions.lock().unwrap().push(Reaction::new(
        Snowflake::new(501),
        user.id,
        TargetType::Comment,
        comment.id,
        ReactionKind::Like,
    ));
    store.reactions.lock().unwrap().push(Reaction::new(
        Snowflake::new(502),
        user.id,
        TargetType::Comment,
        comment.id,
        ReactionKind::Fire,
    ));

    let service = ReactionService::new(&ctx);
    let outcome = service
        .toggle(user.id, toggle_request(comment.id, "funny"))
        .await
        .unwrap();

    assert!(outcome.added);
    let reactions = store.reactions.lock().unwrap().clone();
    assert_eq!(reactions.len(), 1, "next toggle resolves to a single reaction");
    assert_eq!(reactions[0].kind, ReactionKind::Funny);
}

#[tokio::test]
async fn toggle_rejects_invalid_input_before_touching_storage() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user = seed_user(&store, 1, "reza");

    let service = ReactionService::new(&ctx);

    let bad_kind = ToggleReactionRequest {
        target_type: "comment".to_string(),
        target_id: "100".to_string(),
        kind: "angry".to_string(),
    };
    assert!(service.toggle(user.id, bad_kind).await.is_err());

    let bad_target = ToggleReactionRequest {
        target_type: "club".to_string(),
        target_id: "100".to_string(),
        kind: "like".to_string(),
    };
    assert!(service.toggle(user.id, bad_target).await.is_err());

    assert!(store.reactions.lock().unwrap().is_empty());
    assert!(store.activities.lock().unwrap().is_empty());
}

#[tokio::test]
async fn toggle_requires_existing_user() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));

    let service = ReactionService::new(&ctx);
    let result = service
        .toggle(Snowflake::new(404), toggle_request(Snowflake::new(100), "like"))
        .await;

    assert!(result.is_err());
    assert!(store.reactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_reactions_groups_by_kind() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let reza = seed_user(&store, 1, "reza");
    let sara = seed_user(&store, 2, "sara");
    let comment = seed_comment(&store, 100, &reza);

    let service = ReactionService::new(&ctx);
    service
        .toggle(reza.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();
    service
        .toggle(sara.id, toggle_request(comment.id, "fire"))
        .await
        .unwrap();

    let listing = service
        .get_reactions("comment", &comment.id.to_string())
        .await
        .unwrap();

    assert_eq!(listing.total, 2);
    assert_eq!(listing.reactions.like.len(), 1);
    assert_eq!(listing.reactions.fire.len(), 1);
    assert!(listing.reactions.suspicious.is_empty());
    assert_eq!(listing.reactions.like[0].user.username, "reza");
    assert_eq!(listing.counts.like, 1);
    assert_eq!(listing.counts.fire, 1);
}

// ============================================================================
// Comments
// ============================================================================

fn comment_request(content: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        entity_type: "player".to_string(),
        entity_id: "9000".to_string(),
        content: content.to_string(),
        parent_id: None,
    }
}

#[tokio::test]
async fn create_comment_deduplicates_mentions_and_logs_each_once() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");
    let alice = seed_user(&store, 2, "alice");
    let bob = seed_user(&store, 3, "bob");

    let service = CommentService::new(&ctx);
    let response = service
        .create_comment(author.id, comment_request("@alice @bob @alice look at this"))
        .await
        .unwrap();

    // Alice and Bob exactly once each
    assert_eq!(response.mentions.len(), 2);
    let names: Vec<&str> = response.mentions.iter().map(|m| m.username.as_str()).collect();
    assert!(names.contains(&"alice"));
    assert!(names.contains(&"bob"));

    // Exactly 2 user_mentioned entries, attributed to the mentioned users,
    // earning no points
    let mentions = store.activities_of_type(ActivityType::UserMentioned);
    assert_eq!(mentions.len(), 2);
    let mentioned: Vec<Snowflake> = mentions.iter().map(|e| e.user_id).collect();
    assert!(mentioned.contains(&alice.id));
    assert!(mentioned.contains(&bob.id));
    assert!(mentions.iter().all(|e| e.points_earned == 0));

    // One comment_created entry for the author, 5 points
    let created = store.activities_of_type(ActivityType::CommentCreated);
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id, author.id);
    assert_eq!(created[0].points_earned, 5);
}

#[tokio::test]
async fn create_comment_skips_self_mention_notification() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");
    seed_user(&store, 2, "bob");

    let service = CommentService::new(&ctx);
    service
        .create_comment(author.id, comment_request("@author and @bob"))
        .await
        .unwrap();

    let mentions = store.activities_of_type(ActivityType::UserMentioned);
    assert_eq!(mentions.len(), 1, "self-mention produces no notification");
    assert_ne!(mentions[0].user_id, author.id);
}

#[tokio::test]
async fn create_comment_drops_unknown_usernames_silently() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");

    let service = CommentService::new(&ctx);
    let response = service
        .create_comment(author.id, comment_request("@ghost does not exist"))
        .await
        .unwrap();

    assert!(response.mentions.is_empty());
    assert!(store.activities_of_type(ActivityType::UserMentioned).is_empty());
}

#[tokio::test]
async fn create_comment_validates_content() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");

    let service = CommentService::new(&ctx);

    assert!(service
        .create_comment(author.id, comment_request("   "))
        .await
        .is_err());
    assert!(service
        .create_comment(author.id, comment_request(&"x".repeat(501)))
        .await
        .is_err());
    assert!(service
        .create_comment(
            author.id,
            CreateCommentRequest {
                entity_type: "club".to_string(),
                entity_id: "9000".to_string(),
                content: "hi".to_string(),
                parent_id: None,
            },
        )
        .await
        .is_err());

    assert!(store.comments.lock().unwrap().is_empty());
    assert!(store.activities.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_comment_validates_parent_entity() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");
    let parent = seed_comment(&store, 100, &author);

    let service = CommentService::new(&ctx);

    // Parent on a different entity is rejected
    let mismatched = CreateCommentRequest {
        entity_type: "rumor".to_string(),
        entity_id: "1234".to_string(),
        content: "reply".to_string(),
        parent_id: Some(parent.id.to_string()),
    };
    assert!(service.create_comment(author.id, mismatched).await.is_err());

    // Matching parent is accepted
    let reply = CreateCommentRequest {
        entity_type: "player".to_string(),
        entity_id: "9000".to_string(),
        content: "reply".to_string(),
        parent_id: Some(parent.id.to_string()),
    };
    let response = service.create_comment(author.id, reply).await.unwrap();
    assert_eq!(response.parent_id, Some(parent.id));
}

#[tokio::test]
async fn delete_comment_requires_ownership() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");
    let intruder = seed_user(&store, 2, "intruder");
    let comment = seed_comment(&store, 100, &author);

    let reaction_service = ReactionService::new(&ctx);
    reaction_service
        .toggle(intruder.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();

    let service = CommentService::new(&ctx);
    let result = service.delete_comment(comment.id, intruder.id).await;
    assert!(result.is_err());

    // Comment and reactions untouched
    assert_eq!(store.comments.lock().unwrap().len(), 1);
    assert_eq!(store.reactions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_comment_cascades_reactions_and_keeps_ledger() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");
    let fan = seed_user(&store, 2, "fan");
    let comment = seed_comment(&store, 100, &author);

    let reaction_service = ReactionService::new(&ctx);
    reaction_service
        .toggle(fan.id, toggle_request(comment.id, "fire"))
        .await
        .unwrap();

    let service = CommentService::new(&ctx);
    service.delete_comment(comment.id, author.id).await.unwrap();

    assert!(store.comments.lock().unwrap().is_empty());
    assert!(store.reactions.lock().unwrap().is_empty());

    // Ledger entries survive as orphaned history
    assert_eq!(store.activities_of_type(ActivityType::ReactionAdded).len(), 1);
}

#[tokio::test]
async fn delete_missing_comment_is_not_found() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user = seed_user(&store, 1, "author");

    let service = CommentService::new(&ctx);
    assert!(service
        .delete_comment(Snowflake::new(404), user.id)
        .await
        .is_err());
}

#[tokio::test]
async fn get_comments_paginates_newest_first() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let author = seed_user(&store, 1, "author");

    let service = CommentService::new(&ctx);
    for i in 0..3 {
        service
            .create_comment(author.id, comment_request(&format!("comment {i}")))
            .await
            .unwrap();
    }

    let listing = service
        .get_comments("player", "9000", Some(1), Some(2))
        .await
        .unwrap();

    assert_eq!(listing.comments.len(), 2);
    assert_eq!(listing.pagination.total, 3);
    assert_eq!(listing.pagination.pages, 2);
    assert_eq!(listing.comments[0].content, "comment 2");
    assert_eq!(listing.comments[0].user.username, "author");
}

#[tokio::test]
async fn full_scenario_counts_follow_toggles() {
    let store = Arc::new(Store::default());
    let ctx = test_context(Arc::clone(&store));
    let user_a = seed_user(&store, 1, "a");
    let user_b = seed_user(&store, 2, "b");
    let author = seed_user(&store, 3, "author");
    let comment = seed_comment(&store, 100, &author);

    let service = ReactionService::new(&ctx);

    // A likes, B fires, A un-likes
    service
        .toggle(user_a.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();
    service
        .toggle(user_b.id, toggle_request(comment.id, "fire"))
        .await
        .unwrap();
    service
        .toggle(user_a.id, toggle_request(comment.id, "like"))
        .await
        .unwrap();

    // Comment listing shows {like: 0, fire: 1, suspicious: 0, funny: 0}
    let comments = CommentService::new(&ctx)
        .get_comments("player", "9000", None, None)
        .await
        .unwrap();
    let counts = comments.comments[0].reaction_counts;
    assert_eq!(counts.like, 0);
    assert_eq!(counts.fire, 1);
    assert_eq!(counts.suspicious, 0);
    assert_eq!(counts.funny, 0);
}
