//! Comment service
//!
//! Handles comment creation (with `@username` mention resolution), listing,
//! and owner-only deletion with reaction cascade.

use std::collections::HashMap;

use serde_json::json;
use terrace_cache::{EngagementChannel, EngagementEvent};
use terrace_core::entities::{ActivityEntry, Comment, User};
use terrace_core::traits::CommentQuery;
use terrace_core::{
    extract_mention_usernames, ActivityTargetKind, ActivityType, DomainError, EntityType,
    Snowflake,
};
use tracing::{info, instrument, warn};

use crate::dto::mappers::{comment_response, index_users};
use crate::dto::{CommentListResponse, CommentResponse, CreateCommentRequest, PaginationMeta};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum comment length in characters
const MAX_CONTENT_LEN: usize = 500;
/// Default page size for comment listings
const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment on a player or rumor.
    ///
    /// Content is trimmed and validated server-side regardless of client
    /// checks. `@username` tokens are deduplicated, resolved against the
    /// user store (unknown names silently dropped), and stored as mention
    /// references. Side effects, all best-effort: one `comment_created`
    /// ledger entry (5 points) for the author, one `user_mentioned` entry
    /// per mentioned user (no points, self-mentions skipped), and a pub/sub
    /// event for the entity page.
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let entity_type = EntityType::parse(&request.entity_type).map_err(ServiceError::from)?;
        let entity_id = request
            .entity_id
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("Invalid entityId format"))?;

        let content = request.content.trim().to_string();
        if content.is_empty() {
            return Err(ServiceError::from(DomainError::EmptyContent));
        }
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(ServiceError::from(DomainError::ContentTooLong {
                max: MAX_CONTENT_LEN,
            }));
        }

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;

        let parent_id = self
            .resolve_parent(&request.parent_id, entity_type, entity_id)
            .await?;

        // Resolve @username tokens; unknown usernames are dropped silently
        let usernames = extract_mention_usernames(&content);
        let mentioned_users = self.ctx.user_repo().find_by_usernames(&usernames).await?;

        let comment_id = self.ctx.generate_id();
        let mut comment = Comment::new(comment_id, author_id, entity_type, entity_id, content);
        comment.parent_id = parent_id;
        comment.mentions = mentioned_users.iter().map(|u| u.id).collect();

        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment_id,
            entity_type = %entity_type,
            entity_id = %entity_id,
            mentions = comment.mentions.len(),
            "Comment created"
        );

        self.record_comment_created(&comment).await;
        self.record_mentions(&author, &comment, &mentioned_users).await;
        self.publish_comment_create(&comment).await;

        let mut users: HashMap<Snowflake, User> = index_users(mentioned_users);
        users.insert(author.id, author);

        Ok(comment_response(&users, &comment))
    }

    /// List comments for an entity, newest first, with authors and mentions
    /// populated
    #[instrument(skip(self))]
    pub async fn get_comments(
        &self,
        entity_type: &str,
        entity_id: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> ServiceResult<CommentListResponse> {
        let entity_type = EntityType::parse(entity_type).map_err(ServiceError::from)?;
        let entity_id = entity_id
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("Invalid entityId format"))?;

        let query = CommentQuery {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, 100),
        };

        let comments = self
            .ctx
            .comment_repo()
            .find_by_entity(entity_type, entity_id, query)
            .await?;
        let total = self
            .ctx
            .comment_repo()
            .count_by_entity(entity_type, entity_id)
            .await?;

        let users = self.load_referenced_users(&comments).await?;
        let responses = comments
            .iter()
            .map(|c| comment_response(&users, c))
            .collect();

        Ok(CommentListResponse {
            comments: responses,
            pagination: PaginationMeta::new(query.page, query.limit, total),
        })
    }

    /// Delete a comment. Only the author may delete; all reactions targeting
    /// the comment are removed in the same transaction. Ledger entries that
    /// reference the comment remain as history.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::CommentNotFound(comment_id)))?;

        if !comment.is_owned_by(user_id) {
            return Err(ServiceError::from(DomainError::NotCommentAuthor));
        }

        self.ctx
            .comment_repo()
            .delete_with_reactions(comment_id)
            .await?;

        info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }

    /// Validate an optional parent reference: it must exist and belong to
    /// the same (entity_type, entity_id)
    async fn resolve_parent(
        &self,
        parent_id: &Option<String>,
        entity_type: EntityType,
        entity_id: Snowflake,
    ) -> ServiceResult<Option<Snowflake>> {
        let Some(raw) = parent_id else {
            return Ok(None);
        };

        let parent_id = raw
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("Invalid parentId format"))?;

        let parent = self
            .ctx
            .comment_repo()
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::CommentNotFound(parent_id)))?;

        if parent.entity_type != entity_type || parent.entity_id != entity_id {
            return Err(ServiceError::from(DomainError::ParentEntityMismatch));
        }

        Ok(Some(parent_id))
    }

    /// Best-effort `comment_created` ledger entry for the author (5 points)
    async fn record_comment_created(&self, comment: &Comment) {
        let entry = ActivityEntry::new(
            self.ctx.generate_id(),
            comment.author_id,
            ActivityType::CommentCreated,
            format!("نظر جدید در {}", comment.entity_type.label_fa()),
        )
        .with_target(
            ActivityTargetKind::from(comment.entity_type),
            comment.entity_id,
        )
        .with_metadata(json!({ "commentId": comment.id.to_string() }))
        .with_points(5);

        ActivityService::new(self.ctx).record(entry).await;
    }

    /// Best-effort `user_mentioned` entries, one per mentioned user.
    ///
    /// Entries are attributed to the *mentioned* user and earn no points;
    /// they are pure notification records. The author's own self-mention is
    /// skipped.
    async fn record_mentions(&self, author: &User, comment: &Comment, mentioned: &[User]) {
        let activity = ActivityService::new(self.ctx);

        for user in mentioned {
            if user.id == author.id {
                continue;
            }

            let entry = ActivityEntry::new(
                self.ctx.generate_id(),
                user.id,
                ActivityType::UserMentioned,
                format!("{} شما را منشن کرد", author.display_label()),
            )
            .with_target(ActivityTargetKind::Comment, comment.id)
            .with_metadata(json!({ "mentionedBy": author.id.to_string() }));

            activity.record(entry).await;
        }
    }

    /// Best-effort pub/sub event for the entity page and mentioned users
    async fn publish_comment_create(&self, comment: &Comment) {
        let event = EngagementEvent::new(
            "COMMENT_CREATE",
            json!({
                "commentId": comment.id.to_string(),
                "entityType": comment.entity_type.as_str(),
                "entityId": comment.entity_id.to_string(),
                "authorId": comment.author_id.to_string(),
            }),
        );

        let mut channels = vec![EngagementChannel::entity(
            comment.entity_type,
            comment.entity_id,
        )];
        channels.extend(comment.mentions.iter().map(|id| EngagementChannel::user(*id)));

        if let Err(e) = self.ctx.publisher().publish_many(&channels, &event).await {
            warn!(error = %e, "Failed to publish comment event");
        }
    }

    /// Batch-load every user referenced by a page of comments (authors and
    /// mentions)
    async fn load_referenced_users(
        &self,
        comments: &[Comment],
    ) -> ServiceResult<HashMap<Snowflake, User>> {
        let mut ids: Vec<Snowflake> = comments
            .iter()
            .flat_map(|c| std::iter::once(c.author_id).chain(c.mentions.iter().copied()))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(index_users(self.ctx.user_repo().find_by_ids(&ids).await?))
    }
}
