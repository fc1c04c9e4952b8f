//! Reaction service
//!
//! The toggle operation: add, remove, or swap a user's reaction on a target
//! while the repository keeps the denormalized comment counters in sync
//! inside one transaction.

use serde_json::json;
use terrace_cache::{EngagementChannel, EngagementEvent};
use terrace_core::entities::ActivityEntry;
use terrace_core::traits::ToggleOutcome;
use terrace_core::{
    ActivityTargetKind, ActivityType, DomainError, ReactionKind, Snowflake, TargetType,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    GroupedReactionsResponse, ReactionResponse, TargetReactionsResponse, ToggleReactionRequest,
    ToggleReactionResponse,
};
use crate::dto::mappers::{index_users, reaction_with_user};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction on a target.
    ///
    /// State machine over the caller's existing reaction:
    /// - same kind present: remove it
    /// - different kind present: swap to the requested kind
    /// - none: add the requested kind
    ///
    /// On add, one `reaction_added` ledger entry (1 point) and one pub/sub
    /// event are emitted best-effort. Removal emits nothing.
    #[instrument(skip(self, request))]
    pub async fn toggle(
        &self,
        user_id: Snowflake,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ToggleReactionResponse> {
        let (target_type, target_id) =
            parse_target(&request.target_type, &request.target_id)?;
        let kind = ReactionKind::parse(&request.kind).map_err(ServiceError::from)?;

        // Caller must reference an existing user; the target may be orphaned
        self.ensure_user_exists(user_id).await?;

        let outcome = self.toggle_with_retry(user_id, target_type, target_id, kind).await?;

        info!(
            user_id = %user_id,
            target_type = %target_type,
            target_id = %target_id,
            kind = %kind,
            added = outcome.added,
            "Reaction toggled"
        );

        if outcome.added {
            self.record_reaction_added(user_id, target_type, target_id, kind)
                .await;
            self.publish_toggle(user_id, target_type, target_id, kind, true)
                .await;
        }

        let counts = self
            .ctx
            .reaction_repo()
            .count_by_kind(target_type, target_id)
            .await?;

        Ok(ToggleReactionResponse {
            added: outcome.added,
            reaction: outcome.reaction.as_ref().map(ReactionResponse::from),
            counts,
        })
    }

    /// All reactions for a target, grouped by kind with counts and total
    #[instrument(skip(self))]
    pub async fn get_reactions(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> ServiceResult<TargetReactionsResponse> {
        let (target_type, target_id) = parse_target(target_type, target_id)?;

        let reactions = self
            .ctx
            .reaction_repo()
            .find_by_target(target_type, target_id)
            .await?;

        let mut user_ids: Vec<Snowflake> = reactions.iter().map(|r| r.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = index_users(self.ctx.user_repo().find_by_ids(&user_ids).await?);

        let mut grouped = GroupedReactionsResponse::default();
        for reaction in &reactions {
            let response = reaction_with_user(&users, reaction);
            match reaction.kind {
                ReactionKind::Like => grouped.like.push(response),
                ReactionKind::Fire => grouped.fire.push(response),
                ReactionKind::Suspicious => grouped.suspicious.push(response),
                ReactionKind::Funny => grouped.funny.push(response),
            }
        }

        let counts = self
            .ctx
            .reaction_repo()
            .count_by_kind(target_type, target_id)
            .await?;

        Ok(TargetReactionsResponse {
            reactions: grouped,
            counts,
            total: reactions.len() as i64,
        })
    }

    /// The caller's own reaction on a target, if any
    #[instrument(skip(self))]
    pub async fn get_user_reaction(
        &self,
        user_id: Snowflake,
        target_type: &str,
        target_id: &str,
    ) -> ServiceResult<Option<ReactionResponse>> {
        let (target_type, target_id) = parse_target(target_type, target_id)?;

        let reaction = self
            .ctx
            .reaction_repo()
            .find_for_user(user_id, target_type, target_id)
            .await?;

        Ok(reaction.as_ref().map(ReactionResponse::from))
    }

    /// Run the atomic toggle, retrying once when a concurrent toggle wins
    /// the race on the (user, target) unique index.
    async fn toggle_with_retry(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        for attempt in 0..2 {
            let result = self
                .ctx
                .reaction_repo()
                .toggle(self.ctx.generate_id(), user_id, target_type, target_id, kind)
                .await;

            match result {
                Err(DomainError::ReactionConflict) if attempt == 0 => {
                    warn!(
                        user_id = %user_id,
                        target_id = %target_id,
                        "Reaction toggle lost a race, retrying"
                    );
                }
                other => return other.map_err(ServiceError::from),
            }
        }

        Err(ServiceError::from(DomainError::ReactionConflict))
    }

    async fn ensure_user_exists(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;
        Ok(())
    }

    /// Best-effort ledger entry for an added reaction (1 point)
    async fn record_reaction_added(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) {
        let entry = ActivityEntry::new(
            self.ctx.generate_id(),
            user_id,
            ActivityType::ReactionAdded,
            format!("واکنش {} اضافه شد", kind.label_fa()),
        )
        .with_target(ActivityTargetKind::from(target_type), target_id)
        .with_metadata(json!({ "reactionType": kind.as_str() }))
        .with_points(1);

        ActivityService::new(self.ctx).record(entry).await;
    }

    /// Best-effort pub/sub event for live reaction bars
    async fn publish_toggle(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
        added: bool,
    ) {
        let event = EngagementEvent::new(
            "REACTION_TOGGLE",
            json!({
                "userId": user_id.to_string(),
                "targetType": target_type.as_str(),
                "targetId": target_id.to_string(),
                "type": kind.as_str(),
                "added": added,
            }),
        );

        if let Err(e) = self
            .ctx
            .publisher()
            .publish(&EngagementChannel::feed(), &event)
            .await
        {
            warn!(error = %e, "Failed to publish reaction event");
        }
    }
}

/// Parse the raw (targetType, targetId) pair from the wire
fn parse_target(target_type: &str, target_id: &str) -> ServiceResult<(TargetType, Snowflake)> {
    let target_type = TargetType::parse(target_type).map_err(ServiceError::from)?;
    let target_id = target_id
        .parse::<Snowflake>()
        .map_err(|_| ServiceError::validation("Invalid targetId format"))?;
    Ok((target_type, target_id))
}
