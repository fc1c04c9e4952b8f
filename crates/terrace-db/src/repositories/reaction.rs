//! PostgreSQL implementation of ReactionRepository
//!
//! The toggle runs as a single transaction: the user's existing rows for the
//! target are locked, the add/remove/swap decision is made, and the
//! denormalized comment counters are adjusted before commit. A concurrent
//! insert racing on the (user, target) unique index surfaces as
//! `DomainError::ReactionConflict`; the service layer retries once.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use terrace_core::entities::Reaction;
use terrace_core::traits::{ReactionRepository, RepoResult, ToggleOutcome};
use terrace_core::value_objects::{ReactionCounts, ReactionKind, Snowflake, TargetType};
use terrace_core::DomainError;

use crate::mappers::ReactionInsert;
use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation};

const REACTION_COLUMNS: &str = "id, user_id, target_type, target_id, kind, created_at";

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counter column for a reaction kind on the comments table
    fn counter_column(kind: ReactionKind) -> &'static str {
        match kind {
            ReactionKind::Like => "like_count",
            ReactionKind::Fire => "fire_count",
            ReactionKind::Suspicious => "suspicious_count",
            ReactionKind::Funny => "funny_count",
        }
    }

    /// Adjust one denormalized counter inside the toggle transaction.
    ///
    /// Only comment targets carry counters; for players and rumors this is a
    /// no-op, as is an update against a target id with no comment row
    /// (orphaned targets are tolerated). Decrements clamp at zero.
    async fn adjust_counter(
        tx: &mut Transaction<'_, Postgres>,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        if !target_type.has_denormalized_counts() {
            return Ok(());
        }

        let column = Self::counter_column(kind);
        let sql = format!(
            "UPDATE comments SET {column} = GREATEST({column} + $2, 0), updated_at = NOW() WHERE id = $1"
        );

        sqlx::query(&sql)
            .bind(target_id.into_inner())
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the user's existing rows for this target. The unique index
        // keeps this to at most one row; rows seeded out-of-band are all
        // picked up and resolved below.
        let existing = sqlx::query_as::<_, ReactionModel>(&format!(
            r#"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            FOR UPDATE
            "#
        ))
        .bind(user_id.into_inner())
        .bind(target_type.as_str())
        .bind(target_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let had_same_kind = existing.iter().any(|r| r.kind == kind.as_str());

        if !existing.is_empty() {
            sqlx::query(
                r#"
                DELETE FROM reactions
                WHERE user_id = $1 AND target_type = $2 AND target_id = $3
                "#,
            )
            .bind(user_id.into_inner())
            .bind(target_type.as_str())
            .bind(target_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            for row in &existing {
                let removed = ReactionKind::parse(&row.kind).unwrap_or(kind);
                Self::adjust_counter(&mut tx, target_type, target_id, removed, -1)
                    .await
                    .map_err(map_db_error)?;
            }
        }

        if had_same_kind {
            // Toggle off: same kind was already present
            tx.commit().await.map_err(map_db_error)?;
            return Ok(ToggleOutcome {
                added: false,
                reaction: None,
                removed_kind: Some(kind),
            });
        }

        // Add (or swap onto) the requested kind
        let reaction = Reaction::new(id, user_id, target_type, target_id, kind);
        let insert = ReactionInsert::new(&reaction);

        sqlx::query(
            r#"
            INSERT INTO reactions (id, user_id, target_type, target_id, kind, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.target_type)
        .bind(insert.target_id)
        .bind(insert.kind)
        .bind(reaction.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionConflict))?;

        Self::adjust_counter(&mut tx, target_type, target_id, kind, 1)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        let removed_kind = existing
            .first()
            .and_then(|r| ReactionKind::parse(&r.kind).ok());

        Ok(ToggleOutcome {
            added: true,
            reaction: Some(reaction),
            removed_kind,
        })
    }

    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(&format!(
            r#"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            "#
        ))
        .bind(user_id.into_inner())
        .bind(target_type.as_str())
        .bind(target_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_target(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(&format!(
            r#"
            SELECT {REACTION_COLUMNS}
            FROM reactions
            WHERE target_type = $1 AND target_id = $2
            ORDER BY created_at DESC
            "#
        ))
        .bind(target_type.as_str())
        .bind(target_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_kind(
        &self,
        target_type: TargetType,
        target_id: Snowflake,
    ) -> RepoResult<ReactionCounts> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT kind, COUNT(*) as count
            FROM reactions
            WHERE target_type = $1 AND target_id = $2
            GROUP BY kind
            "#,
        )
        .bind(target_type.as_str())
        .bind(target_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut counts = ReactionCounts::default();
        for row in results {
            if let Ok(kind) = ReactionKind::parse(&row.kind) {
                counts.apply(kind, row.count as i32);
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReactionRepository>();
    }

    #[test]
    fn test_counter_columns_cover_all_kinds() {
        for kind in ReactionKind::ALL {
            let column = PgReactionRepository::counter_column(kind);
            assert!(column.ends_with("_count"));
            assert!(column.starts_with(kind.as_str()));
        }
    }
}
