//! PostgreSQL implementation of ActivityRepository
//!
//! The activity ledger is insert-only: there is no update or delete path, by
//! design. Points aggregation and the leaderboard read straight off it.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use terrace_core::entities::ActivityEntry;
use terrace_core::traits::{ActivityQuery, ActivityRepository, PointsTotal, RepoResult};
use terrace_core::value_objects::{ActivityType, Snowflake};

use crate::mappers::ActivityInsert;
use crate::models::{ActivityLogModel, PointsTotalModel};

use super::error::map_db_error;

const ACTIVITY_COLUMNS: &str =
    "id, user_id, activity_type, action, target_kind, target_id, metadata, points_earned, created_at";

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn page_bounds(query: &ActivityQuery) -> (i64, i64) {
        let limit = query.limit.clamp(1, 100);
        let page = query.page.max(1);
        (limit, (page - 1) * limit)
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self, entry))]
    async fn append(&self, entry: &ActivityEntry) -> RepoResult<()> {
        let insert = ActivityInsert::new(entry);

        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, user_id, activity_type, action, target_kind, target_id, metadata, points_earned, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.activity_type)
        .bind(insert.action)
        .bind(insert.target_kind)
        .bind(insert.target_id)
        .bind(insert.metadata)
        .bind(insert.points_earned)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_recent(&self, query: ActivityQuery) -> RepoResult<Vec<ActivityEntry>> {
        let (limit, offset) = Self::page_bounds(&query);

        let results = match query.activity_type {
            Some(activity_type) => {
                sqlx::query_as::<_, ActivityLogModel>(&format!(
                    r#"
                    SELECT {ACTIVITY_COLUMNS}
                    FROM activity_logs
                    WHERE activity_type = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2 OFFSET $3
                    "#
                ))
                .bind(activity_type.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ActivityLogModel>(&format!(
                    r#"
                    SELECT {ACTIVITY_COLUMNS}
                    FROM activity_logs
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1 OFFSET $2
                    "#
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, activity_type: Option<ActivityType>) -> RepoResult<i64> {
        let count = match activity_type {
            Some(activity_type) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM activity_logs WHERE activity_type = $1",
                )
                .bind(activity_type.as_str())
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_logs")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        query: ActivityQuery,
    ) -> RepoResult<Vec<ActivityEntry>> {
        let (limit, offset) = Self::page_bounds(&query);

        let results = sqlx::query_as::<_, ActivityLogModel>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS}
            FROM activity_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ActivityEntry::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_logs WHERE user_id = $1")
                .bind(user_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn sum_points(&self, user_id: Snowflake) -> RepoResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(points_earned), 0)::bigint
            FROM activity_logs
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<PointsTotal>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, PointsTotalModel>(
            r#"
            SELECT user_id, SUM(points_earned)::bigint AS points
            FROM activity_logs
            GROUP BY user_id
            ORDER BY points DESC, user_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|row| PointsTotal {
                user_id: Snowflake::new(row.user_id),
                points: row.points,
            })
            .collect())
    }
}
