//! PostgreSQL implementation of CommentRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use terrace_core::entities::Comment;
use terrace_core::traits::{CommentQuery, CommentRepository, RepoResult};
use terrace_core::value_objects::{EntityType, Snowflake};

use crate::mappers::CommentInsert;
use crate::models::{CommentMentionModel, CommentModel};

use super::error::{comment_not_found, map_db_error};

const COMMENT_COLUMNS: &str = "id, author_id, entity_type, entity_id, content, parent_id, \
     like_count, fire_count, suspicious_count, funny_count, created_at, updated_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch mention user ids for a batch of comments and stitch them in
    async fn attach_mentions(&self, comments: &mut [Comment]) -> RepoResult<()> {
        if comments.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = comments.iter().map(|c| c.id.into_inner()).collect();

        let rows = sqlx::query_as::<_, CommentMentionModel>(
            r#"
            SELECT comment_id, user_id
            FROM comment_mentions
            WHERE comment_id = ANY($1)
            ORDER BY user_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut by_comment: HashMap<i64, Vec<Snowflake>> = HashMap::new();
        for row in rows {
            by_comment
                .entry(row.comment_id)
                .or_default()
                .push(Snowflake::new(row.user_id));
        }

        for comment in comments.iter_mut() {
            if let Some(mentions) = by_comment.remove(&comment.id.into_inner()) {
                comment.mentions = mentions;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => {
                let mut comments = vec![Comment::from(model)];
                self.attach_mentions(&mut comments).await?;
                Ok(comments.pop())
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Snowflake,
        query: CommentQuery,
    ) -> RepoResult<Vec<Comment>> {
        let limit = query.limit.clamp(1, 100);

        let results = sqlx::query_as::<_, CommentModel>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(entity_type.as_str())
        .bind(entity_id.into_inner())
        .bind(limit)
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut comments: Vec<Comment> = results.into_iter().map(Comment::from).collect();
        self.attach_mentions(&mut comments).await?;

        Ok(comments)
    }

    #[instrument(skip(self))]
    async fn count_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: Snowflake,
    ) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comments WHERE entity_type = $1 AND entity_id = $2
            "#,
        )
        .bind(entity_type.as_str())
        .bind(entity_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO comments (id, author_id, entity_type, entity_id, content, parent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.entity_type)
        .bind(insert.entity_id)
        .bind(insert.content)
        .bind(insert.parent_id)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for mention in &comment.mentions {
            sqlx::query(
                r#"
                INSERT INTO comment_mentions (comment_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (comment_id, user_id) DO NOTHING
                "#,
            )
            .bind(insert.id)
            .bind(mention.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_with_reactions(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Reactions targeting this comment go first; activity entries that
        // reference it are history and stay untouched.
        sqlx::query(
            r#"
            DELETE FROM reactions WHERE target_type = 'comment' AND target_id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM comment_mentions WHERE comment_id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
