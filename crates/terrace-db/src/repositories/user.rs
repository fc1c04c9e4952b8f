//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use terrace_core::entities::User;
use terrace_core::traits::{RepoResult, UserRepository};
use terrace_core::value_objects::Snowflake;
use terrace_core::DomainError;

use crate::mappers::UserInsert;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str =
    "id, username, display_name, avatar, points, level, reputation, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, usernames))]
    async fn find_by_usernames(&self, usernames: &[String]) -> RepoResult<Vec<User>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ANY($1)"
        ))
        .bind(usernames)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, ids))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        let insert = UserInsert::new(user);

        sqlx::query(
            r#"
            INSERT INTO users (id, username, display_name, avatar, points, level, reputation, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(insert.id)
        .bind(insert.username)
        .bind(insert.display_name)
        .bind(insert.avatar)
        .bind(insert.points)
        .bind(insert.level)
        .bind(insert.reputation)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET display_name = $2, avatar = $3, points = $4, level = $5, reputation = $6, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id.into_inner())
        .bind(user.display_name.as_deref())
        .bind(user.avatar.as_deref())
        .bind(user.points)
        .bind(user.level)
        .bind(user.reputation)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
