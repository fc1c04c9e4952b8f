//! Test fixtures
//!
//! Seeds users straight through the repository layer (registration belongs
//! to the external auth service) and mints access tokens with the shared
//! test secret.

use anyhow::Result;
use terrace_common::JwtService;
use terrace_core::entities::User;
use terrace_core::traits::UserRepository;
use terrace_core::Snowflake;
use terrace_db::{create_pool_from_env, PgPool, PgUserRepository};

/// Generate a unique test Snowflake ID
pub fn test_snowflake() -> Snowflake {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicI64 = AtomicI64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    Snowflake::new((millis << 16) | (COUNTER.fetch_add(1, Ordering::SeqCst) & 0xFFFF))
}

/// Connect to the test database
pub async fn test_pool() -> Result<PgPool> {
    Ok(create_pool_from_env().await?)
}

/// Create and persist a test user with a unique username
pub async fn seed_user(pool: &PgPool) -> Result<User> {
    let id = test_snowflake();
    let user = User::new(id, format!("fan_{}", id.into_inner()));
    PgUserRepository::new(pool.clone()).create(&user).await?;
    Ok(user)
}

/// Mint an access token for a user with the test JWT secret
pub fn token_for(user: &User) -> Result<String> {
    let secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "integration-test-secret".to_string());
    let jwt = JwtService::new(&secret, 900);
    Ok(jwt.encode_access_token(user.id)?)
}

/// A unique player entity id for comment/reaction targets
pub fn unique_entity_id() -> String {
    test_snowflake().to_string()
}
