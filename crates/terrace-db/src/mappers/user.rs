//! User entity <-> model mapper

use terrace_core::entities::User;
use terrace_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            display_name: model.display_name,
            avatar: model.avatar,
            points: model.points,
            level: model.level,
            reputation: model.reputation,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub username: &'a str,
    pub display_name: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub points: i32,
    pub level: i32,
    pub reputation: i32,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: &user.username,
            display_name: user.display_name.as_deref(),
            avatar: user.avatar.as_deref(),
            points: user.points,
            level: user.level,
            reputation: user.reputation,
        }
    }
}
