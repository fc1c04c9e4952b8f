//! User entity - a fan account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity representing a fan account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub points: i32,
    pub level: i32,
    pub reputation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            display_name: None,
            avatar: None,
            points: 0,
            level: 1,
            reputation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown in feeds and mention notifications: display name when set,
    /// username otherwise
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the avatar
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_falls_back_to_username() {
        let mut user = User::new(Snowflake::new(1), "alireza".to_string());
        assert_eq!(user.display_label(), "alireza");

        user.set_display_name(Some("علیرضا".to_string()));
        assert_eq!(user.display_label(), "علیرضا");
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(Snowflake::new(7), "sara".to_string());
        assert_eq!(user.points, 0);
        assert_eq!(user.level, 1);
        assert_eq!(user.reputation, 0);
        assert!(user.avatar.is_none());
    }
}
