//! Entity to response DTO mappers

use std::collections::HashMap;

use terrace_core::entities::{ActivityEntry, Comment, Reaction, User};
use terrace_core::Snowflake;

use super::responses::{
    ActivityResponse, CommentResponse, ReactionResponse, ReactionWithUserResponse, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id,
            user_id: reaction.user_id,
            target_type: reaction.target_type.as_str().to_string(),
            target_id: reaction.target_id,
            kind: reaction.kind.as_str().to_string(),
            created_at: reaction.created_at,
        }
    }
}

/// Placeholder shape for users referenced by id but missing from the store
fn unknown_user(id: Snowflake) -> UserResponse {
    UserResponse {
        id,
        username: "unknown".to_string(),
        display_name: None,
        avatar: None,
    }
}

/// Look a user up in a pre-fetched id map, falling back to a placeholder
pub fn user_response(users: &HashMap<Snowflake, User>, id: Snowflake) -> UserResponse {
    users.get(&id).map_or_else(|| unknown_user(id), UserResponse::from)
}

/// Build a reaction-with-user response from a pre-fetched user map
pub fn reaction_with_user(
    users: &HashMap<Snowflake, User>,
    reaction: &Reaction,
) -> ReactionWithUserResponse {
    ReactionWithUserResponse {
        id: reaction.id,
        kind: reaction.kind.as_str().to_string(),
        user: user_response(users, reaction.user_id),
        created_at: reaction.created_at,
    }
}

/// Build a comment response with author and mentions populated from a
/// pre-fetched user map
pub fn comment_response(users: &HashMap<Snowflake, User>, comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        user: user_response(users, comment.author_id),
        entity_type: comment.entity_type.as_str().to_string(),
        entity_id: comment.entity_id,
        content: comment.content.clone(),
        parent_id: comment.parent_id,
        mentions: comment
            .mentions
            .iter()
            .map(|id| user_response(users, *id))
            .collect(),
        reaction_counts: comment.reaction_counts,
        total_reactions: comment.total_reactions(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

/// Build an activity feed entry with its actor populated
pub fn activity_response(
    users: &HashMap<Snowflake, User>,
    entry: &ActivityEntry,
) -> ActivityResponse {
    ActivityResponse {
        id: entry.id,
        activity_type: entry.activity_type.as_str().to_string(),
        author: user_response(users, entry.user_id),
        action: entry.action.clone(),
        target_type: entry.target_kind.map(|k| k.as_str().to_string()),
        target_id: entry.target_id,
        metadata: entry.metadata.clone(),
        points_earned: (entry.points_earned > 0).then_some(entry.points_earned),
        timestamp: entry.created_at,
    }
}

/// Index users by id for response population
pub fn index_users(users: Vec<User>) -> HashMap<Snowflake, User> {
    users.into_iter().map(|u| (u.id, u)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrace_core::value_objects::{EntityType, ReactionKind, TargetType};

    #[test]
    fn test_user_response_from_entity() {
        let mut user = User::new(Snowflake::new(1), "sara".to_string());
        user.display_name = Some("سارا".to_string());

        let response = UserResponse::from(&user);
        assert_eq!(response.username, "sara");
        assert_eq!(response.display_name.as_deref(), Some("سارا"));
    }

    #[test]
    fn test_unknown_user_placeholder() {
        let users = HashMap::new();
        let response = user_response(&users, Snowflake::new(99));
        assert_eq!(response.username, "unknown");
        assert_eq!(response.id, Snowflake::new(99));
    }

    #[test]
    fn test_comment_response_populates_mentions() {
        let author = User::new(Snowflake::new(1), "author".to_string());
        let alice = User::new(Snowflake::new(2), "alice".to_string());
        let users = index_users(vec![author, alice]);

        let mut comment = Comment::new(
            Snowflake::new(10),
            Snowflake::new(1),
            EntityType::Rumor,
            Snowflake::new(100),
            "@alice دیدی؟".to_string(),
        );
        comment.mentions = vec![Snowflake::new(2)];

        let response = comment_response(&users, &comment);
        assert_eq!(response.user.username, "author");
        assert_eq!(response.mentions.len(), 1);
        assert_eq!(response.mentions[0].username, "alice");
        assert_eq!(response.entity_type, "rumor");
    }

    #[test]
    fn test_reaction_response_kind_string() {
        let reaction = Reaction::new(
            Snowflake::new(1),
            Snowflake::new(2),
            TargetType::Player,
            Snowflake::new(3),
            ReactionKind::Suspicious,
        );
        let response = ReactionResponse::from(&reaction);
        assert_eq!(response.kind, "suspicious");
        assert_eq!(response.target_type, "player");
    }
}
