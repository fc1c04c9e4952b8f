//! Engagement value objects - the closed vocabularies of the fan platform
//!
//! All enums serialize as the lowercase snake_case strings the frontend
//! already speaks (`"like"`, `"player"`, `"comment_created"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Entity a comment can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Player,
    Rumor,
}

impl EntityType {
    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Rumor => "rumor",
        }
    }

    /// Persian display name, used in activity action texts
    pub fn label_fa(&self) -> &'static str {
        match self {
            Self::Player => "بازیکن",
            Self::Rumor => "شایعه",
        }
    }

    /// Parse from the wire representation
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "player" => Ok(Self::Player),
            "rumor" => Ok(Self::Rumor),
            other => Err(DomainError::InvalidEntityType(other.to_string())),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target a reaction can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Comment,
    Player,
    Rumor,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Player => "player",
            Self::Rumor => "rumor",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "comment" => Ok(Self::Comment),
            "player" => Ok(Self::Player),
            "rumor" => Ok(Self::Rumor),
            other => Err(DomainError::InvalidTargetType(other.to_string())),
        }
    }

    /// Only comment targets carry a denormalized counter
    #[inline]
    pub fn has_denormalized_counts(&self) -> bool {
        matches!(self, Self::Comment)
    }
}

impl From<EntityType> for TargetType {
    fn from(entity: EntityType) -> Self {
        match entity {
            EntityType::Player => Self::Player,
            EntityType::Rumor => Self::Rumor,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four reaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Fire,
    Suspicious,
    Funny,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 4] = [
        ReactionKind::Like,
        ReactionKind::Fire,
        ReactionKind::Suspicious,
        ReactionKind::Funny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Fire => "fire",
            Self::Suspicious => "suspicious",
            Self::Funny => "funny",
        }
    }

    /// Persian display label
    pub fn label_fa(&self) -> &'static str {
        match self {
            Self::Like => "لایک",
            Self::Fire => "داغ",
            Self::Suspicious => "مشکوک",
            Self::Funny => "خنده‌دار",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "like" => Ok(Self::Like),
            "fire" => Ok(Self::Fire),
            "suspicious" => Ok(Self::Suspicious),
            "funny" => Ok(Self::Funny),
            other => Err(DomainError::InvalidReactionKind(other.to_string())),
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind reaction tallies, denormalized onto comments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like: i32,
    pub fire: i32,
    pub suspicious: i32,
    pub funny: i32,
}

impl ReactionCounts {
    /// Get the count for one kind
    pub fn get(&self, kind: ReactionKind) -> i32 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Fire => self.fire,
            ReactionKind::Suspicious => self.suspicious,
            ReactionKind::Funny => self.funny,
        }
    }

    /// Apply a delta to one kind, clamping at zero
    pub fn apply(&mut self, kind: ReactionKind, delta: i32) {
        let slot = match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Fire => &mut self.fire,
            ReactionKind::Suspicious => &mut self.suspicious,
            ReactionKind::Funny => &mut self.funny,
        };
        *slot = (*slot + delta).max(0);
    }

    /// Sum over all kinds
    pub fn total(&self) -> i32 {
        self.like + self.fire + self.suspicious + self.funny
    }
}

/// Point-earning / notable action kinds recorded in the activity ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    CommentCreated,
    ReactionAdded,
    UserMentioned,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommentCreated => "comment_created",
            Self::ReactionAdded => "reaction_added",
            Self::UserMentioned => "user_mentioned",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "comment_created" => Ok(Self::CommentCreated),
            "reaction_added" => Ok(Self::ReactionAdded),
            "user_mentioned" => Ok(Self::UserMentioned),
            other => Err(DomainError::InvalidActivityType(other.to_string())),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an activity entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTargetKind {
    Player,
    Rumor,
    Comment,
    User,
}

impl ActivityTargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Rumor => "rumor",
            Self::Comment => "comment",
            Self::User => "user",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "player" => Ok(Self::Player),
            "rumor" => Ok(Self::Rumor),
            "comment" => Ok(Self::Comment),
            "user" => Ok(Self::User),
            other => Err(DomainError::InvalidTargetType(other.to_string())),
        }
    }
}

impl From<TargetType> for ActivityTargetKind {
    fn from(target: TargetType) -> Self {
        match target {
            TargetType::Comment => Self::Comment,
            TargetType::Player => Self::Player,
            TargetType::Rumor => Self::Rumor,
        }
    }
}

impl From<EntityType> for ActivityTargetKind {
    fn from(entity: EntityType) -> Self {
        match entity {
            EntityType::Player => Self::Player,
            EntityType::Rumor => Self::Rumor,
        }
    }
}

impl fmt::Display for ActivityTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
