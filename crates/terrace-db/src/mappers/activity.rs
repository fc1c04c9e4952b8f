//! Activity entry <-> model mapper

use terrace_core::entities::ActivityEntry;
use terrace_core::value_objects::{ActivityTargetKind, ActivityType, Snowflake};

use crate::models::ActivityLogModel;

fn parse_activity_type(type_str: &str) -> ActivityType {
    ActivityType::parse(type_str).unwrap_or(ActivityType::CommentCreated)
}

/// Convert ActivityLogModel to ActivityEntry entity
impl From<ActivityLogModel> for ActivityEntry {
    fn from(model: ActivityLogModel) -> Self {
        ActivityEntry {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            activity_type: parse_activity_type(&model.activity_type),
            action: model.action,
            target_kind: model
                .target_kind
                .as_deref()
                .and_then(|s| ActivityTargetKind::parse(s).ok()),
            target_id: model.target_id.map(Snowflake::new),
            metadata: model.metadata,
            points_earned: model.points_earned,
            created_at: model.created_at,
        }
    }
}

/// Convert ActivityEntry reference to values for database insertion
pub struct ActivityInsert<'a> {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: &'static str,
    pub action: &'a str,
    pub target_kind: Option<&'static str>,
    pub target_id: Option<i64>,
    pub metadata: &'a serde_json::Value,
    pub points_earned: i32,
}

impl<'a> ActivityInsert<'a> {
    pub fn new(entry: &'a ActivityEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            user_id: entry.user_id.into_inner(),
            activity_type: entry.activity_type.as_str(),
            action: &entry.action,
            target_kind: entry.target_kind.map(|k| k.as_str()),
            target_id: entry.target_id.map(Snowflake::into_inner),
            metadata: &entry.metadata,
            points_earned: entry.points_earned,
        }
    }
}
