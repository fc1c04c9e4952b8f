//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ActivityQuery, ActivityRepository, CommentQuery, CommentRepository, PointsTotal,
    ReactionRepository, RepoResult, ToggleOutcome, UserRepository,
};
