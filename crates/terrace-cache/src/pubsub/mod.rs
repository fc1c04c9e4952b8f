//! Redis pub/sub for engagement events

mod channels;
mod publisher;

pub use channels::EngagementChannel;
pub use publisher::{EngagementEvent, Publisher};
