//! Activity feed module

pub mod models;
pub mod service;

pub use models::{Activity, ActivityKind, FeedItem};
pub use service::{
    activity_message, format_relative_time, render_activity, ActivityLog, EMPTY_FEED_TEXT,
};
