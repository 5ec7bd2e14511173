//! Activity log and feed rendering

use crate::koala::feed::models::{Activity, ActivityKind, FeedItem};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Text shown when the feed has nothing to show
pub const EMPTY_FEED_TEXT: &str = "No recent activity";

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Relative label for `timestamp` as seen at `now`: `45s ago`, `5m ago`,
/// `3h ago`, `2d ago`. Floors to the unit; future times read `0s ago`.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds().max(0);
    if secs < MINUTE {
        format!("{}s ago", secs)
    } else if secs < HOUR {
        format!("{}m ago", secs / MINUTE)
    } else if secs < DAY {
        format!("{}h ago", secs / HOUR)
    } else {
        format!("{}d ago", secs / DAY)
    }
}

/// Sentence describing an activity
pub fn activity_message(activity: &Activity) -> String {
    let actor = activity.user.display_name();
    match &activity.kind {
        ActivityKind::Borrow { book, friend_from } => format!(
            "{} borrowed {} from {}",
            actor,
            book.title,
            friend_from.display_name()
        ),
        ActivityKind::Return { book, friend_to } => format!(
            "{} returned {} to {}",
            actor,
            book.title,
            friend_to.display_name()
        ),
        ActivityKind::AddBook { book } => {
            format!("{} added {} to their library", actor, book.title)
        }
        ActivityKind::NewFriend { new_friend } => {
            format!("{} and {} are now friends", actor, new_friend.display_name())
        }
    }
}

pub fn render_activity(activity: &Activity, now: DateTime<Utc>) -> FeedItem {
    FeedItem {
        id: activity.id.clone(),
        kind: activity.kind.type_name(),
        icon: activity.kind.icon(),
        message: activity_message(activity),
        relative_time: format_relative_time(activity.timestamp, now),
    }
}

/// Append-only activity log, kept newest first.
///
/// Ordering is by timestamp descending; entries with equal timestamps keep
/// their insertion order.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
}

impl ActivityLog {
    pub fn new(mut entries: Vec<Activity>) -> Self {
        // stable sort
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        info!("[Feed] loaded {} activities", entries.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[Activity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert after every entry at least as new as `activity`
    pub fn append(&mut self, activity: Activity) {
        let at = self
            .entries
            .partition_point(|existing| existing.timestamp >= activity.timestamp);
        debug!(
            "[Feed] append {} ({}) at position {}",
            activity.id,
            activity.kind.type_name(),
            at
        );
        self.entries.insert(at, activity);
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<FeedItem> {
        self.entries.iter().map(|a| render_activity(a, now)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koala::catalog::BookRef;
    use crate::koala::fixtures;
    use crate::koala::types::User;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = now();
        let cases = [
            (Duration::seconds(45), "45s ago"),
            (Duration::minutes(5), "5m ago"),
            (Duration::hours(3), "3h ago"),
            (Duration::days(2), "2d ago"),
            (Duration::seconds(0), "0s ago"),
            (Duration::seconds(59), "59s ago"),
            (Duration::seconds(60), "1m ago"),
            (Duration::seconds(3599), "59m ago"),
            (Duration::seconds(3600), "1h ago"),
            (Duration::seconds(86_399), "23h ago"),
            (Duration::seconds(86_400), "1d ago"),
        ];
        for (ago, expected) in cases {
            assert_eq!(format_relative_time(now - ago, now), expected, "{ago:?}");
        }
    }

    #[test]
    fn relative_time_floors_partial_units() {
        let now = now();
        let ts = now - Duration::milliseconds(90_999);
        assert_eq!(format_relative_time(ts, now), "1m ago");
    }

    #[test]
    fn future_timestamp_reads_zero_seconds() {
        let now = now();
        assert_eq!(format_relative_time(now + Duration::seconds(30), now), "0s ago");
    }

    #[test]
    fn renders_sentence_per_type() {
        let now = now();
        let log = ActivityLog::new(fixtures::sample_activities(now));
        let messages: Vec<String> = log.render(now).into_iter().map(|i| i.message).collect();
        assert_eq!(
            messages,
            vec![
                "Jamie borrowed The Lord of the Rings from Sarah",
                "Marco added Dune to their library",
                "Lena returned Pride and Prejudice to Michelle",
                "David and Rachel are now friends",
                "Alex borrowed The Hobbit from Marco",
            ]
        );
        let times: Vec<String> = log.render(now).into_iter().map(|i| i.relative_time).collect();
        assert_eq!(times, vec!["1h ago", "3h ago", "5h ago", "8h ago", "1d ago"]);
    }

    #[test]
    fn log_sorts_newest_first_regardless_of_input_order() {
        let now = now();
        let mut shuffled = fixtures::sample_activities(now);
        shuffled.reverse();
        let log = ActivityLog::new(shuffled);
        let ids: Vec<&str> = log.entries().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert!(log
            .entries()
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn append_keeps_order() {
        let now = now();
        let mut log = ActivityLog::new(fixtures::sample_activities(now));
        log.append(Activity {
            id: "6".to_string(),
            user: User::named("user9", "Priya", "555-0199"),
            timestamp: now - Duration::hours(4),
            kind: ActivityKind::AddBook {
                book: BookRef {
                    id: "book9".to_string(),
                    title: "Emma".to_string(),
                },
            },
        });
        let ids: Vec<&str> = log.entries().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "6", "3", "4", "5"]);
    }

    #[test]
    fn activity_serializes_with_type_tag() {
        let now = now();
        let activity = &fixtures::sample_activities(now)[0];
        let json = serde_json::to_value(activity).unwrap();
        assert_eq!(json["type"], "borrow");
        assert_eq!(json["friendFrom"]["name"], "Sarah");
        assert_eq!(json["book"]["title"], "The Lord of the Rings");

        let back: Activity = serde_json::from_value(json).unwrap();
        assert_eq!(&back, activity);
    }

    #[test]
    fn empty_log_renders_nothing() {
        let log = ActivityLog::default();
        assert!(log.is_empty());
        assert!(log.render(now()).is_empty());
        assert_eq!(EMPTY_FEED_TEXT, "No recent activity");
    }
}
