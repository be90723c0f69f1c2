//! Content posted inside a groop: announcements, feed items and chat messages.
//!
//! Announcements and messages are append-only. Feed items are generated per
//! fetch and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::groop::GroopId;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// An announcement posted by a groop host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub groop_id: GroopId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Creates an announcement stamped with the current time.
    #[must_use]
    pub fn new(groop_id: GroopId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            groop_id,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

/// A generated activity line shown in a groop's feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: Uuid,
    pub groop_id: GroopId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat message inside a groop.
///
/// Repositories hand messages back in no particular order; consumers sort by
/// `created_at` ascending before display, so the latest message is the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroopMessage {
    pub id: Uuid,
    pub groop_id: GroopId,
    pub sender_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_from_current_user: bool,
}

impl GroopMessage {
    /// Sorts messages in place by creation time, oldest first.
    pub fn sort_chronologically(messages: &mut [Self]) {
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    }
}

/// Returns a short human-readable description of how long ago `timestamp` was.
///
/// - Less than 1 minute: "just now"
/// - Less than 1 hour: "Xm ago"
/// - Less than 1 day: "Xh ago"
/// - Otherwise: "Xd ago"
///
/// Timestamps in the future are reported as "just now".
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use groop_core::domain::time_ago;
///
/// let now = Utc::now();
/// assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
/// assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
/// ```
#[must_use]
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now + Duration::minutes(2), now), "just now");
        assert_eq!(time_ago(now - Duration::days(8), now), "8d ago");
    }

    #[test]
    fn messages_sort_oldest_first() {
        let groop_id = Uuid::new_v4();
        let now = Utc::now();
        let message = |offset: i64, body: &str| GroopMessage {
            id: Uuid::new_v4(),
            groop_id,
            sender_name: "Maya".to_string(),
            body: body.to_string(),
            created_at: now - Duration::seconds(offset),
            is_from_current_user: false,
        };

        let mut messages = vec![message(10, "newest"), message(300, "oldest"), message(60, "middle")];
        GroopMessage::sort_chronologically(&mut messages);

        let bodies: Vec<&str> = messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["oldest", "middle", "newest"]);
    }
}
