//! Types derived by an aggregation pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::Route;
use crate::domain::GroopId;

/// Maximum number of updates shown on the dashboard at once.
pub const VISIBLE_UPDATE_LIMIT: usize = 6;

/// Where a dashboard update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateSource {
    Announcement,
    Feed,
    Message,
}

/// One row of the merged timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardUpdate {
    /// Id of the announcement, feed item or message this row was built from.
    pub id: Uuid,
    pub groop_id: GroopId,
    pub groop_name: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub source: UpdateSource,
    /// Screen opened when the row is tapped.
    pub destination: Route,
}

/// Latest message of one groop's chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThreadSummary {
    pub groop_id: GroopId,
    pub groop_name: String,
    pub sender_name: String,
    pub preview: String,
    pub last_activity: DateTime<Utc>,
    pub is_unread: bool,
    pub has_mention: bool,
}

/// Badge counts for the inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InboxCounters {
    pub unread: usize,
    pub mentions: usize,
    pub pinned: usize,
}

/// Everything one aggregation pass publishes, replaced wholesale on commit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Newest first.
    pub updates: Vec<DashboardUpdate>,
    /// Most recent activity first.
    pub threads: Vec<ChatThreadSummary>,
    pub counters: InboxCounters,
}

/// Segmented filter above the update list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateFilter {
    #[default]
    All,
    Announcements,
    /// Feed items and chat messages.
    Activity,
}

impl UpdateFilter {
    #[must_use]
    pub const fn accepts(self, source: UpdateSource) -> bool {
        match self {
            Self::All => true,
            Self::Announcements => matches!(source, UpdateSource::Announcement),
            Self::Activity => matches!(source, UpdateSource::Feed | UpdateSource::Message),
        }
    }
}

impl DashboardSnapshot {
    /// Updates accepted by `filter`, capped at [`VISIBLE_UPDATE_LIMIT`].
    #[must_use]
    pub fn visible(&self, filter: UpdateFilter) -> Vec<&DashboardUpdate> {
        self.updates
            .iter()
            .filter(|update| filter.accepts(update.source))
            .take(VISIBLE_UPDATE_LIMIT)
            .collect()
    }
}
