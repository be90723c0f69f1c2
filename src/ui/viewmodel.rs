//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed by the
//! `AppState::compute_*_viewmodel` methods. They contain no business logic,
//! only display-ready data, so a platform shell can bind to them directly.

use chrono::{DateTime, Utc};

use crate::app::Route;
use crate::dashboard::{ChatThreadSummary, DashboardUpdate, InboxCounters, UpdateFilter};
use crate::discovery::{DiscoveryMode, MapRegion, SortMode};
use crate::domain::{time_ago, Announcement, FeedItem, Groop, GroopId, GroopMember, GroopMessage};
use crate::sheet::SheetDetent;

/// Home tab contents.
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub greeting: String,
    pub joined_count: usize,
    pub discovery_count: usize,
    pub counters: InboxCounters,
    pub filter: UpdateFilter,

    /// Filtered and capped, newest first.
    pub updates: Vec<DashboardUpdate>,
    pub threads: Vec<ChatThreadSummary>,

    /// A pass is in flight; shells show a spinner over the stale snapshot.
    pub is_loading: bool,
    pub empty_state: Option<EmptyState>,
}

/// Discover tab contents.
#[derive(Debug, Clone)]
pub struct DiscoveryViewModel {
    pub query: String,
    pub category: String,

    /// Category chips, `"All"` first.
    pub category_chips: Vec<String>,
    pub sort: SortMode,
    pub mode: DiscoveryMode,
    pub featured: Vec<GroopRow>,

    /// Results shown in the current mode.
    pub rows: Vec<GroopRow>,

    /// Matches before the mode's cap was applied.
    pub total_matches: usize,
    pub camera: MapRegion,
    pub sheet: SheetLayout,
    pub empty_state: Option<EmptyState>,
}

/// My Groops tab contents.
#[derive(Debug, Clone)]
pub struct MyGroopsViewModel {
    pub query: String,
    pub sort: SortMode,
    pub categories: Vec<String>,
    pub selected_category: String,

    /// Members summed over every joined groop, ignoring the filters.
    pub total_members: u64,

    /// Name of the largest joined groop.
    pub top_groop: Option<String>,
    pub rows: Vec<GroopRow>,
    pub empty_state: Option<EmptyState>,
}

/// Geometry of the bottom sheet for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub detent: SheetDetent,
    pub offset: f64,
    pub visible_height: f64,

    /// Top of the floating map controls.
    pub controls_y: f64,
    pub is_dragging: bool,
}

/// One groop in a list or carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroopRow {
    pub id: GroopId,
    pub name: String,

    /// `"<category> · <location>"`
    pub subtitle: String,
    pub member_label: String,
    pub is_selected: bool,
    pub is_joining: bool,
}

impl GroopRow {
    #[must_use]
    pub fn new(groop: &Groop, is_selected: bool, is_joining: bool) -> Self {
        let member_label = if groop.member_count == 1 {
            "1 member".to_string()
        } else {
            format!("{} members", groop.member_count)
        };
        Self {
            id: groop.id,
            name: groop.name.clone(),
            subtitle: format!("{} · {}", groop.category, groop.location),
            member_label,
            is_selected,
            is_joining,
        }
    }
}

/// Contents of the screen on top of the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenViewModel {
    /// The route's data has not arrived yet.
    Loading(Route),
    GroopDetail(GroopDetailViewModel),
    Chat(ChatViewModel),
    Members(MembersViewModel),
    Announcement(AnnouncementViewModel),
}

/// Number of member avatars shown on the detail screen.
const DETAIL_MEMBER_PREVIEW: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroopDetailViewModel {
    pub groop: GroopRow,
    pub announcements: Vec<Announcement>,
    pub feed: Vec<FeedItem>,

    /// Initials of the first few members, host first.
    pub member_initials: Vec<String>,
    pub latest_message: Option<ChatLine>,
}

impl GroopDetailViewModel {
    #[must_use]
    pub fn new(
        groop: &Groop,
        announcements: &[Announcement],
        feed: &[FeedItem],
        messages: &[GroopMessage],
        members: &[GroopMember],
        now: DateTime<Utc>,
    ) -> Self {
        let mut ordered: Vec<&GroopMember> = members.iter().collect();
        ordered.sort_by_key(|member| !member.is_host);
        Self {
            groop: GroopRow::new(groop, false, false),
            announcements: announcements.to_vec(),
            feed: feed.to_vec(),
            member_initials: ordered
                .into_iter()
                .take(DETAIL_MEMBER_PREVIEW)
                .map(GroopMember::initials)
                .collect(),
            latest_message: messages.last().map(|message| ChatLine::new(message, now)),
        }
    }
}

/// One line of a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender: String,
    pub body: String,
    pub is_mine: bool,
    pub age: String,
}

impl ChatLine {
    #[must_use]
    pub fn new(message: &GroopMessage, now: DateTime<Utc>) -> Self {
        Self {
            sender: message.sender_name.clone(),
            body: message.body.clone(),
            is_mine: message.is_from_current_user,
            age: time_ago(message.created_at, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatViewModel {
    pub groop_id: GroopId,
    pub groop_name: String,

    /// Oldest first.
    pub lines: Vec<ChatLine>,

    /// Text pre-filled into the composer.
    pub draft: String,
}

/// One entry of the member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub name: String,
    pub initials: String,
    pub job_title: String,
    pub status: String,
}

impl From<&GroopMember> for MemberRow {
    fn from(member: &GroopMember) -> Self {
        Self {
            name: member.name.clone(),
            initials: member.initials(),
            job_title: member.job_title.clone(),
            status: member.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersViewModel {
    pub groop_name: String,
    pub host: Option<MemberRow>,
    pub attendees: Vec<MemberRow>,
}

impl MembersViewModel {
    #[must_use]
    pub fn new(groop: &Groop, members: &[GroopMember]) -> Self {
        Self {
            groop_name: groop.name.clone(),
            host: members.iter().find(|m| m.is_host).map(MemberRow::from),
            attendees: members.iter().filter(|m| !m.is_host).map(MemberRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementViewModel {
    pub title: String,
    pub body: String,
    pub groop_name: Option<String>,
    pub posted: String,
    pub attendee_count: usize,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No matches").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

impl EmptyState {
    #[must_use]
    pub fn new(message: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self { message: message.into(), subtitle: subtitle.into() }
    }
}
