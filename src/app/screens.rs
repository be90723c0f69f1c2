//! Contents of the pushed screens.
//!
//! Opening a [`Route`] asks the worker for that screen's data; the results
//! land here. Each slice remembers which groop or announcement it belongs
//! to, so a response for a screen the user already left is stored but never
//! shown for a different route.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::route::Route;
use crate::domain::{Announcement, FeedItem, Groop, GroopId, GroopMember, GroopMessage};

/// Everything the groop detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroopDetail {
    pub groop: Groop,
    /// Newest first.
    pub announcements: Vec<Announcement>,
    /// Newest first.
    pub feed: Vec<FeedItem>,
    /// Oldest first.
    pub messages: Vec<GroopMessage>,
    pub members: Vec<GroopMember>,
}

/// A groop's chat transcript, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    pub groop: Groop,
    pub messages: Vec<GroopMessage>,
}

/// A groop's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberList {
    pub groop: Groop,
    pub members: Vec<GroopMember>,
}

/// An announcement with the groop it was posted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementDetail {
    pub announcement: Announcement,
    pub groop: Option<Groop>,
    pub members: Vec<GroopMember>,
}

/// Latest loaded content per screen kind.
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub detail: Option<GroopDetail>,
    pub chat: Option<ChatTranscript>,
    pub members: Option<MemberList>,
    pub announcement: Option<AnnouncementDetail>,
}

impl ScreenState {
    /// Whether content for `route` has arrived.
    #[must_use]
    pub fn is_loaded(&self, route: &Route) -> bool {
        match route {
            Route::GroopDetail(id) => self.detail_for(*id).is_some(),
            Route::GroopChat { groop_id, .. } => self.chat_for(*groop_id).is_some(),
            Route::GroopMembers(id) => self.members_for(*id).is_some(),
            Route::AnnouncementDetail(id) => self.announcement_for(*id).is_some(),
        }
    }

    #[must_use]
    pub fn detail_for(&self, groop_id: GroopId) -> Option<&GroopDetail> {
        self.detail.as_ref().filter(|detail| detail.groop.id == groop_id)
    }

    #[must_use]
    pub fn chat_for(&self, groop_id: GroopId) -> Option<&ChatTranscript> {
        self.chat.as_ref().filter(|chat| chat.groop.id == groop_id)
    }

    #[must_use]
    pub fn members_for(&self, groop_id: GroopId) -> Option<&MemberList> {
        self.members.as_ref().filter(|list| list.groop.id == groop_id)
    }

    #[must_use]
    pub fn announcement_for(&self, id: Uuid) -> Option<&AnnouncementDetail> {
        self.announcement.as_ref().filter(|detail| detail.announcement.id == id)
    }

    /// Folds a message sent by the user into any open transcript of its groop.
    pub fn record_message(&mut self, message: &GroopMessage) {
        let transcripts = [
            self.chat.as_mut().filter(|c| c.groop.id == message.groop_id).map(|c| &mut c.messages),
            self.detail.as_mut().filter(|d| d.groop.id == message.groop_id).map(|d| &mut d.messages),
        ];
        for messages in transcripts.into_iter().flatten() {
            if messages.iter().all(|m| m.id != message.id) {
                messages.push(message.clone());
                GroopMessage::sort_chronologically(messages);
            }
        }
    }

    /// Puts a new announcement at the top of an open detail screen of its groop.
    pub fn record_announcement(&mut self, announcement: &Announcement) {
        if let Some(detail) = self
            .detail
            .as_mut()
            .filter(|d| d.groop.id == announcement.groop_id)
        {
            if detail.announcements.iter().all(|a| a.id != announcement.id) {
                detail.announcements.insert(0, announcement.clone());
            }
        }
    }
}
