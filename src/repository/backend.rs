//! Repository abstraction.
//!
//! [`GroopRepository`] is the async contract the aggregator, the worker and
//! the tests program against. Every method may be called concurrently. Lookups
//! of absent entities return `None` or an empty list instead of failing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Announcement, FeedItem, Groop, GroopId, GroopMember, GroopMessage};

/// Async store over groops, announcements, messages, members and feed items.
///
/// # Implementations
///
/// - [`InMemoryGroopRepository`](super::InMemoryGroopRepository): seeded
///   in-memory store with a fixed simulated latency per call
///
/// # Examples
///
/// ```no_run
/// use groop_core::repository::{GroopRepository, InMemoryGroopRepository};
/// use std::time::Duration;
///
/// # async fn demo() {
/// let repository = InMemoryGroopRepository::seeded(Duration::from_millis(250));
/// let joined = repository.fetch_my_groops().await;
/// # }
/// ```
#[async_trait]
pub trait GroopRepository: Send + Sync {
    /// Returns every joined groop, sorted by name.
    async fn fetch_my_groops(&self) -> Vec<Groop>;

    /// Returns every groop the user has not joined, largest first.
    async fn fetch_discovery_groops(&self) -> Vec<Groop>;

    /// Looks up a single groop.
    async fn groop(&self, id: GroopId) -> Option<Groop>;

    /// Looks up a single announcement.
    async fn announcement(&self, id: Uuid) -> Option<Announcement>;

    /// Returns a groop's announcements, newest first.
    async fn fetch_announcements(&self, groop_id: GroopId) -> Vec<Announcement>;

    /// Appends an announcement stamped with the current time.
    async fn create_announcement(&self, groop_id: GroopId, title: &str, body: &str) -> Announcement;

    /// Returns a groop's messages in no guaranteed order.
    ///
    /// Callers sort with
    /// [`GroopMessage::sort_chronologically`](crate::domain::GroopMessage::sort_chronologically).
    async fn fetch_messages(&self, groop_id: GroopId) -> Vec<GroopMessage>;

    /// Appends a chat message stamped with the current time.
    async fn send_message(
        &self,
        groop_id: GroopId,
        body: &str,
        sender_name: &str,
        is_from_current_user: bool,
    ) -> GroopMessage;

    /// Returns a groop's members.
    async fn fetch_members(&self, groop_id: GroopId) -> Vec<GroopMember>;

    /// Joins a groop. No-op if the groop is unknown or already joined.
    async fn join_groop(&self, id: GroopId);

    /// Founds a new joined groop together with its host member and a welcome
    /// announcement.
    async fn create_groop(&self, name: &str, category: &str, location: &str, host_name: &str) -> Groop;

    /// Returns generated activity for a groop, newest first. Empty for unknown groops.
    async fn feed_items(&self, groop_id: GroopId) -> Vec<FeedItem>;
}
