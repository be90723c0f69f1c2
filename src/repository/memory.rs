//! In-memory repository with simulated latency.
//!
//! The whole data set lives in a [`SeedData`] behind a `parking_lot::RwLock`.
//! Every call first sleeps for the configured latency and only then takes the
//! lock, so no lock is ever held across an await point. Mutations (join,
//! create, send, post) run as a single critical section under the write lock,
//! which keeps concurrent readers from seeing a half-appended record.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::backend::GroopRepository;
use super::seed::SeedData;
use crate::domain::{Announcement, FeedItem, Groop, GroopId, GroopMember, GroopMessage, Result};

/// Age of the most recent generated feed item, in seconds.
const RECENT_FEED_AGE_SECONDS: i64 = 3_600;

/// Age of the older generated feed item, in seconds.
const OLDER_FEED_AGE_SECONDS: i64 = 7_200;

/// Seeded in-memory store.
///
/// # Thread Safety
///
/// `Send + Sync`; share it behind an `Arc<dyn GroopRepository>`.
pub struct InMemoryGroopRepository {
    /// Fixed delay applied to every call.
    latency: Duration,

    /// Entire store contents.
    data: RwLock<SeedData>,
}

impl InMemoryGroopRepository {
    /// Creates a repository holding `data`.
    #[must_use]
    pub fn new(data: SeedData, latency: Duration) -> Self {
        tracing::debug!(
            groops = data.groops.len(),
            latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            "initializing in-memory repository"
        );
        Self {
            latency,
            data: RwLock::new(data),
        }
    }

    /// Creates a repository holding the built-in Manchester data set.
    #[must_use]
    pub fn seeded(latency: Duration) -> Self {
        Self::new(SeedData::manchester(), latency)
    }

    /// Creates a repository from a JSON seed document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed.
    pub fn from_json(json: &str, latency: Duration) -> Result<Self> {
        Ok(Self::new(SeedData::from_json(json)?, latency))
    }

    /// Returns a copy of the current store contents.
    #[must_use]
    pub fn snapshot(&self) -> SeedData {
        self.data.read().clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl std::fmt::Debug for InMemoryGroopRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGroopRepository")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl GroopRepository for InMemoryGroopRepository {
    async fn fetch_my_groops(&self) -> Vec<Groop> {
        self.simulate_latency().await;
        let mut groops: Vec<Groop> = self.data.read().groops.iter().filter(|g| g.is_joined).cloned().collect();
        groops.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = groops.len(), "fetched joined groops");
        groops
    }

    async fn fetch_discovery_groops(&self) -> Vec<Groop> {
        self.simulate_latency().await;
        let mut groops: Vec<Groop> = self.data.read().groops.iter().filter(|g| !g.is_joined).cloned().collect();
        groops.sort_by(|a, b| b.member_count.cmp(&a.member_count));
        tracing::debug!(count = groops.len(), "fetched discovery groops");
        groops
    }

    async fn groop(&self, id: GroopId) -> Option<Groop> {
        self.simulate_latency().await;
        let groop = self.data.read().groops.iter().find(|g| g.id == id).cloned();
        tracing::debug!(groop_id = %id, found = groop.is_some(), "groop lookup complete");
        groop
    }

    async fn announcement(&self, id: Uuid) -> Option<Announcement> {
        self.simulate_latency().await;
        self.data.read().announcements.iter().find(|a| a.id == id).cloned()
    }

    async fn fetch_announcements(&self, groop_id: GroopId) -> Vec<Announcement> {
        self.simulate_latency().await;
        let mut announcements: Vec<Announcement> = self
            .data
            .read()
            .announcements
            .iter()
            .filter(|a| a.groop_id == groop_id)
            .cloned()
            .collect();
        announcements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        announcements
    }

    async fn create_announcement(&self, groop_id: GroopId, title: &str, body: &str) -> Announcement {
        self.simulate_latency().await;
        let announcement = Announcement::new(groop_id, title, body);
        self.data.write().announcements.push(announcement.clone());
        tracing::debug!(groop_id = %groop_id, announcement_id = %announcement.id, "announcement created");
        announcement
    }

    async fn fetch_messages(&self, groop_id: GroopId) -> Vec<GroopMessage> {
        self.simulate_latency().await;
        self.data
            .read()
            .messages
            .iter()
            .filter(|m| m.groop_id == groop_id)
            .cloned()
            .collect()
    }

    async fn send_message(
        &self,
        groop_id: GroopId,
        body: &str,
        sender_name: &str,
        is_from_current_user: bool,
    ) -> GroopMessage {
        self.simulate_latency().await;
        let message = GroopMessage {
            id: Uuid::new_v4(),
            groop_id,
            sender_name: sender_name.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            is_from_current_user,
        };
        self.data.write().messages.push(message.clone());
        tracing::debug!(groop_id = %groop_id, message_id = %message.id, "message sent");
        message
    }

    async fn fetch_members(&self, groop_id: GroopId) -> Vec<GroopMember> {
        self.simulate_latency().await;
        self.data
            .read()
            .members
            .iter()
            .filter(|m| m.groop_id == groop_id)
            .cloned()
            .collect()
    }

    async fn join_groop(&self, id: GroopId) {
        self.simulate_latency().await;
        let mut data = self.data.write();
        let Some(groop) = data.groops.iter_mut().find(|g| g.id == id) else {
            tracing::debug!(groop_id = %id, "join ignored, unknown groop");
            return;
        };
        let joined = groop.join();
        tracing::debug!(groop_id = %id, joined = joined, member_count = groop.member_count, "join processed");
    }

    async fn create_groop(&self, name: &str, category: &str, location: &str, host_name: &str) -> Groop {
        self.simulate_latency().await;

        let groop = Groop::new(name, category, location);
        let host = GroopMember::host(groop.id, host_name);
        let welcome = Announcement::new(
            groop.id,
            format!("Welcome to {name}"),
            "This groop was just created. Share your first update and invite collaborators.",
        );

        {
            let mut data = self.data.write();
            data.groops.push(groop.clone());
            data.members.push(host);
            data.announcements.push(welcome);
        }

        tracing::debug!(groop_id = %groop.id, name = %groop.name, "groop created");
        groop
    }

    async fn feed_items(&self, groop_id: GroopId) -> Vec<FeedItem> {
        self.simulate_latency().await;
        let Some(groop) = self.data.read().groops.iter().find(|g| g.id == groop_id).cloned() else {
            return Vec::new();
        };

        let now = Utc::now();
        vec![
            FeedItem {
                id: Uuid::new_v4(),
                groop_id,
                message: format!(
                    "{} members checked in across North West meetups this week.",
                    groop.member_count
                ),
                timestamp: now - chrono::Duration::seconds(RECENT_FEED_AGE_SECONDS),
            },
            FeedItem {
                id: Uuid::new_v4(),
                groop_id,
                message: format!("New meetup spots are being suggested around {}.", groop.location),
                timestamp: now - chrono::Duration::seconds(OLDER_FEED_AGE_SECONDS),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn repository() -> InMemoryGroopRepository {
        InMemoryGroopRepository::seeded(Duration::ZERO)
    }

    #[tokio::test]
    async fn joined_and_discovery_lists_are_disjoint_and_ordered() {
        let repo = repository();
        let mine = repo.fetch_my_groops().await;
        let discovery = repo.fetch_discovery_groops().await;

        let names: Vec<&str> = mine.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ancoats Book Circle", "Campfield Co-Working Circle", "Northern Runners MCR"]);

        let counts: Vec<u32> = discovery.iter().map(|g| g.member_count).collect();
        assert_eq!(counts, vec![41, 29, 25]);
    }

    #[tokio::test]
    async fn join_increments_once() {
        let repo = repository();
        let target = repo.fetch_discovery_groops().await[0].clone();

        repo.join_groop(target.id).await;
        repo.join_groop(target.id).await;

        let joined = repo.groop(target.id).await.unwrap();
        assert!(joined.is_joined);
        assert_eq!(joined.member_count, target.member_count + 1);
        assert!(repo.fetch_my_groops().await.iter().any(|g| g.id == target.id));
    }

    #[tokio::test]
    async fn join_unknown_groop_is_a_no_op() {
        let repo = repository();
        let before = repo.snapshot();
        repo.join_groop(Uuid::new_v4()).await;
        assert_eq!(repo.snapshot(), before);
    }

    #[tokio::test]
    async fn create_groop_adds_host_and_welcome() {
        let repo = repository();
        let groop = repo.create_groop("Levenshulme Makers", "Arts", "Levenshulme", "Taylor").await;

        let members = repo.fetch_members(groop.id).await;
        assert_eq!(members.len(), 1);
        assert!(members[0].is_host);
        assert_eq!(members[0].name, "Taylor");

        let announcements = repo.fetch_announcements(groop.id).await;
        assert_eq!(announcements.len(), 1);
        assert_eq!(announcements[0].title, "Welcome to Levenshulme Makers");
    }

    #[tokio::test]
    async fn announcements_come_back_newest_first() {
        let repo = repository();
        let runners = Uuid::from_u128(0xA111_1111_1111_1111_1111_1111_1111_1111);
        let titles: Vec<String> = repo
            .fetch_announcements(runners)
            .await
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Heaton Park Warmup", "Canal Loop Session"]);
    }

    #[tokio::test]
    async fn feed_items_for_unknown_groop_are_empty() {
        let repo = repository();
        assert!(repo.feed_items(Uuid::new_v4()).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn every_call_waits_for_the_simulated_latency() {
        let repo = InMemoryGroopRepository::seeded(Duration::from_millis(250));
        let started = tokio::time::Instant::now();
        let _ = repo.fetch_my_groops().await;
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn concurrent_sends_are_all_recorded() {
        let repo = Arc::new(repository());
        let groop_id = Uuid::from_u128(0xB222_2222_2222_2222_2222_2222_2222_2222);
        let before = repo.fetch_messages(groop_id).await.len();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.send_message(groop_id, &format!("message {i}"), "Sam", false).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.fetch_messages(groop_id).await.len(), before + 16);
    }
}
