//! Dashboard aggregation against the public API: counters, ordering and
//! last-triggered-wins under out-of-order completion.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use groop_core::dashboard::{aggregate, DashboardState, InboxCounters, UpdateFilter, UpdateSource};
use groop_core::domain::{Announcement, FeedItem, Groop, GroopId, GroopMember, GroopMessage};
use groop_core::repository::{GroopRepository, InMemoryGroopRepository, SeedData};
use groop_core::worker::{GroopWorker, WorkerMessage, WorkerResponse};

fn joined(name: &str) -> Groop {
    Groop { is_joined: true, ..Groop::new(name, "Social", "Ancoats") }
}

fn message(groop: &Groop, sender: &str, body: &str, minutes_ago: i64, mine: bool) -> GroopMessage {
    GroopMessage {
        id: Uuid::new_v4(),
        groop_id: groop.id,
        sender_name: sender.into(),
        body: body.into(),
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
        is_from_current_user: mine,
    }
}

/// Repository whose message reads take a per-groop amount of time.
struct SlowMessages {
    inner: InMemoryGroopRepository,
    delays: HashMap<GroopId, Duration>,
}

#[async_trait]
impl GroopRepository for SlowMessages {
    async fn fetch_my_groops(&self) -> Vec<Groop> {
        self.inner.fetch_my_groops().await
    }

    async fn fetch_discovery_groops(&self) -> Vec<Groop> {
        self.inner.fetch_discovery_groops().await
    }

    async fn groop(&self, id: GroopId) -> Option<Groop> {
        self.inner.groop(id).await
    }

    async fn announcement(&self, id: Uuid) -> Option<Announcement> {
        self.inner.announcement(id).await
    }

    async fn fetch_announcements(&self, groop_id: GroopId) -> Vec<Announcement> {
        self.inner.fetch_announcements(groop_id).await
    }

    async fn create_announcement(&self, groop_id: GroopId, title: &str, body: &str) -> Announcement {
        self.inner.create_announcement(groop_id, title, body).await
    }

    async fn fetch_messages(&self, groop_id: GroopId) -> Vec<GroopMessage> {
        if let Some(delay) = self.delays.get(&groop_id) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.fetch_messages(groop_id).await
    }

    async fn send_message(
        &self,
        groop_id: GroopId,
        body: &str,
        sender_name: &str,
        is_from_current_user: bool,
    ) -> GroopMessage {
        self.inner.send_message(groop_id, body, sender_name, is_from_current_user).await
    }

    async fn fetch_members(&self, groop_id: GroopId) -> Vec<GroopMember> {
        self.inner.fetch_members(groop_id).await
    }

    async fn join_groop(&self, id: GroopId) {
        self.inner.join_groop(id).await;
    }

    async fn create_groop(&self, name: &str, category: &str, location: &str, host_name: &str) -> Groop {
        self.inner.create_groop(name, category, location, host_name).await
    }

    async fn feed_items(&self, groop_id: GroopId) -> Vec<FeedItem> {
        self.inner.feed_items(groop_id).await
    }
}

#[tokio::test]
async fn every_foreign_at_message_counts_as_a_mention() {
    let groops: Vec<Groop> = ["Ancoats Runners", "Hulme Chess", "Salford Sketchers"]
        .into_iter()
        .map(joined)
        .collect();
    let data = SeedData {
        messages: groops
            .iter()
            .map(|g| message(g, "Sam", "@all meet at the gate", 5, false))
            .collect(),
        groops: groops.clone(),
        ..Default::default()
    };
    let repository = InMemoryGroopRepository::new(data, Duration::ZERO);

    let snapshot = aggregate(&repository, &groops, "Taylor").await;

    assert_eq!(snapshot.counters, InboxCounters { unread: 3, mentions: 3, pinned: 2 });
    assert_eq!(snapshot.threads.len(), 3);
}

#[tokio::test]
async fn unread_counts_every_foreign_message_not_just_the_latest() {
    let groop = joined("Levenshulme Makers");
    let data = SeedData {
        messages: vec![
            message(&groop, "Priya", "first", 40, false),
            message(&groop, "Taylor", "reply", 30, true),
            message(&groop, "Sam", "second", 20, false),
            message(&groop, "Priya", "third", 10, false),
        ],
        groops: vec![groop.clone()],
        ..Default::default()
    };
    let repository = InMemoryGroopRepository::new(data, Duration::ZERO);

    let snapshot = aggregate(&repository, &[groop], "Taylor").await;
    assert_eq!(snapshot.counters.unread, 3);
    assert_eq!(snapshot.counters.mentions, 0);
    assert_eq!(snapshot.counters.pinned, 1);
}

#[tokio::test]
async fn merged_timeline_is_newest_first_and_filterable() {
    let repository = InMemoryGroopRepository::seeded(Duration::ZERO);
    let groops = repository.fetch_my_groops().await;

    let snapshot = aggregate(&repository, &groops, "Taylor").await;

    assert!(snapshot
        .updates
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
    assert!(snapshot
        .visible(UpdateFilter::Announcements)
        .iter()
        .all(|u| u.source == UpdateSource::Announcement));
    assert!(snapshot.visible(UpdateFilter::All).len() <= 6);
}

#[tokio::test]
async fn no_joined_groops_means_an_empty_dashboard() {
    let repository = InMemoryGroopRepository::seeded(Duration::ZERO);
    let snapshot = aggregate(&repository, &[], "Taylor").await;
    assert!(snapshot.updates.is_empty());
    assert!(snapshot.threads.is_empty());
    assert_eq!(snapshot.counters, InboxCounters::default());
}

#[tokio::test(start_paused = true)]
async fn slower_superseded_pass_never_overwrites_the_latest() {
    let slow = joined("Slow Groop");
    let fast = joined("Fast Groop");
    let data = SeedData {
        messages: vec![
            message(&slow, "Sam", "from the slow groop", 1, false),
            message(&fast, "Priya", "from the fast groop", 1, false),
        ],
        groops: vec![slow.clone(), fast.clone()],
        ..Default::default()
    };
    let repository = SlowMessages {
        inner: InMemoryGroopRepository::new(data, Duration::ZERO),
        delays: HashMap::from([(slow.id, Duration::from_secs(5)), (fast.id, Duration::from_millis(10))]),
    };
    let (worker, mut responses) = GroopWorker::new(Arc::new(repository)).spawn();

    let mut dashboard = DashboardState::default();
    let first = dashboard.watcher.observe_joined([slow.id]).unwrap();
    worker
        .post(WorkerMessage::aggregate_updates(first, vec![slow.clone()], "Taylor".into()))
        .unwrap();
    let second = dashboard.watcher.observe_joined([fast.id]).unwrap();
    worker
        .post(WorkerMessage::aggregate_updates(second, vec![fast.clone()], "Taylor".into()))
        .unwrap();

    let mut committed = Vec::new();
    for _ in 0..2 {
        let Some(WorkerResponse::UpdatesAggregated { generation, snapshot }) = responses.recv().await else {
            panic!("expected an aggregation response");
        };
        committed.push((generation, dashboard.commit(generation, snapshot)));
    }

    assert_eq!(committed, [(second, true), (first, false)]);
    assert!(!dashboard.is_loading());
    assert_eq!(dashboard.snapshot.threads.len(), 1);
    assert_eq!(dashboard.snapshot.threads[0].groop_id, fast.id);
}
