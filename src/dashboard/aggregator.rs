//! Concurrent fan-out over joined groops and the merge into one timeline.

use futures_util::future::{join3, join_all};
use tracing::Instrument;

use super::update::{
    ChatThreadSummary, DashboardSnapshot, DashboardUpdate, InboxCounters, UpdateSource,
};
use crate::app::Route;
use crate::domain::{Announcement, FeedItem, Groop, GroopMessage};
use crate::repository::GroopRepository;

/// Announcements taken from each groop per pass.
const ANNOUNCEMENTS_PER_GROOP: usize = 2;

/// Feed items taken from each groop per pass.
const FEED_ITEMS_PER_GROOP: usize = 2;

/// Upper bound on the pinned counter.
const MAX_PINNED: usize = 2;

/// Raw reads for one groop.
struct GroopActivity<'a> {
    groop: &'a Groop,
    announcements: Vec<Announcement>,
    feed: Vec<FeedItem>,
    messages: Vec<GroopMessage>,
}

/// Whether a message should raise the mention badge for `display_name`.
///
/// Own messages never count. Otherwise a message mentions the user when its
/// body contains `@` or the display name, ignoring case.
#[must_use]
pub fn is_mention(message: &GroopMessage, display_name: &str) -> bool {
    if message.is_from_current_user {
        return false;
    }
    let body = message.body.to_lowercase();
    let name = display_name.trim().to_lowercase();
    body.contains('@') || (!name.is_empty() && body.contains(&name))
}

/// Runs one aggregation pass over `groops`.
///
/// For every groop the announcements, feed items and messages are requested
/// concurrently, and all groops are processed concurrently. The merge runs
/// only once every read has returned.
pub async fn aggregate(
    repository: &dyn GroopRepository,
    groops: &[Groop],
    display_name: &str,
) -> DashboardSnapshot {
    if groops.is_empty() {
        tracing::debug!("no joined groops, dashboard is empty");
        return DashboardSnapshot::default();
    }

    let span = tracing::debug_span!("aggregate", groops = groops.len());
    let activity = join_all(groops.iter().map(|groop| async move {
        let (announcements, feed, mut messages) = join3(
            repository.fetch_announcements(groop.id),
            repository.feed_items(groop.id),
            repository.fetch_messages(groop.id),
        )
        .await;
        GroopMessage::sort_chronologically(&mut messages);
        GroopActivity { groop, announcements, feed, messages }
    }))
    .instrument(span)
    .await;

    let snapshot = merge(&activity, display_name);
    tracing::debug!(
        updates = snapshot.updates.len(),
        threads = snapshot.threads.len(),
        unread = snapshot.counters.unread,
        mentions = snapshot.counters.mentions,
        pinned = snapshot.counters.pinned,
        "aggregation pass complete"
    );
    snapshot
}

fn merge(activity: &[GroopActivity<'_>], display_name: &str) -> DashboardSnapshot {
    let mut updates = Vec::new();
    let mut threads = Vec::new();
    let mut unread = 0;
    let mut mentions = 0;

    for entry in activity {
        let groop = entry.groop;

        updates.extend(entry.announcements.iter().take(ANNOUNCEMENTS_PER_GROOP).map(|announcement| {
            DashboardUpdate {
                id: announcement.id,
                groop_id: groop.id,
                groop_name: groop.name.clone(),
                title: announcement.title.clone(),
                created_at: announcement.created_at,
                source: UpdateSource::Announcement,
                destination: Route::AnnouncementDetail(announcement.id),
            }
        }));

        updates.extend(entry.feed.iter().take(FEED_ITEMS_PER_GROOP).map(|item| DashboardUpdate {
            id: item.id,
            groop_id: groop.id,
            groop_name: groop.name.clone(),
            title: item.message.clone(),
            created_at: item.timestamp,
            source: UpdateSource::Feed,
            destination: Route::GroopDetail(groop.id),
        }));

        for message in entry.messages.iter().filter(|m| !m.is_from_current_user) {
            unread += 1;
            if is_mention(message, display_name) {
                mentions += 1;
            }
        }

        if let Some(latest) = entry.messages.last() {
            updates.push(DashboardUpdate {
                id: latest.id,
                groop_id: groop.id,
                groop_name: groop.name.clone(),
                title: format!("{}: {}", latest.sender_name, latest.body),
                created_at: latest.created_at,
                source: UpdateSource::Message,
                destination: Route::GroopChat { groop_id: groop.id, prefill: None },
            });
            threads.push(ChatThreadSummary {
                groop_id: groop.id,
                groop_name: groop.name.clone(),
                sender_name: latest.sender_name.clone(),
                preview: latest.body.clone(),
                last_activity: latest.created_at,
                is_unread: !latest.is_from_current_user,
                has_mention: is_mention(latest, display_name),
            });
        }
    }

    // sort_by is stable, equal timestamps keep per-groop order
    updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    threads.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));

    let pinned = threads.len().min(MAX_PINNED);
    DashboardSnapshot {
        updates,
        threads,
        counters: InboxCounters { unread, mentions, pinned },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::repository::{InMemoryGroopRepository, SeedData};

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

    #[test]
    fn mention_predicate() {
        let groop = Groop::new("g", "c", "l");
        assert!(is_mention(&message(&groop, "Sam", "see you @ six", 1, false), "Taylor"));
        assert!(is_mention(&message(&groop, "Sam", "ask TAYLOR", 1, false), "Taylor"));
        assert!(!is_mention(&message(&groop, "Sam", "hello all", 1, false), "Taylor"));
        assert!(!is_mention(&message(&groop, "Taylor", "@everyone", 1, true), "Taylor"));
        assert!(!is_mention(&message(&groop, "Sam", "hello", 1, false), "  "));
    }

    #[tokio::test]
    async fn zero_groops_yield_an_empty_snapshot() {
        let repository = InMemoryGroopRepository::seeded(Duration::ZERO);
        let snapshot = aggregate(&repository, &[], "Taylor").await;
        assert_eq!(snapshot, DashboardSnapshot::default());
    }

    #[tokio::test]
    async fn latest_message_drives_thread_and_update() {
        let groop = Groop::new("Chorlton Readers", "Books", "Chorlton");
        let data = SeedData {
            groops: vec![groop.clone()],
            messages: vec![
                message(&groop, "Priya", "newest", 1, false),
                message(&groop, "Sam", "oldest", 30, false),
                message(&groop, "Taylor", "middle", 10, true),
            ],
            ..Default::default()
        };
        let repository = InMemoryGroopRepository::new(data, Duration::ZERO);

        let snapshot = aggregate(&repository, &[groop.clone()], "Taylor").await;

        assert_eq!(snapshot.threads.len(), 1);
        assert_eq!(snapshot.threads[0].preview, "newest");
        assert!(snapshot.threads[0].is_unread);
        assert_eq!(snapshot.counters, InboxCounters { unread: 2, mentions: 0, pinned: 1 });

        let messages: Vec<_> = snapshot
            .updates
            .iter()
            .filter(|u| u.source == UpdateSource::Message)
            .collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].title, "Priya: newest");
        assert_eq!(
            messages[0].destination,
            Route::GroopChat { groop_id: groop.id, prefill: None }
        );
    }

    #[tokio::test]
    async fn caps_announcements_and_feed_per_groop() {
        let repository = InMemoryGroopRepository::seeded(Duration::ZERO);
        let joined = repository.fetch_my_groops().await;
        let groop = joined[0].clone();
        for i in 0..4 {
            repository.create_announcement(groop.id, &format!("notice {i}"), "body").await;
        }

        let snapshot = aggregate(&repository, &[groop.clone()], "Taylor").await;
        let count = |source| snapshot.updates.iter().filter(|u| u.source == source).count();
        assert_eq!(count(UpdateSource::Announcement), 2);
        assert_eq!(count(UpdateSource::Feed), 2);
        assert!(snapshot
            .updates
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }
}
