//! Dashboard: the merged update timeline, chat thread summaries and inbox
//! counters across every joined groop.
//!
//! ```text
//! joined ids ──► UpdateWatcher ──(generation)──► aggregate() ──► commit
//!                    ▲                              │  per groop: join3(announcements,
//!                    └──── refresh ─────────────────┘             feed, messages)
//! ```
//!
//! A pass is only published once all of its reads have finished, and only if
//! no newer pass has been triggered in the meantime.
//!
//! # Modules
//!
//! - [`update`]: Derived update, thread and counter types plus the filter
//! - [`aggregator`]: Concurrent fan-out over the repository and the merge
//! - [`watcher`]: Generation tokens and the joined-set watcher

pub mod aggregator;
pub mod update;
pub mod watcher;

pub use aggregator::{aggregate, is_mention};
pub use update::{
    ChatThreadSummary, DashboardSnapshot, DashboardUpdate, InboxCounters, UpdateFilter, UpdateSource,
};
pub use watcher::{DashboardState, UpdateWatcher};
