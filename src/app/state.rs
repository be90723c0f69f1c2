//! Root application state.
//!
//! [`AppState`] is the single owner of everything the screens display: the
//! groop lists, the discovery query and its derived view, the sheet, the map
//! camera and the dashboard. It is mutated only by
//! [`handle_event`](super::handle_event); derived fields are recomputed
//! eagerly by the mutating methods so they can never drift from their inputs.
//!
//! # State Components
//!
//! - **Groops**: Joined and discovery lists as last loaded by the worker
//! - **Discovery**: Query, presentation mode and the filtered view
//! - **Sheet**: Detent, drag translation and the viewport it is laid out in
//! - **Map**: Camera region, selected pin and the user's last known position
//! - **Dashboard**: Latest committed snapshot and the generation watcher
//! - **Screens**: Contents of pushed routes as the worker loads them

use std::collections::HashSet;

use chrono::Utc;

use super::modes::Tab;
use super::route::Route;
use super::screens::ScreenState;
use crate::dashboard::DashboardState;
use crate::discovery::{
    categories, filter_groops, DiscoveryMode, DiscoveryQuery, MapRegion, SortMode,
};
use crate::domain::{Groop, GroopId};
use crate::location::Coordinate;
use crate::sheet::{SheetHeights, SheetMetrics, SheetState};
use crate::ui::viewmodel::{
    AnnouncementViewModel, ChatLine, ChatViewModel, DashboardViewModel, DiscoveryViewModel, EmptyState,
    GroopDetailViewModel, GroopRow, MembersViewModel, MyGroopsViewModel, ScreenViewModel, SheetLayout,
};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_name: String,
}

/// Container dimensions the sheet is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub safe_area_top: f64,
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub tab: Tab,

    /// Joined groops, sorted by name.
    pub my_groops: Vec<Groop>,

    /// Groops not joined yet, largest first.
    pub discovery_groops: Vec<Groop>,

    /// True until the first `GroopsLoaded` response arrives.
    pub is_loading_groops: bool,

    /// Sequence of the newest `LoadGroops` request issued.
    pub groops_requested: u64,

    /// Sequence of the load whose lists are shown; older responses are dropped.
    pub groops_applied: u64,

    pub discovery_query: DiscoveryQuery,
    pub discovery_mode: DiscoveryMode,

    /// `discovery_groops` after `discovery_query`, recomputed on every change.
    pub filtered_groops: Vec<Groop>,

    /// Search, category chip and sort of the My Groops tab.
    pub my_groops_query: DiscoveryQuery,

    pub viewport: Viewport,
    pub sheet_metrics: SheetMetrics,
    pub sheet: SheetState,

    pub camera: MapRegion,
    pub selected_groop: Option<GroopId>,
    pub user_position: Option<Coordinate>,

    /// Groops with a join request in flight; guards against double taps.
    pub joining: HashSet<GroopId>,

    pub dashboard: DashboardState,
    pub screens: ScreenState,

    /// Last worker failure, shown as a banner until the next success.
    pub last_error: Option<String>,
}

impl AppState {
    /// Creates an empty state for `display_name` laid out in `viewport`.
    ///
    /// # Example
    ///
    /// ```
    /// use groop_core::app::{AppState, Viewport};
    /// use groop_core::sheet::SheetDetent;
    ///
    /// let state = AppState::new("Taylor", Viewport { height: 800.0, safe_area_top: 47.0 });
    /// assert!(state.is_loading_groops);
    /// assert_eq!(state.sheet.detent, SheetDetent::Medium);
    /// ```
    #[must_use]
    pub fn new(display_name: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            session: Session { display_name: display_name.into() },
            tab: Tab::default(),
            my_groops: Vec::new(),
            discovery_groops: Vec::new(),
            is_loading_groops: true,
            groops_requested: 0,
            groops_applied: 0,
            discovery_query: DiscoveryQuery::default(),
            discovery_mode: DiscoveryMode::default(),
            filtered_groops: Vec::new(),
            my_groops_query: DiscoveryQuery { sort: SortMode::ByMemberCount, ..DiscoveryQuery::default() },
            viewport,
            sheet_metrics: SheetMetrics::default(),
            sheet: SheetState::default(),
            camera: MapRegion::default(),
            selected_groop: None,
            user_position: None,
            joining: HashSet::new(),
            dashboard: DashboardState::default(),
            screens: ScreenState::default(),
            last_error: None,
        }
    }

    /// Detent heights for the current viewport. Never cached.
    #[must_use]
    pub fn sheet_heights(&self) -> SheetHeights {
        SheetHeights::for_container(self.viewport.height, &self.sheet_metrics)
    }

    /// Issues the sequence number for a new `LoadGroops` request.
    pub fn request_groops(&mut self) -> u64 {
        self.groops_requested += 1;
        self.groops_requested
    }

    /// Whether the load answering `sequence` is newer than the lists shown.
    #[must_use]
    pub const fn accepts_groops(&self, sequence: u64) -> bool {
        sequence > self.groops_applied
    }

    /// Replaces both groop lists and re-derives the discovery view.
    pub fn set_groops(&mut self, my_groops: Vec<Groop>, discovery_groops: Vec<Groop>) {
        self.my_groops = my_groops;
        self.discovery_groops = discovery_groops;
        self.is_loading_groops = false;

        if let Some(id) = self.selected_groop {
            if self.find_groop(id).is_none() {
                self.selected_groop = None;
            }
        }
        self.apply_discovery_filter();
    }

    /// Recomputes `filtered_groops` from the discovery list and query.
    pub fn apply_discovery_filter(&mut self) {
        self.filtered_groops = filter_groops(&self.discovery_groops, &self.discovery_query);
    }

    /// Discovery results shown in the current mode.
    #[must_use]
    pub fn visible_discovery(&self) -> &[Groop] {
        let limit = self
            .discovery_mode
            .result_limit()
            .unwrap_or(self.filtered_groops.len());
        &self.filtered_groops[..limit.min(self.filtered_groops.len())]
    }

    /// Joined groops after the My Groops search, chip and sort.
    #[must_use]
    pub fn my_groops_filtered(&self) -> Vec<Groop> {
        filter_groops(&self.my_groops, &self.my_groops_query)
    }

    /// Ids of every joined groop, in list order.
    #[must_use]
    pub fn joined_ids(&self) -> Vec<GroopId> {
        self.my_groops.iter().map(|groop| groop.id).collect()
    }

    /// Looks a groop up in either list.
    #[must_use]
    pub fn find_groop(&self, id: GroopId) -> Option<&Groop> {
        self.my_groops
            .iter()
            .chain(&self.discovery_groops)
            .find(|groop| groop.id == id)
    }

    /// Dashboard screen contents.
    #[must_use]
    pub fn compute_dashboard_viewmodel(&self) -> DashboardViewModel {
        let snapshot = &self.dashboard.snapshot;
        let updates: Vec<_> = snapshot
            .visible(self.dashboard.filter)
            .into_iter()
            .cloned()
            .collect();

        let empty_state = if self.dashboard.is_loading() && snapshot.updates.is_empty() {
            None
        } else if self.my_groops.is_empty() {
            Some(EmptyState::new(
                "No groops yet",
                "Join a groop from Discover to see its updates here.",
            ))
        } else if updates.is_empty() {
            Some(EmptyState::new("All caught up", "Nothing new in your groops."))
        } else {
            None
        };

        DashboardViewModel {
            greeting: format!("Hi, {}", self.session.display_name),
            joined_count: self.my_groops.len(),
            discovery_count: self.discovery_groops.len(),
            counters: snapshot.counters,
            filter: self.dashboard.filter,
            updates,
            threads: snapshot.threads.clone(),
            is_loading: self.dashboard.is_loading(),
            empty_state,
        }
    }

    /// Discovery screen contents, including the sheet layout.
    #[must_use]
    pub fn compute_discovery_viewmodel(&self) -> DiscoveryViewModel {
        let heights = self.sheet_heights();
        let visible = self.visible_discovery();

        let empty_state = if self.is_loading_groops {
            None
        } else if self.discovery_groops.is_empty() {
            Some(EmptyState::new("You're in every groop", "Start a new one to grow the community."))
        } else if visible.is_empty() {
            Some(EmptyState::new("No matches", "Try another search or category."))
        } else {
            None
        };

        DiscoveryViewModel {
            query: self.discovery_query.text.clone(),
            category: self.discovery_query.category.label().to_string(),
            category_chips: crate::discovery::DISCOVERY_CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
            sort: self.discovery_query.sort,
            mode: self.discovery_mode,
            featured: crate::discovery::featured(&self.filtered_groops)
                .iter()
                .map(|groop| GroopRow::new(groop, self.is_selected(groop), self.joining.contains(&groop.id)))
                .collect(),
            rows: visible
                .iter()
                .map(|groop| GroopRow::new(groop, self.is_selected(groop), self.joining.contains(&groop.id)))
                .collect(),
            total_matches: self.filtered_groops.len(),
            camera: self.camera,
            sheet: SheetLayout {
                detent: self.sheet.detent,
                offset: self.sheet.offset(&heights),
                visible_height: self.sheet.visible_height(&heights),
                controls_y: self
                    .sheet
                    .controls_y(self.viewport.height, self.viewport.safe_area_top, &heights),
                is_dragging: self.sheet.is_dragging,
            },
            empty_state,
        }
    }

    /// My Groops screen contents.
    #[must_use]
    pub fn compute_my_groops_viewmodel(&self) -> MyGroopsViewModel {
        let rows: Vec<_> = self
            .my_groops_filtered()
            .iter()
            .map(|groop| GroopRow::new(groop, self.is_selected(groop), false))
            .collect();
        let empty_state = if self.is_loading_groops || !rows.is_empty() {
            None
        } else if self.my_groops.is_empty() {
            Some(EmptyState::new("No groops yet", "Discover a groop nearby or start your own."))
        } else {
            Some(EmptyState::new("No matches", "Try another search or category."))
        };

        // First of equal sizes wins, matching the list order.
        let top_groop = self
            .my_groops
            .iter()
            .fold(None::<&Groop>, |top, groop| match top {
                Some(best) if best.member_count >= groop.member_count => Some(best),
                _ => Some(groop),
            })
            .map(|groop| groop.name.clone());

        MyGroopsViewModel {
            query: self.my_groops_query.text.clone(),
            sort: self.my_groops_query.sort,
            categories: categories(&self.my_groops),
            selected_category: self.my_groops_query.category.label().to_string(),
            total_members: self.my_groops.iter().map(|groop| u64::from(groop.member_count)).sum(),
            top_groop,
            rows,
            empty_state,
        }
    }

    /// Contents of the screen at `route`, or `Loading` until its data arrives.
    #[must_use]
    pub fn compute_screen_viewmodel(&self, route: &Route) -> ScreenViewModel {
        let now = Utc::now();
        let loaded = match route {
            Route::GroopDetail(id) => self.screens.detail_for(*id).map(|detail| {
                ScreenViewModel::GroopDetail(GroopDetailViewModel::new(
                    &detail.groop,
                    &detail.announcements,
                    &detail.feed,
                    &detail.messages,
                    &detail.members,
                    now,
                ))
            }),
            Route::GroopChat { groop_id, prefill } => self.screens.chat_for(*groop_id).map(|chat| {
                ScreenViewModel::Chat(ChatViewModel {
                    groop_id: chat.groop.id,
                    groop_name: chat.groop.name.clone(),
                    lines: chat.messages.iter().map(|m| ChatLine::new(m, now)).collect(),
                    draft: prefill.clone().unwrap_or_default(),
                })
            }),
            Route::GroopMembers(id) => self
                .screens
                .members_for(*id)
                .map(|list| ScreenViewModel::Members(MembersViewModel::new(&list.groop, &list.members))),
            Route::AnnouncementDetail(id) => self.screens.announcement_for(*id).map(|detail| {
                ScreenViewModel::Announcement(AnnouncementViewModel {
                    title: detail.announcement.title.clone(),
                    body: detail.announcement.body.clone(),
                    groop_name: detail.groop.as_ref().map(|groop| groop.name.clone()),
                    posted: crate::domain::time_ago(detail.announcement.created_at, now),
                    attendee_count: detail.members.len(),
                })
            }),
        };
        loaded.unwrap_or_else(|| ScreenViewModel::Loading(route.clone()))
    }

    fn is_selected(&self, groop: &Groop) -> bool {
        self.selected_groop == Some(groop.id)
    }
}
