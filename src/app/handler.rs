//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It never awaits
//! and never touches the repository directly: work that needs I/O is
//! returned as [`Action`]s and its outcome comes back later as
//! [`Event::WorkerResponse`].
//!
//! # Event Types
//!
//! - **Lifecycle**: `Refresh`, `RefreshDashboard`, `ViewportResized`
//! - **Discovery**: `SearchChanged`, `CategorySelected`, `SortChanged`, `ToggleDiscoveryMode`
//! - **My Groops**: `MyGroopsSearchChanged`, `MyGroopsCategorySelected`, `MyGroopsSortChanged`
//! - **Sheet**: `SheetDragChanged`, `SheetDragEnded`, `SetSheetDetent`
//! - **Map**: `FocusGroop`, `CenterOnUser`, `LocationUpdated`
//! - **Groops**: `JoinGroop`, `CreateGroop`, `PostAnnouncement`, `SendMessage`
//! - **Navigation**: `SelectTab`, `OpenRoute`, `OpenDeepLink`, `OpenUpdate`
//! - **Worker**: `WorkerResponse` with typed response variants

use super::modes::Tab;
use super::route::Route;
use super::{Action, AppState};
use crate::dashboard::UpdateFilter;
use crate::discovery::{CategoryFilter, MapRegion, SortMode};
use crate::domain::{GroopError, GroopId, Result};
use crate::location::Coordinate;
use crate::sheet::{SheetDetent, SheetEvent};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Everything that can happen to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Reloads both groop lists from the repository.
    Refresh,
    /// Forces a new dashboard aggregation pass.
    RefreshDashboard,
    /// The container was resized or rotated.
    ViewportResized { height: f64, safe_area_top: f64 },
    SelectTab(Tab),

    /// Free-text search on the discovery screen.
    SearchChanged(String),
    CategorySelected(CategoryFilter),
    SortChanged(SortMode),
    ToggleDiscoveryMode,
    /// Free-text search on the My Groops tab.
    MyGroopsSearchChanged(String),
    /// Category chip on the My Groops tab.
    MyGroopsCategorySelected(CategoryFilter),
    MyGroopsSortChanged(SortMode),

    /// A drag sample with the translation since the gesture began.
    SheetDragChanged(f64),
    /// The drag ended with this final translation.
    SheetDragEnded(f64),
    SetSheetDetent(SheetDetent),

    /// A groop was tapped on the map or in the sheet.
    FocusGroop(GroopId),
    /// The locate-me button was tapped.
    CenterOnUser,
    LocationUpdated(Coordinate),

    JoinGroop(GroopId),
    CreateGroop { name: String, category: String, location: String },
    PostAnnouncement { groop_id: GroopId, title: String, body: String },
    SendMessage { groop_id: GroopId, body: String },

    SetUpdateFilter(UpdateFilter),
    /// A dashboard update row was tapped; the index is into the visible rows.
    OpenUpdate(usize),
    OpenRoute(Route),
    OpenDeepLink(String),

    WorkerResponse(WorkerResponse),
}

/// Processes `event`, mutates `state` and returns the actions to run.
///
/// The boolean is true when the state changed in a way that needs a re-render.
///
/// # Errors
///
/// Returns [`GroopError::NotFound`] when an event refers to a groop or row
/// the state does not know about.
///
/// # Example
///
/// ```
/// use groop_core::app::{handle_event, Action, AppState, Event, Viewport};
///
/// let mut state = AppState::new("Taylor", Viewport { height: 800.0, safe_area_top: 47.0 });
/// let (render, actions) = handle_event(&mut state, &Event::Refresh)?;
/// assert!(!render);
/// assert!(matches!(actions[0], Action::PostToWorker(_)));
/// # Ok::<(), groop_core::domain::GroopError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Refresh => Ok((false, vec![load_groops_action(state)])),
        Event::RefreshDashboard => {
            let generation = state.dashboard.watcher.refresh();
            Ok((true, vec![aggregate_action(state, generation)]))
        }
        Event::ViewportResized { height, safe_area_top } => {
            if !is_valid_length(*height) || !is_valid_length(*safe_area_top) {
                tracing::debug!(height, safe_area_top, "ignoring invalid viewport");
                return Ok((false, vec![]));
            }
            state.viewport.height = *height;
            state.viewport.safe_area_top = *safe_area_top;
            Ok((true, vec![]))
        }
        Event::SelectTab(tab) => {
            state.tab = *tab;
            Ok((true, vec![]))
        }

        Event::SearchChanged(text) => {
            state.discovery_query.text.clone_from(text);
            state.apply_discovery_filter();
            Ok((true, vec![]))
        }
        Event::CategorySelected(category) => {
            state.discovery_query.category = category.clone();
            state.apply_discovery_filter();
            Ok((true, vec![]))
        }
        Event::SortChanged(sort) => {
            state.discovery_query.sort = *sort;
            state.apply_discovery_filter();
            Ok((true, vec![]))
        }
        Event::ToggleDiscoveryMode => {
            state.discovery_mode = state.discovery_mode.toggled();
            tracing::debug!(mode = ?state.discovery_mode, "discovery mode toggled");
            Ok((true, vec![]))
        }
        Event::MyGroopsSearchChanged(text) => {
            state.my_groops_query.text.clone_from(text);
            Ok((true, vec![]))
        }
        Event::MyGroopsCategorySelected(category) => {
            state.my_groops_query.category = category.clone();
            Ok((true, vec![]))
        }
        Event::MyGroopsSortChanged(sort) => {
            state.my_groops_query.sort = *sort;
            Ok((true, vec![]))
        }

        Event::SheetDragChanged(translation) => {
            apply_sheet(state, SheetEvent::DragChanged { translation: *translation });
            Ok((true, vec![]))
        }
        Event::SheetDragEnded(translation) => {
            apply_sheet(state, SheetEvent::DragEnded { translation: *translation });
            Ok((true, vec![]))
        }
        Event::SetSheetDetent(detent) => {
            apply_sheet(state, SheetEvent::SetDetent(*detent));
            Ok((true, vec![]))
        }

        Event::FocusGroop(id) => {
            state.camera = state
                .find_groop(*id)
                .map(|groop| MapRegion::focus(&groop.location))
                .ok_or_else(|| GroopError::NotFound(format!("groop {id}")))?;
            state.selected_groop = Some(*id);
            apply_sheet(state, SheetEvent::Focus);
            Ok((true, vec![]))
        }
        Event::CenterOnUser => match state.user_position {
            Some(position) => {
                state.camera = MapRegion::around_user(position);
                Ok((true, vec![]))
            }
            None => {
                tracing::debug!("no known position, requesting location permission");
                Ok((false, vec![Action::RequestLocationPermission]))
            }
        },
        Event::LocationUpdated(position) => {
            let first_fix = state.user_position.is_none();
            state.user_position = Some(*position);
            if first_fix {
                state.camera = MapRegion::around_user(*position);
            }
            Ok((true, vec![]))
        }

        Event::JoinGroop(id) => {
            if state.joining.contains(id) {
                tracing::debug!(groop_id = %id, "join already in flight");
                return Ok((false, vec![]));
            }
            if state.my_groops.iter().any(|groop| groop.id == *id) {
                tracing::debug!(groop_id = %id, "already joined");
                return Ok((false, vec![]));
            }
            state.joining.insert(*id);
            Ok((true, vec![Action::PostToWorker(WorkerMessage::join_groop(*id))]))
        }
        Event::CreateGroop { name, category, location } => {
            let name = name.trim();
            if name.is_empty() {
                tracing::debug!("ignoring create with empty name");
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::create_groop(
                    name.to_string(),
                    category.trim().to_string(),
                    location.trim().to_string(),
                    state.session.display_name.clone(),
                ))],
            ))
        }
        Event::PostAnnouncement { groop_id, title, body } => {
            if title.trim().is_empty() {
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::create_announcement(
                    *groop_id,
                    title.trim().to_string(),
                    body.trim().to_string(),
                ))],
            ))
        }
        Event::SendMessage { groop_id, body } => {
            if body.trim().is_empty() {
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::send_message(
                    *groop_id,
                    body.trim().to_string(),
                    state.session.display_name.clone(),
                ))],
            ))
        }

        Event::SetUpdateFilter(filter) => {
            state.dashboard.filter = *filter;
            Ok((true, vec![]))
        }
        Event::OpenUpdate(index) => {
            let visible = state.dashboard.snapshot.visible(state.dashboard.filter);
            let update = visible
                .get(*index)
                .ok_or_else(|| GroopError::NotFound(format!("dashboard row {index}")))?;
            Ok((false, open_route(update.destination.clone())))
        }
        Event::OpenRoute(route) => Ok((false, open_route(route.clone()))),
        Event::OpenDeepLink(url) => match Route::from_deep_link(url) {
            Some(route) => Ok((false, open_route(route))),
            None => {
                tracing::debug!(url = %url, "ignoring unrecognised deep link");
                Ok((false, vec![]))
            }
        },

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn is_valid_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Pushes `route` and asks the worker for its contents.
fn open_route(route: Route) -> Vec<Action> {
    let load = WorkerMessage::for_route(&route);
    vec![Action::Navigate(route), Action::PostToWorker(load)]
}

fn load_groops_action(state: &mut AppState) -> Action {
    let sequence = state.request_groops();
    Action::PostToWorker(WorkerMessage::load_groops(sequence))
}

fn apply_sheet(state: &mut AppState, event: SheetEvent) {
    let heights = state.sheet_heights();
    state.sheet = state.sheet.apply(event, &heights);
}

fn aggregate_action(state: &AppState, generation: u64) -> Action {
    Action::PostToWorker(WorkerMessage::aggregate_updates(
        generation,
        state.my_groops.clone(),
        state.session.display_name.clone(),
    ))
}

fn reload_and_refresh(state: &mut AppState) -> Vec<Action> {
    let load = load_groops_action(state);
    let generation = state.dashboard.watcher.refresh();
    vec![load, aggregate_action(state, generation)]
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::GroopsLoaded { sequence, my_groops, discovery_groops } => {
            if !state.accepts_groops(*sequence) {
                tracing::debug!(
                    sequence,
                    applied = state.groops_applied,
                    "dropping superseded groop lists"
                );
                return Ok((false, vec![]));
            }
            state.groops_applied = *sequence;
            tracing::debug!(
                sequence,
                joined = my_groops.len(),
                discovery = discovery_groops.len(),
                "groops loaded"
            );
            state.set_groops(my_groops.clone(), discovery_groops.clone());
            state.last_error = None;

            let joined = state.joined_ids();
            let actions = state
                .dashboard
                .watcher
                .observe_joined(joined)
                .map(|generation| aggregate_action(state, generation))
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        WorkerResponse::GroopJoined { groop_id } => {
            state.joining.remove(groop_id);
            Ok((true, vec![load_groops_action(state)]))
        }
        WorkerResponse::GroopCreated { groop } => {
            tracing::debug!(groop_id = %groop.id, name = %groop.name, "groop created");
            let mut actions = vec![load_groops_action(state)];
            actions.extend(open_route(Route::GroopDetail(groop.id)));
            Ok((false, actions))
        }
        WorkerResponse::AnnouncementCreated { announcement } => {
            tracing::debug!(announcement_id = %announcement.id, "announcement created");
            state.screens.record_announcement(announcement);
            let generation = state.dashboard.watcher.refresh();
            Ok((true, vec![aggregate_action(state, generation)]))
        }
        WorkerResponse::MessageSent { message } => {
            tracing::debug!(message_id = %message.id, "message sent");
            state.screens.record_message(message);
            let generation = state.dashboard.watcher.refresh();
            Ok((true, vec![aggregate_action(state, generation)]))
        }
        WorkerResponse::GroopDetailLoaded { detail } => {
            tracing::debug!(groop_id = %detail.groop.id, messages = detail.messages.len(), "detail loaded");
            state.screens.detail = Some(detail.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::ChatLoaded { chat } => {
            state.screens.chat = Some(chat.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::MembersLoaded { members } => {
            state.screens.members = Some(members.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::AnnouncementLoaded { detail } => {
            state.screens.announcement = Some(detail.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::UpdatesAggregated { generation, snapshot } => {
            let committed = state.dashboard.commit(*generation, snapshot.clone());
            Ok((committed, vec![]))
        }
        WorkerResponse::Error { message, groop_id } => {
            tracing::error!(error = %message, "worker operation failed");
            if let Some(id) = groop_id {
                state.joining.remove(id);
            }
            state.last_error = Some(message.clone());
            Ok((true, vec![]))
        }
    }
}

/// Full reload used after the app returns to the foreground.
///
/// Reloads the groop lists and forces a dashboard pass even when the joined
/// set is unchanged.
pub fn resume(state: &mut AppState) -> Vec<Action> {
    reload_and_refresh(state)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::app::Viewport;
    use crate::app::screens::{ChatTranscript, MemberList};
    use crate::dashboard::DashboardSnapshot;
    use crate::domain::{Groop, GroopMessage};
    use crate::ui::ScreenViewModel;

    fn state() -> AppState {
        AppState::new("Taylor", Viewport { height: 800.0, safe_area_top: 47.0 })
    }

    fn joined(name: &str) -> Groop {
        Groop::new(name, "Fitness", "Ancoats")
    }

    fn unjoined(name: &str) -> Groop {
        Groop { is_joined: false, ..Groop::new(name, "Games", "Chorlton") }
    }

    fn loaded(sequence: u64, my: Vec<Groop>, discovery: Vec<Groop>) -> Event {
        Event::WorkerResponse(WorkerResponse::GroopsLoaded { sequence, my_groops: my, discovery_groops: discovery })
    }

    /// Handles a load answering the next request, as the worker would send it.
    fn load(state: &mut AppState, my: Vec<Groop>, discovery: Vec<Groop>) -> Result<(bool, Vec<Action>)> {
        let sequence = state.request_groops();
        handle_event(state, &loaded(sequence, my, discovery))
    }

    fn aggregate_generation(actions: &[Action]) -> Option<u64> {
        actions.iter().find_map(|action| match action {
            Action::PostToWorker(WorkerMessage::AggregateUpdates { generation, .. }) => Some(*generation),
            _ => None,
        })
    }

    #[test]
    fn loading_triggers_a_pass_only_when_the_joined_set_changes() {
        let mut state = state();
        let mine = vec![joined("Runners")];

        let (_, first) = load(&mut state, mine.clone(), vec![]).unwrap();
        assert_eq!(aggregate_generation(&first), Some(1));
        assert!(state.dashboard.is_loading());

        let (_, again) = load(&mut state, mine.clone(), vec![]).unwrap();
        assert_eq!(aggregate_generation(&again), None);

        let mut more = mine;
        more.push(joined("Readers"));
        let (_, changed) = load(&mut state, more, vec![]).unwrap();
        assert_eq!(aggregate_generation(&changed), Some(2));
    }

    #[test]
    fn stale_aggregation_is_not_rendered() {
        let mut state = state();
        let (_, _) = handle_event(&mut state, &Event::RefreshDashboard).unwrap();
        let (_, _) = handle_event(&mut state, &Event::RefreshDashboard).unwrap();

        let stale = Event::WorkerResponse(WorkerResponse::UpdatesAggregated {
            generation: 1,
            snapshot: DashboardSnapshot::default(),
        });
        let (render, _) = handle_event(&mut state, &stale).unwrap();
        assert!(!render);
        assert!(state.dashboard.is_loading());

        let fresh = Event::WorkerResponse(WorkerResponse::UpdatesAggregated {
            generation: 2,
            snapshot: DashboardSnapshot::default(),
        });
        let (render, _) = handle_event(&mut state, &fresh).unwrap();
        assert!(render);
        assert!(!state.dashboard.is_loading());
    }

    #[test]
    fn join_is_deduplicated_while_in_flight() {
        let mut state = state();
        let target = unjoined("Board Games");
        load(&mut state, vec![], vec![target.clone()]).unwrap();

        let (_, first) = handle_event(&mut state, &Event::JoinGroop(target.id)).unwrap();
        assert_eq!(first.len(), 1);
        let (_, second) = handle_event(&mut state, &Event::JoinGroop(target.id)).unwrap();
        assert!(second.is_empty());

        let joined = Event::WorkerResponse(WorkerResponse::GroopJoined { groop_id: target.id });
        let (_, after) = handle_event(&mut state, &joined).unwrap();
        assert!(state.joining.is_empty());
        assert_eq!(after, vec![Action::PostToWorker(WorkerMessage::load_groops(state.groops_requested))]);
    }

    #[test]
    fn failed_join_clears_the_in_flight_marker() {
        let mut state = state();
        let id = Uuid::new_v4();
        handle_event(&mut state, &Event::JoinGroop(id)).unwrap();
        let failed = Event::WorkerResponse(WorkerResponse::Error {
            message: "not found".into(),
            groop_id: Some(id),
        });
        handle_event(&mut state, &failed).unwrap();
        assert!(state.joining.is_empty());
        assert_eq!(state.last_error.as_deref(), Some("not found"));
    }

    #[test]
    fn focus_moves_camera_and_settles_sheet() {
        let mut state = state();
        let target = unjoined("Chess");
        load(&mut state, vec![], vec![target.clone()]).unwrap();
        handle_event(&mut state, &Event::SetSheetDetent(SheetDetent::Full)).unwrap();

        handle_event(&mut state, &Event::FocusGroop(target.id)).unwrap();
        assert_eq!(state.sheet.detent, SheetDetent::Medium);
        assert_eq!(state.selected_groop, Some(target.id));
        assert_eq!(state.camera, MapRegion::focus("Chorlton"));
    }

    #[test]
    fn focus_on_unknown_groop_is_an_error() {
        let mut state = state();
        let result = handle_event(&mut state, &Event::FocusGroop(Uuid::new_v4()));
        assert!(matches!(result, Err(GroopError::NotFound(_))));
    }

    #[test]
    fn center_on_user_asks_for_permission_without_a_fix() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::CenterOnUser).unwrap();
        assert_eq!(actions, vec![Action::RequestLocationPermission]);

        let here = Coordinate::new(53.47, -2.25);
        handle_event(&mut state, &Event::LocationUpdated(here)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::CenterOnUser).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.camera, MapRegion::around_user(here));
    }

    #[test]
    fn sheet_drag_round_trip() {
        let mut state = state();
        handle_event(&mut state, &Event::SheetDragChanged(250.0)).unwrap();
        assert!(state.sheet.is_dragging);
        handle_event(&mut state, &Event::SheetDragEnded(500.0)).unwrap();
        assert_eq!(state.sheet.detent, SheetDetent::Peek);
        assert_eq!(state.sheet.translation, 0.0);
    }

    #[test]
    fn deep_links() {
        let mut state = state();
        let id = Uuid::new_v4();
        let (_, actions) =
            handle_event(&mut state, &Event::OpenDeepLink(format!("yourgroop://groop/{id}"))).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Navigate(Route::GroopDetail(id)),
                Action::PostToWorker(WorkerMessage::load_groop_detail(id)),
            ]
        );

        let (_, ignored) = handle_event(&mut state, &Event::OpenDeepLink("mailto:x".into())).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut state = state();
        let id = Uuid::new_v4();
        let (_, a) = handle_event(&mut state, &Event::SendMessage { groop_id: id, body: "  ".into() }).unwrap();
        let (_, b) = handle_event(
            &mut state,
            &Event::CreateGroop { name: " ".into(), category: "Arts".into(), location: "Ancoats".into() },
        )
        .unwrap();
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn an_older_load_never_overwrites_a_newer_one() {
        let mut state = state();
        let stale = state.request_groops();
        let fresh = state.request_groops();

        let (render, _) = handle_event(&mut state, &loaded(fresh, vec![joined("Runners")], vec![])).unwrap();
        assert!(render);
        let (render, actions) = handle_event(&mut state, &loaded(stale, vec![], vec![])).unwrap();
        assert!(!render && actions.is_empty());
        assert_eq!(state.my_groops.len(), 1);
        assert_eq!(state.groops_applied, fresh);
    }

    #[test]
    fn every_groop_load_gets_a_new_sequence() {
        let mut state = state();
        let (_, refresh) = handle_event(&mut state, &Event::Refresh).unwrap();
        let (_, again) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert_eq!(refresh, vec![Action::PostToWorker(WorkerMessage::load_groops(1))]);
        assert_eq!(again, vec![Action::PostToWorker(WorkerMessage::load_groops(2))]);
    }

    #[test]
    fn opening_a_route_loads_it_and_the_result_is_shown() {
        let mut state = state();
        let groop = joined("Runners");
        let route = Route::GroopMembers(groop.id);
        let (_, actions) = handle_event(&mut state, &Event::OpenRoute(route.clone())).unwrap();
        assert_eq!(actions[1], Action::PostToWorker(WorkerMessage::load_members(groop.id)));
        assert!(matches!(state.compute_screen_viewmodel(&route), ScreenViewModel::Loading(_)));

        let members = MemberList { groop: groop.clone(), members: vec![] };
        let (render, _) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::MembersLoaded { members })).unwrap();
        assert!(render);
        let ScreenViewModel::Members(vm) = state.compute_screen_viewmodel(&route) else {
            panic!("members screen should be loaded");
        };
        assert_eq!(vm.groop_name, "Runners");
    }

    #[test]
    fn sent_messages_join_the_open_chat() {
        let mut state = state();
        let groop = joined("Runners");
        state.screens.chat = Some(ChatTranscript { groop: groop.clone(), messages: vec![] });
        let message = GroopMessage {
            id: Uuid::new_v4(),
            groop_id: groop.id,
            sender_name: "Taylor".into(),
            body: "On my way".into(),
            created_at: chrono::Utc::now(),
            is_from_current_user: true,
        };
        handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::MessageSent { message })).unwrap();
        assert_eq!(state.screens.chat_for(groop.id).map(|chat| chat.messages.len()), Some(1));
    }

    #[test]
    fn non_finite_viewport_is_ignored() {
        let mut state = state();
        for height in [f64::NAN, f64::INFINITY, -1.0] {
            let (render, _) =
                handle_event(&mut state, &Event::ViewportResized { height, safe_area_top: 0.0 }).unwrap();
            assert!(!render);
        }
        assert_eq!(state.viewport.height, 800.0);
        assert!(state.sheet_heights().medium.is_finite());
    }

    #[test]
    fn my_groops_search_and_sort() {
        let mut state = state();
        let mut big = joined("Runners");
        big.member_count = 30;
        load(&mut state, vec![joined("Readers"), big], vec![]).unwrap();

        let names = |state: &AppState| -> Vec<String> {
            state.compute_my_groops_viewmodel().rows.into_iter().map(|row| row.name).collect()
        };
        assert_eq!(names(&state), ["Runners", "Readers"]);
        handle_event(&mut state, &Event::MyGroopsSortChanged(SortMode::ByName)).unwrap();
        assert_eq!(names(&state), ["Readers", "Runners"]);
        handle_event(&mut state, &Event::MyGroopsSearchChanged("  READ ".into())).unwrap();
        assert_eq!(names(&state), ["Readers"]);
    }

    #[test]
    fn resume_forces_a_pass() {
        let mut state = state();
        let actions = resume(&mut state);
        assert_eq!(actions.len(), 2);
        assert_eq!(aggregate_generation(&actions), Some(1));
    }
}
