//! Event loop glue between the state machine, the worker and the outside world.
//!
//! The [`Runtime`] is the single owner of [`AppState`]. It feeds events to
//! [`handle_event`], executes the returned actions, and notifies subscribed
//! observers whenever the handler asks for a re-render. Worker responses are
//! pulled with [`Runtime::process_next`] or [`Runtime::run_until_idle`] and
//! dispatched like any other event, so state is only ever touched from the
//! task driving the runtime.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::{handle_event, resume, Action, AppState, Event, Route};
use crate::domain::{GroopError, Result};
use crate::location::{LocationProvider, PermissionStatus};
use crate::repository::GroopRepository;
use crate::ui::ScreenViewModel;
use crate::worker::{GroopWorker, WorkerHandle, WorkerResponse};

/// Callback invoked with the new state after every rendering change.
pub type Observer = Box<dyn Fn(&AppState) + Send + Sync>;

/// Owns the application state and drives it.
pub struct Runtime {
    state: AppState,
    worker: WorkerHandle,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
    location: Arc<dyn LocationProvider>,

    /// Navigation stack, top last.
    routes: Vec<Route>,
    observers: Vec<Observer>,

    /// Messages posted whose response has not been dispatched yet.
    in_flight: usize,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("routes", &self.routes)
            .field("observers", &self.observers.len())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    /// Spawns a worker over `repository` and wraps `state`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(
        state: AppState,
        repository: Arc<dyn GroopRepository>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        let (worker, responses) = GroopWorker::new(repository).spawn();
        Self {
            state,
            worker,
            responses,
            location,
            routes: Vec::new(),
            observers: Vec::new(),
            in_flight: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Navigation stack, bottom first.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Contents of the topmost screen, `None` on the tab root.
    #[must_use]
    pub fn screen(&self) -> Option<ScreenViewModel> {
        self.routes.last().map(|route| self.state.compute_screen_viewmodel(route))
    }

    /// Pops the topmost screen.
    pub fn pop_route(&mut self) -> Option<Route> {
        self.routes.pop()
    }

    /// Number of worker responses still outstanding.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Registers a callback run after every rendering state change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Loads the groop lists; the first load also triggers a dashboard pass.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Worker`] if the worker has stopped.
    pub fn start(&mut self) -> Result<()> {
        self.dispatch(Event::Refresh)
    }

    /// Reloads everything after returning to the foreground.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Worker`] if the worker has stopped.
    pub fn resume(&mut self) -> Result<()> {
        let actions = resume(&mut self.state);
        self.notify();
        self.execute_all(actions)
    }

    /// Handles `event` and executes the resulting actions.
    ///
    /// # Errors
    ///
    /// Propagates handler errors and [`GroopError::Worker`] if the worker has
    /// stopped.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        let (render, actions) = handle_event(&mut self.state, &event)?;
        if render {
            self.notify();
        }
        self.execute_all(actions)
    }

    fn execute_all(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: Action) -> Result<()> {
        match action {
            Action::PostToWorker(message) => {
                self.worker.post(message)?;
                self.in_flight += 1;
                Ok(())
            }
            Action::Navigate(route) => {
                tracing::debug!(route = ?route, depth = self.routes.len() + 1, "navigating");
                self.routes.push(route);
                Ok(())
            }
            Action::RequestLocationPermission => {
                self.location.request_permission();
                if self.location.permission() == PermissionStatus::Granted {
                    self.sync_location()?;
                }
                Ok(())
            }
        }
    }

    /// Dispatches the provider's latest position if it differs from the state's.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub fn sync_location(&mut self) -> Result<()> {
        match self.location.latest() {
            Some(position) if self.state.user_position != Some(position) => {
                self.dispatch(Event::LocationUpdated(position))
            }
            _ => Ok(()),
        }
    }

    /// Waits for one worker response and dispatches it.
    ///
    /// Returns `Ok(false)` without waiting when nothing is in flight.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Worker`] if the worker stopped with work
    /// outstanding, and propagates dispatch errors.
    pub async fn process_next(&mut self) -> Result<bool> {
        if self.in_flight == 0 {
            return Ok(false);
        }
        let response = self
            .responses
            .recv()
            .await
            .ok_or_else(|| GroopError::Worker("worker stopped with responses outstanding".to_string()))?;
        self.in_flight -= 1;
        self.dispatch(Event::WorkerResponse(response))?;
        Ok(true)
    }

    /// Processes responses until no work is in flight, including any follow-up
    /// work the responses trigger.
    ///
    /// # Errors
    ///
    /// See [`Runtime::process_next`].
    pub async fn run_until_idle(&mut self) -> Result<()> {
        while self.process_next().await? {}
        Ok(())
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::app::Viewport;
    use crate::location::{Coordinate, SimulatedLocationProvider};
    use crate::repository::InMemoryGroopRepository;

    fn runtime(location: SimulatedLocationProvider) -> Runtime {
        runtime_with(Arc::new(location))
    }

    fn runtime_with(location: Arc<SimulatedLocationProvider>) -> Runtime {
        Runtime::new(
            AppState::new("Taylor", Viewport { height: 800.0, safe_area_top: 47.0 }),
            Arc::new(InMemoryGroopRepository::seeded(Duration::ZERO)),
            location,
        )
    }

    #[tokio::test]
    async fn start_loads_groops_and_the_dashboard() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        runtime.start().unwrap();
        runtime.run_until_idle().await.unwrap();

        let state = runtime.state();
        assert_eq!(state.my_groops.len(), 3);
        assert_eq!(state.discovery_groops.len(), 3);
        assert!(!state.dashboard.is_loading());
        assert!(!state.dashboard.snapshot.updates.is_empty());
        assert_eq!(runtime.in_flight(), 0);
    }

    #[tokio::test]
    async fn joining_moves_a_groop_between_lists() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        runtime.start().unwrap();
        runtime.run_until_idle().await.unwrap();

        let target = runtime.state().discovery_groops[0].clone();
        runtime.dispatch(Event::JoinGroop(target.id)).unwrap();
        runtime.run_until_idle().await.unwrap();

        let state = runtime.state();
        let joined = state.my_groops.iter().find(|g| g.id == target.id).unwrap();
        assert_eq!(joined.member_count, target.member_count + 1);
        assert!(state.discovery_groops.iter().all(|g| g.id != target.id));
        assert_eq!(state.dashboard.watcher.latest(), 2);
        assert!(!state.dashboard.is_loading());
    }

    #[tokio::test]
    async fn observers_see_rendering_changes() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        let renders = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&renders);
        runtime.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        runtime.dispatch(Event::ToggleDiscoveryMode).unwrap();
        runtime.dispatch(Event::Refresh).unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn center_on_user_goes_through_permission() {
        let location = Arc::new(SimulatedLocationProvider::granting());
        let mut runtime = runtime_with(Arc::clone(&location));

        runtime.dispatch(Event::CenterOnUser).unwrap();
        assert_eq!(runtime.state().user_position, None);

        let here = Coordinate::new(53.4765, -2.2541);
        location.push(here);
        runtime.sync_location().unwrap();
        assert_eq!(runtime.state().user_position, Some(here));
        assert_eq!(runtime.state().camera.center, here);
    }

    #[tokio::test]
    async fn creating_a_groop_navigates_to_it() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        runtime
            .dispatch(Event::CreateGroop {
                name: "Levenshulme Makers".into(),
                category: "Arts".into(),
                location: "Levenshulme".into(),
            })
            .unwrap();
        runtime.run_until_idle().await.unwrap();

        let created = runtime
            .state()
            .my_groops
            .iter()
            .find(|g| g.name == "Levenshulme Makers")
            .unwrap()
            .id;
        assert_eq!(runtime.routes(), [Route::GroopDetail(created)]);
        let Some(ScreenViewModel::GroopDetail(detail)) = runtime.screen() else {
            panic!("the new groop's detail should be loaded");
        };
        assert_eq!(detail.groop.name, "Levenshulme Makers");
        assert_eq!(detail.member_initials.len(), 1);
        assert_eq!(runtime.pop_route(), Some(Route::GroopDetail(created)));
        assert_eq!(runtime.screen(), None);
    }

    const RUNNERS: uuid::Uuid = uuid::Uuid::from_u128(0xA111_1111_1111_1111_1111_1111_1111_1111);

    #[tokio::test]
    async fn deep_link_loads_the_detail_screen() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        runtime.dispatch(Event::OpenDeepLink(format!("yourgroop://groop/{RUNNERS}"))).unwrap();
        assert!(matches!(runtime.screen(), Some(ScreenViewModel::Loading(_))));
        runtime.run_until_idle().await.unwrap();

        let Some(ScreenViewModel::GroopDetail(detail)) = runtime.screen() else {
            panic!("detail should be loaded");
        };
        assert_eq!(detail.groop.name, "Northern Runners MCR");
        let titles: Vec<_> = detail.announcements.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Heaton Park Warmup", "Canal Loop Session"]);
        assert_eq!(detail.latest_message.map(|line| line.sender), Some("Taylor".to_string()));
    }

    #[tokio::test]
    async fn chat_is_oldest_first_and_takes_sent_messages() {
        let mut runtime = runtime(SimulatedLocationProvider::granting());
        let route = Route::GroopChat { groop_id: RUNNERS, prefill: None };
        runtime.dispatch(Event::OpenRoute(route)).unwrap();
        runtime.run_until_idle().await.unwrap();

        runtime
            .dispatch(Event::SendMessage { groop_id: RUNNERS, body: "See you there".into() })
            .unwrap();
        runtime.run_until_idle().await.unwrap();

        let Some(ScreenViewModel::Chat(chat)) = runtime.screen() else {
            panic!("chat should be loaded");
        };
        let senders: Vec<_> = chat.lines.iter().map(|line| line.sender.as_str()).collect();
        assert_eq!(senders, ["Maya", "Taylor", "Taylor"]);
        assert_eq!(chat.lines[2].body, "See you there");
        assert!(chat.lines[2].is_mine);
    }
}
