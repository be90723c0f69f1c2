//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) only mutates [`AppState`](super::AppState);
//! anything that talks to the repository, the navigation stack or the location
//! provider is returned as an [`Action`] and carried out by the
//! [`Runtime`](crate::runtime::Runtime) in order.

use super::route::Route;
use crate::worker::WorkerMessage;

/// Commands executed by the runtime after an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a repository operation to the background worker.
    ///
    /// Every message produces exactly one
    /// [`WorkerResponse`](crate::worker::WorkerResponse), which comes back as
    /// [`Event::WorkerResponse`](super::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Pushes a screen onto the navigation stack.
    Navigate(Route),

    /// Asks the location provider for permission, then re-reads the position.
    RequestLocationPermission,
}
