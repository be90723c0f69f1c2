//! Device location as a stream of position updates.
//!
//! The core only ever asks for the latest known position. Providers expose a
//! `tokio::sync::watch` channel so interested tasks can also await changes.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Outcome of the location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionStatus {
    #[default]
    NotDetermined,
    Granted,
    Denied,
}

/// Source of position updates.
pub trait LocationProvider: Send + Sync {
    /// Asks for permission to read the device location and starts updates if granted.
    fn request_permission(&self);

    /// Current permission state.
    fn permission(&self) -> PermissionStatus;

    /// Latest known position, if any update has arrived.
    fn latest(&self) -> Option<Coordinate>;

    /// Subscribes to position updates.
    fn subscribe(&self) -> watch::Receiver<Option<Coordinate>>;
}

/// Provider fed by explicit [`push`](SimulatedLocationProvider::push) calls.
///
/// The answer to the permission prompt is fixed at construction. Positions
/// pushed while permission is not granted are dropped.
///
/// # Example
///
/// ```
/// use groop_core::location::{Coordinate, LocationProvider, SimulatedLocationProvider};
///
/// let provider = SimulatedLocationProvider::granting();
/// provider.request_permission();
/// provider.push(Coordinate::new(53.4808, -2.2426));
/// assert_eq!(provider.latest(), Some(Coordinate::new(53.4808, -2.2426)));
/// ```
#[derive(Debug)]
pub struct SimulatedLocationProvider {
    answer: PermissionStatus,
    status: Mutex<PermissionStatus>,
    sender: watch::Sender<Option<Coordinate>>,
}

impl SimulatedLocationProvider {
    /// A provider whose permission prompt is answered with `answer`.
    #[must_use]
    pub fn new(answer: PermissionStatus) -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self {
            answer,
            status: Mutex::new(PermissionStatus::NotDetermined),
            sender,
        }
    }

    /// A provider that grants permission when asked.
    #[must_use]
    pub fn granting() -> Self {
        Self::new(PermissionStatus::Granted)
    }

    /// Publishes a new position. Ignored unless permission has been granted.
    pub fn push(&self, position: Coordinate) {
        if *self.status.lock() != PermissionStatus::Granted {
            tracing::debug!("location update dropped, permission not granted");
            return;
        }
        self.sender.send_replace(Some(position));
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_permission(&self) {
        let mut status = self.status.lock();
        if *status == PermissionStatus::NotDetermined {
            *status = self.answer;
        }
        match *status {
            PermissionStatus::Granted => tracing::debug!("location permission granted"),
            PermissionStatus::Denied => tracing::warn!("location permission denied - centering disabled"),
            PermissionStatus::NotDetermined => {}
        }
    }

    fn permission(&self) -> PermissionStatus {
        *self.status.lock()
    }

    fn latest(&self) -> Option<Coordinate> {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Coordinate>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_before_permission_are_dropped() {
        let provider = SimulatedLocationProvider::granting();
        provider.push(Coordinate::new(1.0, 2.0));
        assert_eq!(provider.latest(), None);

        provider.request_permission();
        provider.push(Coordinate::new(3.0, 4.0));
        provider.push(Coordinate::new(5.0, 6.0));
        assert_eq!(provider.latest(), Some(Coordinate::new(5.0, 6.0)));
    }

    #[test]
    fn denied_provider_never_reports_a_position() {
        let provider = SimulatedLocationProvider::new(PermissionStatus::Denied);
        provider.request_permission();
        provider.push(Coordinate::new(3.0, 4.0));
        assert_eq!(provider.permission(), PermissionStatus::Denied);
        assert_eq!(provider.latest(), None);
    }

    #[tokio::test]
    async fn subscribers_see_the_latest_position() {
        let provider = SimulatedLocationProvider::granting();
        provider.request_permission();
        let mut receiver = provider.subscribe();

        provider.push(Coordinate::new(53.47, -2.25));
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), Some(Coordinate::new(53.47, -2.25)));
    }
}
