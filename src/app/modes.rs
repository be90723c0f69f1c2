//! Top-level navigation modes.
//!
//! The client has three tabs. Discovery additionally switches between a map
//! with a bottom sheet and a plain list, see
//! [`DiscoveryMode`](crate::discovery::DiscoveryMode).

use serde::{Deserialize, Serialize};

/// Tab selected in the bottom navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    /// Dashboard with the merged update timeline and inbox counters.
    #[default]
    Home,

    /// Map and list of groops the user has not joined yet.
    ///
    /// The only tab that shows the draggable sheet.
    Discover,

    /// Joined groops, filterable by category.
    MyGroops,
}

impl Tab {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Discover => "Discover",
            Self::MyGroops => "My Groops",
        }
    }
}
