//! Navigation destinations and deep-link parsing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::GroopId;

/// URL scheme of inbound deep links.
const DEEP_LINK_SCHEME: &str = "yourgroop://";

/// Screens reachable by pushing onto the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    GroopDetail(GroopId),
    /// Chat screen, optionally with a draft already typed in.
    GroopChat { groop_id: GroopId, prefill: Option<String> },
    GroopMembers(GroopId),
    AnnouncementDetail(Uuid),
}

impl Route {
    /// Resolves a `yourgroop://groop/<uuid>` link.
    ///
    /// Any other scheme, host or malformed id resolves to `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use groop_core::app::Route;
    /// use uuid::Uuid;
    ///
    /// let id = Uuid::new_v4();
    /// let link = format!("yourgroop://groop/{id}");
    /// assert_eq!(Route::from_deep_link(&link), Some(Route::GroopDetail(id)));
    /// assert_eq!(Route::from_deep_link("https://example.com"), None);
    /// ```
    #[must_use]
    pub fn from_deep_link(url: &str) -> Option<Self> {
        let rest = url.strip_prefix(DEEP_LINK_SCHEME)?;
        let mut segments = rest.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("groop"), Some(id), None) => Uuid::parse_str(id).ok().map(Self::GroopDetail),
            _ => None,
        }
    }

    /// Groop the destination belongs to, when it is groop-scoped.
    #[must_use]
    pub fn groop_id(&self) -> Option<GroopId> {
        match self {
            Self::GroopDetail(id) | Self::GroopMembers(id) | Self::GroopChat { groop_id: id, .. } => Some(*id),
            Self::AnnouncementDetail(_) => None,
        }
    }
}
