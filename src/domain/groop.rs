//! Groop and member domain models.
//!
//! A groop is a local community or interest group. Groops are never deleted:
//! the only mutations are joining (which bumps the member count) and creating
//! a new groop.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a groop.
pub type GroopId = Uuid;

/// A local community or interest group.
///
/// # Fields
///
/// - `id`: Stable identifier
/// - `name`: Display name, also the primary sort key in "by name" views
/// - `category`: Free-form category label (e.g. `"Fitness"`)
/// - `location`: Neighbourhood or venue description
/// - `member_count`: Number of members, incremented on join
/// - `is_joined`: Whether the current user is a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Groop {
    pub id: GroopId,
    pub name: String,
    pub category: String,
    pub location: String,
    pub member_count: u32,
    pub is_joined: bool,
}

impl Groop {
    /// Creates a freshly founded groop with the current user as its only member.
    ///
    /// # Examples
    ///
    /// ```
    /// use groop_core::domain::Groop;
    ///
    /// let groop = Groop::new("Ancoats Book Circle", "Books", "Ancoats, Manchester");
    /// assert_eq!(groop.member_count, 1);
    /// assert!(groop.is_joined);
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            location: location.into(),
            member_count: 1,
            is_joined: true,
        }
    }

    /// Marks the groop as joined and counts the new member.
    ///
    /// Returns `false` without changing anything if the groop was already joined.
    pub fn join(&mut self) -> bool {
        if self.is_joined {
            return false;
        }
        self.is_joined = true;
        self.member_count = self.member_count.saturating_add(1);
        true
    }
}

/// A member of a groop. Exactly one member per groop is the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroopMember {
    pub id: Uuid,
    pub groop_id: GroopId,
    pub name: String,
    pub job_title: String,
    pub status: String,
    pub is_host: bool,
}

impl GroopMember {
    /// Creates the host member recorded when a groop is founded.
    #[must_use]
    pub fn host(groop_id: GroopId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            groop_id,
            name: name.into(),
            job_title: "Community Host".to_string(),
            status: "Host".to_string(),
            is_host: true,
        }
    }

    /// Returns up to two initials from the member's name.
    ///
    /// ```
    /// use groop_core::domain::GroopMember;
    /// use uuid::Uuid;
    ///
    /// let host = GroopMember::host(Uuid::new_v4(), "Sarah O'Connell");
    /// assert_eq!(host.initials(), "SO");
    /// ```
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .collect()
    }
}
