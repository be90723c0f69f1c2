//! Pure filtering and sorting of groop lists.
//!
//! [`filter_groops`] never mutates its input and always returns a fresh
//! vector, so calling it twice with the same arguments yields the same view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::Groop;

/// Fixed category chips offered on the discovery screen.
pub const DISCOVERY_CATEGORIES: [&str; 7] =
    ["All", "Co-Working", "Fitness", "Books", "Games", "Outdoors", "Arts"];

/// Number of results promoted to the featured carousel.
const FEATURED_COUNT: usize = 3;

/// Maximum number of results listed under the map.
const MAP_RESULT_LIMIT: usize = 6;

/// Category restriction applied after the text match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category name.
    Named(String),
}

impl CategoryFilter {
    /// Parses a chip label; `"All"` maps to [`CategoryFilter::All`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label == "All" {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    /// Label shown on the chip.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Named(name) => name,
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Name ascending.
    #[default]
    ByName,
    /// Member count descending.
    ByMemberCount,
}

/// How discovery results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiscoveryMode {
    #[default]
    Map,
    List,
}

impl DiscoveryMode {
    /// Upper bound on the number of results shown in this mode.
    #[must_use]
    pub const fn result_limit(self) -> Option<usize> {
        match self {
            Self::Map => Some(MAP_RESULT_LIMIT),
            Self::List => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Map => Self::List,
            Self::List => Self::Map,
        }
    }
}

/// Everything the user has typed or picked on the discovery screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscoveryQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
}

impl DiscoveryQuery {
    fn matches(&self, needle: &str, groop: &Groop) -> bool {
        if !self.category.accepts(&groop.category) {
            return false;
        }
        needle.is_empty()
            || groop.name.to_lowercase().contains(needle)
            || groop.category.to_lowercase().contains(needle)
            || groop.location.to_lowercase().contains(needle)
    }
}

/// Filters and sorts `groops` according to `query`.
///
/// The text is trimmed and matched case-insensitively as a substring of the
/// name, category or location. Sorting is stable, so groops with equal keys
/// keep their input order.
///
/// # Example
///
/// ```
/// use groop_core::discovery::{filter_groops, DiscoveryQuery, SortMode};
/// use groop_core::domain::Groop;
///
/// let groops = vec![
///     Groop::new("Ancoats Runners", "Fitness", "Ancoats, Manchester"),
///     Groop::new("Chorlton Readers", "Books", "Chorlton, Manchester"),
/// ];
/// let query = DiscoveryQuery { text: "  ANCOATS ".into(), ..Default::default() };
///
/// let view = filter_groops(&groops, &query);
/// assert_eq!(view.len(), 1);
/// assert_eq!(view[0].name, "Ancoats Runners");
/// ```
#[must_use]
pub fn filter_groops(groops: &[Groop], query: &DiscoveryQuery) -> Vec<Groop> {
    let needle = query.text.trim().to_lowercase();
    let mut view: Vec<Groop> = groops
        .iter()
        .filter(|groop| query.matches(&needle, groop))
        .cloned()
        .collect();

    match query.sort {
        SortMode::ByName => view.sort_by(|a, b| a.name.cmp(&b.name)),
        SortMode::ByMemberCount => view.sort_by(|a, b| b.member_count.cmp(&a.member_count)),
    }

    tracing::debug!(
        input = groops.len(),
        output = view.len(),
        query = %needle,
        category = query.category.label(),
        "discovery filter applied"
    );
    view
}

/// `"All"` followed by the distinct categories of `groops`, sorted.
#[must_use]
pub fn categories(groops: &[Groop]) -> Vec<String> {
    let distinct: BTreeSet<&str> = groops.iter().map(|groop| groop.category.as_str()).collect();
    std::iter::once("All")
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

/// The leading results promoted to the featured carousel.
#[must_use]
pub fn featured(view: &[Groop]) -> &[Groop] {
    &view[..view.len().min(FEATURED_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groop(name: &str, category: &str, location: &str, members: u32) -> Groop {
        Groop {
            member_count: members,
            is_joined: false,
            ..Groop::new(name, category, location)
        }
    }

    fn sample() -> Vec<Groop> {
        vec![
            groop("Salford Hikers", "Outdoors", "Salford Quays", 40),
            groop("Ancoats Runners", "Fitness", "Ancoats, Manchester", 120),
            groop("Board Game Night", "Games", "Northern Quarter", 40),
            groop("Chorlton Readers", "Books", "Chorlton, Manchester", 75),
        ]
    }

    fn names(view: &[Groop]) -> Vec<&str> {
        view.iter().map(|groop| groop.name.as_str()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_sorted_by_name() {
        let view = filter_groops(&sample(), &DiscoveryQuery::default());
        assert_eq!(
            names(&view),
            ["Ancoats Runners", "Board Game Night", "Chorlton Readers", "Salford Hikers"]
        );
    }

    #[test]
    fn text_matches_name_category_and_location_case_insensitively() {
        let groops = sample();
        let by = |text: &str| {
            let query = DiscoveryQuery { text: text.into(), ..Default::default() };
            names(&filter_groops(&groops, &query)).join(",")
        };
        assert_eq!(by("RUN"), "Ancoats Runners");
        assert_eq!(by("books"), "Chorlton Readers");
        assert_eq!(by("quays"), "Salford Hikers");
        assert_eq!(by("manchester"), "Ancoats Runners,Chorlton Readers");
        assert_eq!(by("   "), "Ancoats Runners,Board Game Night,Chorlton Readers,Salford Hikers");
        assert_eq!(by("zzz"), "");
    }

    #[test]
    fn category_filter_is_exact() {
        let groops = sample();
        let query = DiscoveryQuery {
            category: CategoryFilter::Named("Games".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_groops(&groops, &query)), ["Board Game Night"]);

        let lowercase = DiscoveryQuery {
            category: CategoryFilter::Named("games".into()),
            ..Default::default()
        };
        assert!(filter_groops(&groops, &lowercase).is_empty());
    }

    #[test]
    fn member_count_sort_is_descending_and_stable() {
        let query = DiscoveryQuery { sort: SortMode::ByMemberCount, ..Default::default() };
        let view = filter_groops(&sample(), &query);
        assert_eq!(
            names(&view),
            ["Ancoats Runners", "Chorlton Readers", "Salford Hikers", "Board Game Night"]
        );
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_input_alone() {
        let groops = sample();
        let before = groops.clone();
        let query = DiscoveryQuery {
            text: "a".into(),
            sort: SortMode::ByMemberCount,
            ..Default::default()
        };
        let once = filter_groops(&groops, &query);
        let twice = filter_groops(&once, &query);
        assert_eq!(once, twice);
        assert_eq!(groops, before);
    }

    #[test]
    fn categories_lists_all_then_distinct_sorted() {
        assert_eq!(categories(&sample()), ["All", "Books", "Fitness", "Games", "Outdoors"]);
        assert_eq!(categories(&[]), ["All"]);
    }

    #[test]
    fn featured_takes_at_most_three() {
        let view = sample();
        assert_eq!(featured(&view).len(), 3);
        assert_eq!(featured(&view[..1]).len(), 1);
        assert!(featured(&[]).is_empty());
    }

    #[test]
    fn mode_limits() {
        assert_eq!(DiscoveryMode::Map.result_limit(), Some(6));
        assert_eq!(DiscoveryMode::List.result_limit(), None);
        assert_eq!(DiscoveryMode::Map.toggled(), DiscoveryMode::List);
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_label("Arts").label(), "Arts");
    }
}
