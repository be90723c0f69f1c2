//! Discovery: the filter/sort engine behind the list and the map.
//!
//! # Modules
//!
//! - [`filter`]: Query, category and sort mode applied to a groop list
//! - [`map`]: Map camera regions and the location-to-coordinate table

pub mod filter;
pub mod map;

pub use filter::{
    categories, featured, filter_groops, CategoryFilter, DiscoveryMode, DiscoveryQuery, SortMode,
    DISCOVERY_CATEGORIES,
};
pub use map::{coordinate_for, MapRegion};
