//! Map camera regions.
//!
//! Groops carry a free-form location string rather than coordinates; the map
//! places them with a small neighbourhood table and falls back to the city
//! centre for anything it does not recognise.

use serde::{Deserialize, Serialize};

use crate::location::Coordinate;

const CITY_CENTRE: Coordinate = Coordinate::new(53.4808, -2.2426);

const DEFAULT_SPAN: f64 = 0.08;
const FOCUS_SPAN: f64 = 0.03;
const USER_SPAN: f64 = 0.02;

/// Neighbourhood keyword to pin position.
const NEIGHBOURHOODS: [(&str, Coordinate); 6] = [
    ("Campfield", Coordinate::new(53.4765, -2.2541)),
    ("City Centre", CITY_CENTRE),
    ("Ancoats", Coordinate::new(53.4852, -2.2290)),
    ("Chorlton", Coordinate::new(53.4434, -2.2775)),
    ("Salford Quays", Coordinate::new(53.4729, -2.2965)),
    ("Stockport", Coordinate::new(53.4106, -2.1575)),
];

/// Visible map area: a centre and a square span in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub span: f64,
}

impl Default for MapRegion {
    /// Camera over the city centre.
    fn default() -> Self {
        Self { center: CITY_CENTRE, span: DEFAULT_SPAN }
    }
}

impl MapRegion {
    /// Close-up on a groop pin.
    #[must_use]
    pub fn focus(location: &str) -> Self {
        Self { center: coordinate_for(location), span: FOCUS_SPAN }
    }

    /// Close-up on the user's own position.
    #[must_use]
    pub const fn around_user(position: Coordinate) -> Self {
        Self { center: position, span: USER_SPAN }
    }
}

/// Pin position for a groop's location string.
#[must_use]
pub fn coordinate_for(location: &str) -> Coordinate {
    NEIGHBOURHOODS
        .iter()
        .find(|(keyword, _)| location.contains(keyword))
        .map_or(CITY_CENTRE, |(_, coordinate)| *coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_neighbourhoods_resolve() {
        assert_eq!(coordinate_for("Ancoats, Manchester"), Coordinate::new(53.4852, -2.2290));
        assert_eq!(coordinate_for("MediaCity, Salford Quays"), Coordinate::new(53.4729, -2.2965));
    }

    #[test]
    fn unknown_location_falls_back_to_city_centre() {
        assert_eq!(coordinate_for("Leeds"), CITY_CENTRE);
        assert_eq!(coordinate_for(""), CITY_CENTRE);
    }

    #[test]
    fn region_spans() {
        assert_eq!(MapRegion::default().span, 0.08);
        assert_eq!(MapRegion::focus("Chorlton").span, 0.03);
        let user = MapRegion::around_user(Coordinate::new(1.0, 2.0));
        assert_eq!(user.center, Coordinate::new(1.0, 2.0));
        assert_eq!(user.span, 0.02);
    }
}
