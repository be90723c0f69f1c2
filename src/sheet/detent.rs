//! Sheet detents and the heights they map to.

use serde::{Deserialize, Serialize};

/// One of the three heights the sheet can rest at.
///
/// The declaration order is also the tie-break order used when snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetDetent {
    Peek,
    Medium,
    Full,
}

impl SheetDetent {
    /// All detents in tie-break order.
    pub const ALL: [Self; 3] = [Self::Peek, Self::Medium, Self::Full];
}

/// Fractions of the container height and the minimum heights guarding small viewports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetMetrics {
    pub peek_fraction: f64,
    pub medium_fraction: f64,
    pub full_fraction: f64,
    pub min_peek: f64,
    pub min_medium: f64,
    pub min_full: f64,
}

impl Default for SheetMetrics {
    fn default() -> Self {
        Self {
            peek_fraction: 0.30,
            medium_fraction: 0.58,
            full_fraction: 0.86,
            min_peek: 220.0,
            min_medium: 360.0,
            min_full: 460.0,
        }
    }
}

/// Concrete heights of the three detents for one container height.
///
/// Recomputed whenever the container changes size; never cached across
/// layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetHeights {
    pub peek: f64,
    pub medium: f64,
    pub full: f64,
}

impl SheetHeights {
    /// Derives detent heights from the container height.
    ///
    /// # Example
    ///
    /// ```
    /// use groop_core::sheet::{SheetHeights, SheetMetrics};
    ///
    /// let heights = SheetHeights::for_container(400.0, &SheetMetrics::default());
    /// assert_eq!((heights.peek, heights.medium, heights.full), (220.0, 360.0, 460.0));
    /// ```
    #[must_use]
    pub fn for_container(container_height: f64, metrics: &SheetMetrics) -> Self {
        Self {
            peek: metrics.min_peek.max(container_height * metrics.peek_fraction),
            medium: metrics.min_medium.max(container_height * metrics.medium_fraction),
            full: metrics.min_full.max(container_height * metrics.full_fraction),
        }
    }

    /// Height of `detent`.
    #[must_use]
    pub const fn height(&self, detent: SheetDetent) -> f64 {
        match detent {
            SheetDetent::Peek => self.peek,
            SheetDetent::Medium => self.medium,
            SheetDetent::Full => self.full,
        }
    }

    /// Largest allowed offset: the sheet pushed down to its peek height.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.full - self.peek).max(0.0)
    }

    /// Offset at which `detent` rests when no drag is active.
    #[must_use]
    pub fn base_offset(&self, detent: SheetDetent) -> f64 {
        self.full - self.height(detent)
    }

    /// Clamps a raw offset into `[0, full - peek]`.
    #[must_use]
    pub fn clamp_offset(&self, raw: f64) -> f64 {
        raw.clamp(0.0, self.max_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_win_on_tall_containers() {
        let heights = SheetHeights::for_container(1000.0, &SheetMetrics::default());
        assert!((heights.peek - 300.0).abs() < 1e-9);
        assert!((heights.medium - 580.0).abs() < 1e-9);
        assert!((heights.full - 860.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_container_keeps_ordering() {
        let heights = SheetHeights::for_container(0.0, &SheetMetrics::default());
        assert!(heights.peek < heights.medium && heights.medium < heights.full);
        assert!((heights.max_offset() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_offset_bounds() {
        let heights = SheetHeights::for_container(400.0, &SheetMetrics::default());
        assert_eq!(heights.clamp_offset(-50.0), 0.0);
        assert_eq!(heights.clamp_offset(1_000.0), 240.0);
        assert_eq!(heights.clamp_offset(100.0), 100.0);
    }
}
