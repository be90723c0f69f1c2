//! Sheet state and drag handling.
//!
//! [`SheetState`] is a small value type. Events are applied with
//! [`SheetState::apply`], which returns the next state instead of mutating in
//! place; the caller decides whether the change warrants a re-render.

use serde::{Deserialize, Serialize};

use super::detent::{SheetDetent, SheetHeights};

/// Gap between the top of the sheet and the floating map controls.
const CONTROLS_GAP: f64 = 74.0;

/// Minimum distance between the floating map controls and the top safe area.
const CONTROLS_TOP_MARGIN: f64 = 72.0;

/// Input to the sheet state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SheetEvent {
    /// A drag sample with the total translation since the gesture began
    /// (positive = downward).
    DragChanged { translation: f64 },
    /// The finger lifted with the given final translation.
    DragEnded { translation: f64 },
    /// A groop was focused on the map; the sheet settles at medium.
    Focus,
    /// Programmatic move to a detent.
    SetDetent(SheetDetent),
}

/// Discrete detent plus the transient drag translation.
///
/// The translation only exists while a gesture is active and is reset to zero
/// when the gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetState {
    pub detent: SheetDetent,
    pub translation: f64,
    pub is_dragging: bool,
}

impl Default for SheetState {
    fn default() -> Self {
        Self::resting(SheetDetent::Medium)
    }
}

impl SheetState {
    /// A sheet resting at `detent`.
    #[must_use]
    pub const fn resting(detent: SheetDetent) -> Self {
        Self {
            detent,
            translation: 0.0,
            is_dragging: false,
        }
    }

    /// Applies `event` and returns the resulting state.
    ///
    /// # Example
    ///
    /// ```
    /// use groop_core::sheet::{SheetDetent, SheetEvent, SheetHeights, SheetMetrics, SheetState};
    ///
    /// let heights = SheetHeights::for_container(800.0, &SheetMetrics::default());
    /// let state = SheetState::default()
    ///     .apply(SheetEvent::DragChanged { translation: 480.0 }, &heights)
    ///     .apply(SheetEvent::DragEnded { translation: 500.0 }, &heights);
    ///
    /// assert_eq!(state.detent, SheetDetent::Peek);
    /// assert_eq!(state.translation, 0.0);
    /// ```
    ///
    /// Non-finite drag samples are ignored; a non-finite release settles
    /// with the last good translation.
    #[must_use]
    pub fn apply(self, event: SheetEvent, heights: &SheetHeights) -> Self {
        match event {
            SheetEvent::DragChanged { translation } if !translation.is_finite() => {
                tracing::debug!(translation, "ignoring non-finite drag sample");
                self
            }
            SheetEvent::DragChanged { translation } => Self {
                translation,
                is_dragging: true,
                ..self
            },
            SheetEvent::DragEnded { translation } => {
                let translation = if translation.is_finite() { translation } else { self.translation };
                let detent = resolve_snap(heights, self.detent, translation);
                tracing::debug!(
                    from = ?self.detent,
                    to = ?detent,
                    translation = translation,
                    "sheet drag resolved"
                );
                Self::resting(detent)
            }
            SheetEvent::Focus => Self::resting(SheetDetent::Medium),
            SheetEvent::SetDetent(detent) => Self::resting(detent),
        }
    }

    /// Vertical offset of the sheet from its fully expanded position.
    ///
    /// Always within `[0, full - peek]`. While idle this is a pure function of
    /// the detent and the heights.
    #[must_use]
    pub fn offset(&self, heights: &SheetHeights) -> f64 {
        heights.clamp_offset(heights.base_offset(self.detent) + self.translation)
    }

    /// Height of the sheet currently visible above the bottom edge.
    #[must_use]
    pub fn visible_height(&self, heights: &SheetHeights) -> f64 {
        heights.full - self.offset(heights)
    }

    /// Vertical position of the floating map controls above the sheet.
    ///
    /// The controls follow the sheet's top edge but never ride up into the
    /// top safe area.
    #[must_use]
    pub fn controls_y(&self, container_height: f64, safe_area_top: f64, heights: &SheetHeights) -> f64 {
        let sheet_top = container_height - heights.full + self.offset(heights);
        (sheet_top - CONTROLS_GAP).max(safe_area_top + CONTROLS_TOP_MARGIN)
    }
}

/// Resolves the detent a released drag settles at.
///
/// The resulting height is `full - clamp(base + translation)`; the detent whose
/// height is nearest wins, ties going to the earlier of peek, medium, full.
#[must_use]
pub fn resolve_snap(heights: &SheetHeights, current: SheetDetent, translation: f64) -> SheetDetent {
    let offset = heights.clamp_offset(heights.base_offset(current) + translation);
    let resulting_height = heights.full - offset;

    let mut nearest = SheetDetent::ALL[0];
    let mut best = (heights.height(nearest) - resulting_height).abs();
    for candidate in &SheetDetent::ALL[1..] {
        let distance = (heights.height(*candidate) - resulting_height).abs();
        if distance < best {
            nearest = *candidate;
            best = distance;
        }
    }
    nearest
}
