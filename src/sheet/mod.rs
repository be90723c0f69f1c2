//! Draggable bottom sheet layered over the discovery map.
//!
//! The sheet rests at one of three detents and can be dragged continuously
//! between them. All of it is synchronous, per-frame computation:
//!
//! ```text
//! container height ──► SheetHeights ──┐
//!                                     ├──► offset (every frame while dragging)
//! drag samples ──► SheetState ────────┘
//!                      │
//!                      └── DragEnded ──► nearest detent, translation reset
//! ```
//!
//! # Modules
//!
//! - [`detent`]: Detents, sizing metrics and the heights derived from a container
//! - [`state`]: Sheet state, drag events and snap resolution

pub mod detent;
pub mod state;

pub use detent::{SheetDetent, SheetHeights, SheetMetrics};
pub use state::{resolve_snap, SheetEvent, SheetState};
