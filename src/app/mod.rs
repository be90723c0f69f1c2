//! Application layer coordinating state, events, and actions.
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Input → Events → handle_event → State Mutations → Actions → Runtime
//!                       ↑                                        ↓
//!                       └──────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Tab selection
//! - [`route`]: Navigation destinations and deep links
//! - [`screens`]: Loaded contents of pushed screens
//! - [`state`]: Root application state and view model computation
//!
//! # Example
//!
//! ```
//! use groop_core::app::{handle_event, AppState, Event, Viewport};
//!
//! let mut state = AppState::new("Taylor", Viewport { height: 800.0, safe_area_top: 47.0 });
//! let (render, _actions) = handle_event(&mut state, &Event::ToggleDiscoveryMode)?;
//! assert!(render);
//! # Ok::<(), groop_core::domain::GroopError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod route;
pub mod screens;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, resume, Event};
pub use modes::Tab;
pub use route::Route;
pub use screens::ScreenState;
pub use state::{AppState, Session, Viewport};
