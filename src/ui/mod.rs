//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! AppState → compute_*_viewmodel → view model → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Plain-text rendering of the selected tab

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_screen};
pub use viewmodel::{
    AnnouncementViewModel, ChatLine, ChatViewModel, DashboardViewModel, DiscoveryViewModel, EmptyState,
    GroopDetailViewModel, GroopRow, MemberRow, MembersViewModel, MyGroopsViewModel, ScreenViewModel,
    SheetLayout,
};
