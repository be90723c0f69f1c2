//! Domain layer for the groop core.
//!
//! This module contains the entity types shared by every other layer, the
//! crate error type, and small time formatting helpers. Nothing here touches
//! the repository, the runtime, or tracing setup.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`groop`]: Groops and their members
//! - [`content`]: Announcements, feed items and chat messages
//!
//! # Examples
//!
//! ```
//! use groop_core::domain::{Groop, Result};
//!
//! fn create() -> Result<Groop> {
//!     Ok(Groop::new("Ancoats Book Circle", "Books", "Ancoats, Manchester"))
//! }
//! ```

pub mod content;
pub mod error;
pub mod groop;

pub use content::{time_ago, Announcement, FeedItem, GroopMessage};
pub use error::{GroopError, Result};
pub use groop::{Groop, GroopId, GroopMember};
