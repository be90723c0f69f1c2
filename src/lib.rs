//! groop-core: the headless core of a local community client.
//!
//! The crate covers the parts of the client that carry real logic:
//! - Discovery filtering and sorting over local interest groups ("groops")
//! - A draggable bottom sheet with three detents layered over the map
//! - A dashboard aggregator fanning out concurrent reads across joined groops
//! - An explicit state/event/action model tying them together
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← owns AppState
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Events, handler, actions, routes                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ discovery/    │   │ sheet/        │   │ worker/       │
//! │ - filter/sort │   │ - detents     │   │ - task/message│
//! │ - map regions │   │ - drag & snap │   │ dashboard/    │
//! │               │   │               │   │ - aggregation │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  repository/ · location/ · domain/                  │
//! └─────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  observability/ · infrastructure/                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`dashboard`]: Update aggregation, inbox counters and generation tokens
//! - [`discovery`]: Filter/sort engine and map regions
//! - [`domain`]: Entities and the crate error type
//! - [`infrastructure`]: Data directory and path helpers
//! - [`location`]: Location permission and position stream
//! - [`observability`]: Tracing subscriber with OpenTelemetry file export
//! - [`repository`]: Async store trait and the in-memory implementation
//! - [`runtime`]: Event loop owning the state and the worker channel
//! - [`sheet`]: Bottom sheet detents and drag resolution
//! - [`ui`]: View models and a plain-text renderer
//! - [`worker`]: Background execution of repository work
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use groop_core::location::SimulatedLocationProvider;
//! use groop_core::repository::InMemoryGroopRepository;
//! use groop_core::runtime::Runtime;
//! use groop_core::{initialize, Config};
//!
//! # async fn demo() -> groop_core::Result<()> {
//! let config = Config::default();
//! let repository = Arc::new(InMemoryGroopRepository::seeded(Duration::from_millis(config.latency_ms)));
//! let mut runtime = Runtime::new(
//!     initialize(&config),
//!     repository,
//!     Arc::new(SimulatedLocationProvider::granting()),
//! );
//! runtime.start()?;
//! runtime.run_until_idle().await?;
//! println!("{}", groop_core::ui::render(runtime.state()));
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod dashboard;
pub mod discovery;
pub mod domain;
pub mod infrastructure;
pub mod location;
pub mod observability;
pub mod repository;
pub mod runtime;
pub mod sheet;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{GroopError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::app::Viewport;
use crate::repository::InMemoryGroopRepository;

/// Runtime configuration.
///
/// Built from a string map ([`Config::from_map`], e.g. command-line
/// `key=value` pairs) or a TOML file ([`Config::from_file`]).
///
/// # Example
///
/// ```toml
/// latency_ms = 100
/// display_name = "Taylor"
/// viewport_height = 844.0
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated delay of every repository call, in milliseconds. Default: 250
    pub latency_ms: u64,

    /// Name of the signed-in user; also matched as a mention. Default: `"Taylor"`
    pub display_name: String,

    /// Height of the container the sheet is laid out in. Default: 800
    pub viewport_height: f64,

    /// Top safe-area inset. Default: 47
    pub safe_area_top: f64,

    /// JSON seed document replacing the built-in data set.
    pub seed_file: Option<PathBuf>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,

    /// Span export destination. Default: `groop-traces.jsonl` in the data directory.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency_ms: 250,
            display_name: "Taylor".to_string(),
            viewport_height: 800.0,
            safe_area_top: 47.0,
            seed_file: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Missing or unparsable values fall back to their defaults. Paths have a
    /// leading `~` expanded.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use groop_core::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("latency_ms".to_string(), "0".to_string());
    /// map.insert("viewport_height".to_string(), "tall".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.latency_ms, 0);
    /// assert_eq!(config.viewport_height, 800.0);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| config.get(key).map(|value| value.trim());
        let path = |key: &str| {
            parsed(key)
                .filter(|value| !value.is_empty())
                .map(|value| PathBuf::from(infrastructure::expand_tilde(value)))
        };

        Self {
            latency_ms: parsed("latency_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.latency_ms),
            display_name: parsed("display_name")
                .filter(|s| !s.is_empty())
                .map_or(defaults.display_name, String::from),
            viewport_height: parsed("viewport_height")
                .and_then(|s| s.parse().ok())
                .filter(|h: &f64| h.is_finite() && *h >= 0.0)
                .unwrap_or(defaults.viewport_height),
            safe_area_top: parsed("safe_area_top")
                .and_then(|s| s.parse().ok())
                .filter(|h: &f64| h.is_finite() && *h >= 0.0)
                .unwrap_or(defaults.safe_area_top),
            seed_file: path("seed_file"),
            trace_level: parsed("trace_level").filter(|s| !s.is_empty()).map(String::from),
            trace_file: path("trace_file"),
        }
    }

    /// Loads configuration from a TOML file. Absent keys take their defaults,
    /// as do negative or non-finite viewport lengths.
    ///
    /// # Errors
    ///
    /// Returns [`GroopError::Io`] if the file cannot be read and
    /// [`GroopError::Config`] if it is not valid TOML for this structure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| GroopError::Config(format!("{}: {e}", path.display())))?;
        Ok(config.with_valid_lengths())
    }

    fn with_valid_lengths(self) -> Self {
        let defaults = Self::default();
        let valid = |h: f64| h.is_finite() && h >= 0.0;
        Self {
            viewport_height: if valid(self.viewport_height) { self.viewport_height } else { defaults.viewport_height },
            safe_area_top: if valid(self.safe_area_top) { self.safe_area_top } else { defaults.safe_area_top },
            ..self
        }
    }

    /// Repository latency as a [`Duration`].
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Builds the in-memory repository, from `seed_file` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or parsed.
    pub fn build_repository(&self) -> Result<InMemoryGroopRepository> {
        match &self.seed_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                InMemoryGroopRepository::from_json(&json, self.latency())
            }
            None => Ok(InMemoryGroopRepository::seeded(self.latency())),
        }
    }
}

/// Builds the initial application state.
///
/// The groop lists start empty and loading; they fill in once the runtime
/// processes the first `Refresh`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(display_name = %config.display_name, "initializing groop core");

    AppState::new(
        config.display_name.clone(),
        Viewport {
            height: config.viewport_height,
            safe_area_top: config.safe_area_top,
        },
    )
}
