//! Command-line demo driving the groop core end to end.
//!
//! Runs one scripted session against the in-memory repository and prints the
//! rendered screens along the way:
//!
//! 1. Start: load both groop lists and the first dashboard pass
//! 2. Discover: search, drag the sheet, focus a groop
//! 3. Join the focused groop and watch the dashboard refresh
//! 4. Sort My Groops by name, then follow a deep link and show the loaded groop
//!
//! # Configuration
//!
//! Arguments are `key=value` pairs matching [`Config`] fields. A single
//! argument ending in `.toml` loads that file instead.
//!
//! ```text
//! groop-demo latency_ms=50 display_name=Sam trace_level=debug
//! groop-demo ./groop.toml
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::sync::Arc;

use groop_core::app::{Route, Tab};
use groop_core::discovery::SortMode;
use groop_core::location::{Coordinate, SimulatedLocationProvider};
use groop_core::runtime::Runtime;
use groop_core::sheet::SheetDetent;
use groop_core::{initialize, Config, Event, Result};
use tracing::Instrument;

fn load_config() -> Result<Config> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [path] = args.as_slice() {
        if path.ends_with(".toml") {
            return Config::from_file(path);
        }
    }

    let pairs: BTreeMap<String, String> = args
        .iter()
        .filter_map(|arg| arg.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Ok(Config::from_map(&pairs))
}

fn print_screen(runtime: &Runtime, heading: &str) {
    println!("=== {heading} ===");
    println!("{}", groop_core::ui::render(runtime.state()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    groop_core::observability::init_tracing(&config);

    let span = tracing::info_span!("demo_session", display_name = %config.display_name);
    run(&config).instrument(span).await
}

async fn run(config: &Config) -> Result<()> {
    let repository = Arc::new(config.build_repository()?);
    let location = Arc::new(SimulatedLocationProvider::granting());
    let mut runtime = Runtime::new(initialize(config), repository, location.clone());
    runtime.subscribe(|state| {
        tracing::debug!(tab = ?state.tab, sheet = ?state.sheet.detent, "state changed");
    });

    runtime.start()?;
    runtime.run_until_idle().await?;
    print_screen(&runtime, "Home");

    runtime.dispatch(Event::SelectTab(Tab::Discover))?;
    runtime.dispatch(Event::SheetDragChanged(-180.0))?;
    runtime.dispatch(Event::SheetDragEnded(-260.0))?;
    print_screen(&runtime, "Discover, sheet dragged up");

    runtime.dispatch(Event::CenterOnUser)?;
    location.push(Coordinate::new(53.4839, -2.2364));
    runtime.sync_location()?;

    let Some(target) = runtime.state().visible_discovery().first().cloned() else {
        println!("nothing left to discover");
        return Ok(());
    };
    runtime.dispatch(Event::FocusGroop(target.id))?;
    runtime.dispatch(Event::SetSheetDetent(SheetDetent::Peek))?;
    runtime.dispatch(Event::JoinGroop(target.id))?;
    runtime.run_until_idle().await?;

    runtime.dispatch(Event::SelectTab(Tab::MyGroops))?;
    print_screen(&runtime, &format!("My Groops after joining {}", target.name));

    runtime.dispatch(Event::MyGroopsSortChanged(SortMode::ByName))?;
    print_screen(&runtime, "My Groops by name");

    runtime.dispatch(Event::OpenDeepLink(format!("yourgroop://groop/{}", target.id)))?;
    runtime.run_until_idle().await?;
    if let (Some(Route::GroopDetail(id)), Some(screen)) = (runtime.routes().last(), runtime.screen()) {
        println!("\n== deep link to groop {id} ==\n{}", groop_core::ui::render_screen(&screen));
    }

    runtime.dispatch(Event::SelectTab(Tab::Home))?;
    print_screen(&runtime, "Home after joining");

    Ok(())
}
