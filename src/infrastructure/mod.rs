//! Infrastructure layer for filesystem and environment interactions.
//!
//! Only the trace exporter and config loading touch the filesystem; the
//! repository is purely in memory.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
