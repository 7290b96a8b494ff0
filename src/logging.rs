//! File-backed tracing output
//!
//! The terminal belongs to ratatui, so events are only recorded when a log
//! file is given. `POKEDEX_LOG` overrides the filter.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const FILTER_ENV: &str = "POKEDEX_LOG";
const DEFAULT_FILTER: &str = "pokedex=debug";

/// Installs the global subscriber, appending to `path`. Fails if a
/// subscriber is already installed.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}
