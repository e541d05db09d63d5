//! Diagnostic logging
//!
//! Progress lines go to stdout through `println!`; tracing output is for
//! per-path diagnostics and goes to stderr.

use anyhow::Result;
use tracing::Level;

/// Pick the log level for a run. Dry runs log each planned entry at `info`.
pub fn level_for(verbose: bool, dry_run: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if dry_run {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Install the global subscriber
pub fn init(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "archgen starting");
    Ok(())
}
