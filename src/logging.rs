//! Native logger setup

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger
///
/// `RUST_LOG` wins when set. Otherwise `verbose` picks debug over info.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only if a logger is already installed
    let _ = Builder::from_env(env).try_init();
}
