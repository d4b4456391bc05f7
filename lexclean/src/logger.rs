// lexclean/src/logger.rs
//! Logger initialization for the lexclean binary.
//!
//! Library crates only use the `log` facade; this is the single place where a
//! backend is installed. Logs go to stderr so stdout stays clean for verdicts
//! and JSON reports.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs `env_logger`.
///
/// With `Some(level)` the lexclean crates log at exactly that level and
/// `RUST_LOG` is ignored for them. With `None`, `RUST_LOG` decides and the
/// fallback is `warn`. Calling it twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);

    if let Some(level) = level {
        for module in ["lexclean", "lexclean_core", "lexclean_automaton"] {
            builder.filter_module(module, level);
        }
    }

    let _ = builder.try_init();
}

/// Maps the global CLI flags onto a level override.
///
/// `--quiet` wins over everything, then `--disable-debug`, then `--debug`.
pub fn level_from_flags(quiet: bool, debug: bool, disable_debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if disable_debug {
        Some(LevelFilter::Info)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
