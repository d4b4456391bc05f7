// lexclean/src/utils/mod.rs
//! Helpers shared by the CLI commands.

pub mod config_path;
pub mod input;
