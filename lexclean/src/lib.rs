// lexclean/src/lib.rs
//! # lexclean CLI Application
//!
//! This crate provides the command-line front end for `lexclean-core`:
//! `scan` checks a file or stdin, `filter` re-validates JSON sample files and
//! `catalog` summarizes the variant index without revealing it.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
