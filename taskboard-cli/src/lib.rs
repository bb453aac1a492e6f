//! Terminal host for the taskboard engine.
//!
//! Owns configuration, logging setup, the on-disk data directory and table
//! rendering. Board semantics live in the `taskboard` crate.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

pub use cli::{Cli, Commands};
pub use commands::{execute, Format};
pub use config::Config;
