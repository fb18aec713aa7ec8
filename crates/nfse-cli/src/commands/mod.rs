//! CLI commands.

pub mod config;
pub mod extract;
