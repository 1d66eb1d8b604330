//! Subcommand implementations

pub mod interactive;
pub mod mappings;
