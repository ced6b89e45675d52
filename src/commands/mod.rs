//! Subcommand implementations

pub mod deploy;
