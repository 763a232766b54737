//! Subcommand implementations.

pub mod compile;
pub mod completion;
pub mod pack;
