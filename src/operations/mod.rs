//! High-level operations driven by the CLI commands

pub mod install;
