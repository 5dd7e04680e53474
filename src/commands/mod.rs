//! Command implementations for the gpm CLI

pub mod install;
