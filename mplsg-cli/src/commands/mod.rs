//! Command implementations for the mplsg CLI
//!
//! Each command module provides a `run` function.

pub mod batch;
pub mod build;
