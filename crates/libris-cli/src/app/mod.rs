//! Application-level utilities for the Libris CLI.
//!
//! This module provides:
//! - Path resolution for the config file and data directory
//! - The per-invocation `AppContext`

mod context;
mod resolver;

pub use context::AppContext;
