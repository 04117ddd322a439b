//! UI primitives for the Libris CLI.
//!
//! - **Context**: Environment detection (TTY, color)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and color helpers
//! - **Render**: Tables, receipts, key-value lines

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{badge, kv, print_error, receipt, table};
