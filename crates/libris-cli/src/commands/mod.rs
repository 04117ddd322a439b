//! Subcommand handlers.
//!
//! Each handler takes the shared `AppContext` and its parsed arguments.
//! Refusals and missing records are returned as `CliError` so `main` can
//! map them to exit codes.

mod books;
mod loans;
mod maintenance;
mod menu;
mod misc;
mod users;

pub use books::{handle_add_book, handle_search, handle_show_book};
pub use loans::{handle_borrow, handle_return, handle_show_loan};
pub use maintenance::handle_check;
pub use menu::handle_menu;
pub use misc::handle_completions;
pub use users::handle_register_user;
