//! Output formatting helpers for the CLI.
//!
//! Records are printed as JSON, a table, or key-value lines depending on
//! the resolved `OutputMode`.

mod json;
mod text;

pub use json::{book_json, books_json, loan_json, report_json};
pub use text::{print_book, print_book_list, print_loan, print_report};
