//! Domain records and their row mapping.

mod row;
mod types;

pub use row::Record;
pub use types::{Book, BookStatus, Loan, User};
