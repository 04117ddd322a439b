//! # Libris Core
//!
//! Core library for Libris - a small single-user record keeper for a lending
//! library: users, books, and loans kept as flat CSV tables.
//!
//! This crate provides the domain records, the table storage abstraction and
//! its backends, and the catalog service, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **model**: `User`, `Book`, `Loan` records and their row mapping
//! - **storage**: `TableStore` trait, CSV file and in-memory backends, CSV codec
//! - **catalog**: the `Catalog` service (register, add, borrow, return, search)
//! - **clock** / **ids**: timestamp and identifier collaborators

pub mod catalog;
pub mod clock;
pub mod error;
pub mod fs;
pub mod ids;
pub mod model;
pub mod storage;

pub use catalog::{BookQuery, Catalog, IntegrityIssue, IntegrityReport, DEFAULT_LOAN_DAYS};
pub use error::{LibrisError, Result};
pub use model::{Book, BookStatus, Loan, User};
pub use storage::{CsvFileStore, MemoryStore, Table, TableStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
