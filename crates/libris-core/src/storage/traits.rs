//! Table store trait definition.
//!
//! The `TableStore` trait is the seam between the catalog and persistence.
//! A store holds the three tables and only ever moves whole tables or single
//! appended rows; it knows nothing about books or loans.

use crate::error::Result;
use crate::storage::table::{Table, TableData};

/// Storage interface for header-described tables.
///
/// Implementations must ensure:
/// - `scan` returns rows in insertion order
/// - `append` lays the fields out against the header already stored
/// - `replace` swaps the whole table, header included
pub trait TableStore {
    /// Create `table` with its canonical header if it does not exist yet.
    ///
    /// An existing table is left untouched unless its header is blank, in
    /// which case the canonical header is written over it.
    fn ensure(&mut self, table: Table) -> Result<()>;

    /// Load the full table.
    ///
    /// # Errors
    ///
    /// Returns `LibrisError::Storage` if the table is missing or unreadable,
    /// `LibrisError::Csv` if it cannot be decoded.
    fn scan(&self, table: Table) -> Result<TableData>;

    /// Append one row built from named fields.
    ///
    /// Columns the stored header has but `fields` lacks are written empty;
    /// fields the header lacks are dropped. A stored header without the
    /// table's key column is `LibrisError::Corrupt` and nothing is written.
    fn append(&mut self, table: Table, fields: &[(&str, String)]) -> Result<()>;

    /// Rewrite the full table.
    fn replace(&mut self, table: Table, data: &TableData) -> Result<()>;
}
