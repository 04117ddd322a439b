//! In-memory table store.

use std::collections::HashMap;

use crate::error::{LibrisError, Result};
use crate::storage::table::{Table, TableData};
use crate::storage::traits::TableStore;

/// Table store backed by a `HashMap`, for tests and dry runs.
///
/// Counts writes so callers can assert that an operation left storage alone.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<Table, TableData>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with prepared contents.
    pub fn with_table(mut self, table: Table, data: TableData) -> Self {
        self.tables.insert(table, data);
        self
    }

    /// Borrow a table's current contents.
    pub fn table(&self, table: Table) -> Option<&TableData> {
        self.tables.get(&table)
    }

    /// Number of appends and rewrites performed so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TableStore for MemoryStore {
    fn ensure(&mut self, table: Table) -> Result<()> {
        let blank = self
            .tables
            .get(&table)
            .map_or(true, |data| data.has_blank_header());
        if blank {
            self.tables.insert(table, TableData::for_table(table));
            self.writes += 1;
        }
        Ok(())
    }

    fn scan(&self, table: Table) -> Result<TableData> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or_else(|| LibrisError::Storage(format!("Table {} does not exist", table)))
    }

    fn append(&mut self, table: Table, fields: &[(&str, String)]) -> Result<()> {
        self.ensure(table)?;
        let data = self
            .tables
            .get_mut(&table)
            .ok_or_else(|| LibrisError::Storage(format!("Table {} does not exist", table)))?;
        data.require_key_column(table)?;
        let row = data.align(fields);
        data.rows.push(row);
        self.writes += 1;
        Ok(())
    }

    fn replace(&mut self, table: Table, data: &TableData) -> Result<()> {
        self.tables.insert(table, data.clone());
        self.writes += 1;
        Ok(())
    }
}
