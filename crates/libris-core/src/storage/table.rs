//! Table identities and raw row data.
//!
//! `TableData` is the untyped view of a table: a header plus string rows
//! addressed by column name. Updates go through this view so that columns
//! the record structs do not model survive a rewrite untouched.

use std::fmt;

use crate::error::{LibrisError, Result};

/// One of the three persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Books,
    Loans,
}

impl Table {
    /// All tables, in initialization order.
    pub const ALL: [Table; 3] = [Table::Users, Table::Books, Table::Loans];

    /// Short lowercase name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Books => "books",
            Table::Loans => "loans",
        }
    }

    /// Canonical header written when the table is created.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Users => &["user_id", "name", "email", "phone", "joined_date"],
            Table::Books => &["book_id", "title", "author", "category", "status"],
            Table::Loans => &[
                "loan_id",
                "book_id",
                "user_id",
                "borrow_date",
                "due_date",
                "return_date",
            ],
        }
    }

    /// The identifier column.
    pub fn key_column(self) -> &'static str {
        self.columns()[0]
    }

    /// File name used by file-backed stores.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Users => "library_users.csv",
            Table::Books => "library_books.csv",
            Table::Loans => "library_loans.csv",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully loaded table: header plus rows, all as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// An empty table carrying the canonical header for `table`.
    pub fn for_table(table: Table) -> Self {
        Self::new(table.columns().iter().map(|c| c.to_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|name| name == column)
    }

    /// True when there is no header or every header cell is blank.
    pub fn has_blank_header(&self) -> bool {
        self.header.iter().all(|name| name.trim().is_empty())
    }

    /// Fail unless the header carries `table`'s key column.
    ///
    /// # Errors
    ///
    /// Returns `LibrisError::Corrupt` naming the missing column.
    pub fn require_key_column(&self, table: Table) -> Result<()> {
        let key = table.key_column();
        if self.column_index(key).is_some() {
            return Ok(());
        }
        Err(LibrisError::corrupt(
            table.name(),
            format!("header has no {} column", key),
        ))
    }

    /// Value of `column` in `row`; missing columns and short rows read as "".
    pub fn value<'r>(&self, row: &'r [String], column: &str) -> &'r str {
        self.column_index(column)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Lay out named fields in header order.
    ///
    /// Header columns with no matching field are left empty; fields naming a
    /// column the header lacks are dropped.
    pub fn align(&self, fields: &[(&str, String)]) -> Vec<String> {
        self.header
            .iter()
            .map(|column| {
                fields
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// First row whose `column` equals `value`.
    pub fn find_row(&self, column: &str, value: &str) -> Option<&[String]> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| row.get(idx).map(String::as_str) == Some(value))
            .map(Vec::as_slice)
    }

    /// Set `updates` on every row whose `key_column` equals `key`.
    ///
    /// Returns the number of rows changed. An update naming a column the
    /// header lacks appends that column to the header first.
    pub fn set_where(&mut self, key_column: &str, key: &str, updates: &[(&str, String)]) -> usize {
        let Some(key_idx) = self.column_index(key_column) else {
            return 0;
        };
        let matches = |row: &Vec<String>| row.get(key_idx).map(String::as_str) == Some(key);
        if !self.rows.iter().any(matches) {
            return 0;
        }

        let targets: Vec<usize> = updates
            .iter()
            .map(|(column, _)| self.ensure_column(column))
            .collect();
        let width = self.header.len();

        let mut changed = 0;
        for row in &mut self.rows {
            if !matches(&*row) {
                continue;
            }
            if row.len() < width {
                row.resize(width, String::new());
            }
            for (target, (_, value)) in targets.iter().zip(updates) {
                row[*target] = value.clone();
            }
            changed += 1;
        }
        changed
    }

    fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(idx) = self.column_index(column) {
            return idx;
        }
        self.header.push(column.to_string());
        self.header.len() - 1
    }
}
