//! Mapping between records and raw table rows.

use crate::clock::{format_timestamp, parse_optional_timestamp, parse_timestamp};
use crate::error::{LibrisError, Result};
use crate::model::types::{Book, BookStatus, Loan, User};
use crate::storage::{Table, TableData};

/// A record stored as one row of a table.
pub trait Record: Sized {
    /// The table holding this record.
    const TABLE: Table;

    /// Identifier (value of the table's key column).
    fn id(&self) -> &str;

    /// Named column values for writing.
    fn to_fields(&self) -> Vec<(&'static str, String)>;

    /// Parse one row of `data`.
    ///
    /// # Errors
    ///
    /// Returns `LibrisError::Corrupt` if a typed column cannot be parsed.
    fn from_row(data: &TableData, row: &[String]) -> Result<Self>;
}

fn corrupt(table: Table, column: &str, err: LibrisError) -> LibrisError {
    LibrisError::corrupt(table.name(), format!("{}: {}", column, err))
}

fn timestamp_column(
    table: Table,
    data: &TableData,
    row: &[String],
    column: &str,
) -> Result<chrono::DateTime<chrono::Utc>> {
    parse_timestamp(data.value(row, column)).map_err(|e| corrupt(table, column, e))
}

impl Record for User {
    const TABLE: Table = Table::Users;

    fn id(&self) -> &str {
        &self.user_id
    }

    fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user_id", self.user_id.clone()),
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("joined_date", format_timestamp(&self.joined_date)),
        ]
    }

    fn from_row(data: &TableData, row: &[String]) -> Result<Self> {
        Ok(User {
            user_id: data.value(row, "user_id").to_string(),
            name: data.value(row, "name").to_string(),
            email: data.value(row, "email").to_string(),
            phone: data.value(row, "phone").to_string(),
            joined_date: timestamp_column(Self::TABLE, data, row, "joined_date")?,
        })
    }
}

impl Record for Book {
    const TABLE: Table = Table::Books;

    fn id(&self) -> &str {
        &self.book_id
    }

    fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("book_id", self.book_id.clone()),
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("category", self.category.clone()),
            ("status", self.status.as_str().to_string()),
        ]
    }

    fn from_row(data: &TableData, row: &[String]) -> Result<Self> {
        Ok(Book {
            book_id: data.value(row, "book_id").to_string(),
            title: data.value(row, "title").to_string(),
            author: data.value(row, "author").to_string(),
            category: data.value(row, "category").to_string(),
            status: BookStatus::from(data.value(row, "status")),
        })
    }
}

impl Record for Loan {
    const TABLE: Table = Table::Loans;

    fn id(&self) -> &str {
        &self.loan_id
    }

    fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("loan_id", self.loan_id.clone()),
            ("book_id", self.book_id.clone()),
            ("user_id", self.user_id.clone()),
            ("borrow_date", format_timestamp(&self.borrow_date)),
            ("due_date", format_timestamp(&self.due_date)),
            (
                "return_date",
                self.return_date
                    .as_ref()
                    .map(format_timestamp)
                    .unwrap_or_default(),
            ),
        ]
    }

    fn from_row(data: &TableData, row: &[String]) -> Result<Self> {
        let return_date = parse_optional_timestamp(data.value(row, "return_date"))
            .map_err(|e| corrupt(Self::TABLE, "return_date", e))?;
        Ok(Loan {
            loan_id: data.value(row, "loan_id").to_string(),
            book_id: data.value(row, "book_id").to_string(),
            user_id: data.value(row, "user_id").to_string(),
            borrow_date: timestamp_column(Self::TABLE, data, row, "borrow_date")?,
            due_date: timestamp_column(Self::TABLE, data, row, "due_date")?,
            return_date,
        })
    }
}
