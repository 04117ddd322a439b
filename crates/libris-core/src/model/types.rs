//! Record types for users, books, and loans.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lending state of a book.
///
/// Values other than `available` and `borrowed` are kept verbatim as
/// `Other` so a stray status survives a read and is never lendable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BookStatus {
    Available,
    Borrowed,
    Other(String),
}

impl BookStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Other(value) => value,
        }
    }

    /// Whether this is one of the two statuses the catalog writes.
    pub fn is_known(&self) -> bool {
        !matches!(self, BookStatus::Other(_))
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BookStatus {
    fn from(value: &str) -> Self {
        match value {
            "available" => BookStatus::Available,
            "borrowed" => BookStatus::Borrowed,
            other => BookStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BookStatus {
    fn from(value: String) -> Self {
        BookStatus::from(value.as_str())
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A registered library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub joined_date: DateTime<Utc>,
}

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status: BookStatus,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

/// One lending of one book to one user.
///
/// Open while `return_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: String,
    pub book_id: String,
    pub user_id: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Open and past its due date at `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && now > self.due_date
    }
}
