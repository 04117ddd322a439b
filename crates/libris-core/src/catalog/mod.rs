//! The catalog service.
//!
//! `Catalog` is the only reader and writer of the users, books, and loans
//! tables. Every operation loads what it needs from the store, applies one
//! change, and writes it back before returning.
//!
//! Business-rule failures are values, not errors: `borrow_book` returns
//! `Ok(None)` when the book is missing or already lent, and `return_book`
//! returns `Ok(false)` for an unknown or already closed loan. Only storage
//! failures surface as `Err`.
//!
//! ## Consistency
//!
//! Mutating operations take `&mut self`, so callers sharing one `Catalog`
//! are serialized. Nothing guards against a second process working on the
//! same files: two borrowers can both observe a book as available before
//! either writes. Wrap each operation in a lock before introducing
//! concurrent callers.
//!
//! `return_book` writes the loans table and then the books table. A failure
//! between the two leaves the loan closed and the book still `borrowed`;
//! `check_integrity` reports that state and nothing repairs it
//! automatically.

mod integrity;
mod search;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::error::{LibrisError, Result};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::model::{Book, BookStatus, Loan, Record, User};
use crate::storage::{Table, TableStore};

pub use integrity::{IntegrityIssue, IntegrityReport};
pub use search::BookQuery;

/// Loan length used when the caller does not pick one.
pub const DEFAULT_LOAN_DAYS: u32 = 14;

/// Library catalog over an injected table store.
pub struct Catalog<S: TableStore> {
    store: S,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<S: TableStore> Catalog<S> {
    /// Open a catalog, creating any missing table with its header.
    pub fn open(mut store: S) -> Result<Self> {
        for table in Table::ALL {
            store.ensure(table)?;
        }
        Ok(Self {
            store,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        })
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the identifier source.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // --- Operations ---

    /// Register a user and return the new user id.
    pub fn register_user(&mut self, name: &str, email: &str, phone: &str) -> Result<String> {
        let user = User {
            user_id: self.ids.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            joined_date: self.clock.now(),
        };
        self.insert(&user)?;
        info!(user_id = %user.user_id, "registered user");
        Ok(user.user_id)
    }

    /// Add a book to the catalog as `available` and return its id.
    pub fn add_book(&mut self, title: &str, author: &str, category: &str) -> Result<String> {
        let book = Book {
            book_id: self.ids.next_id(),
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            status: BookStatus::Available,
        };
        self.insert(&book)?;
        info!(book_id = %book.book_id, "added book");
        Ok(book.book_id)
    }

    /// Lend a book for `days` days.
    ///
    /// Returns the new loan id, or `None` without touching storage when the
    /// book does not exist or is not available. The user id is recorded as
    /// given and not checked against the users table.
    ///
    /// # Errors
    ///
    /// Returns `LibrisError::InvalidInput` if the due date would overflow the
    /// calendar, and storage errors from the store.
    pub fn borrow_book(&mut self, book_id: &str, user_id: &str, days: u32) -> Result<Option<String>> {
        let Some(book) = self.get_book(book_id)? else {
            debug!(book_id, "borrow refused: no such book");
            return Ok(None);
        };
        if !book.is_available() {
            debug!(book_id, status = %book.status, "borrow refused: book not available");
            return Ok(None);
        }

        let borrow_date = self.clock.now();
        let due_date = Duration::try_days(i64::from(days))
            .and_then(|length| borrow_date.checked_add_signed(length))
            .ok_or_else(|| {
                LibrisError::InvalidInput(format!("Loan length of {} days is out of range", days))
            })?;

        // Status is written before the loan row is appended.
        self.update_by_id(
            Table::Books,
            book_id,
            &[("status", BookStatus::Borrowed.as_str().to_string())],
        )?;

        let loan = Loan {
            loan_id: self.ids.next_id(),
            book_id: book_id.to_string(),
            user_id: user_id.to_string(),
            borrow_date,
            due_date,
            return_date: None,
        };
        self.insert(&loan)?;
        info!(loan_id = %loan.loan_id, book_id, user_id, days, "book borrowed");
        Ok(Some(loan.loan_id))
    }

    /// Close a loan and make its book available again.
    ///
    /// Returns `false` without touching storage when the loan does not exist
    /// or was already returned.
    pub fn return_book(&mut self, loan_id: &str) -> Result<bool> {
        // Any non-empty return date, parseable or not, means returned.
        let loans = self.store.scan(Table::Loans)?;
        let Some(row) = loans.find_row(Table::Loans.key_column(), loan_id) else {
            debug!(loan_id, "return refused: no such loan");
            return Ok(false);
        };
        if !loans.value(row, "return_date").trim().is_empty() {
            debug!(loan_id, "return refused: loan already closed");
            return Ok(false);
        }
        let book_id = loans.value(row, "book_id").to_string();

        let returned_at = format_timestamp(&self.clock.now());
        self.update_by_id(Table::Loans, loan_id, &[("return_date", returned_at)])?;
        let books_changed = self.update_by_id(
            Table::Books,
            &book_id,
            &[("status", BookStatus::Available.as_str().to_string())],
        )?;
        if books_changed == 0 {
            warn!(loan_id, book_id = %book_id, "returned loan references unknown book");
        }
        info!(loan_id, book_id = %book_id, "book returned");
        Ok(true)
    }

    /// Books whose title or author contains `query` (case-insensitive),
    /// optionally limited to one category, in catalog order.
    pub fn search_books(&self, query: &str, category: Option<&str>) -> Result<Vec<Book>> {
        self.find_books(&BookQuery::new(query).category(category))
    }

    /// Books matching a prepared query, in catalog order.
    ///
    /// Every matching row is returned, including books whose stored status
    /// is neither `available` nor `borrowed`.
    pub fn find_books(&self, query: &BookQuery) -> Result<Vec<Book>> {
        let data = self.store.scan(Table::Books)?;
        let mut results = Vec::new();
        for row in &data.rows {
            let book = Book::from_row(&data, row)?;
            if query.matches(&book) {
                results.push(book);
            }
        }
        debug!(matches = results.len(), "searched books");
        Ok(results)
    }

    // --- Lookups ---

    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.find(user_id)
    }

    pub fn get_book(&self, book_id: &str) -> Result<Option<Book>> {
        self.find(book_id)
    }

    pub fn get_loan(&self, loan_id: &str) -> Result<Option<Loan>> {
        self.find(loan_id)
    }

    // --- Maintenance ---

    /// Check cross-table consistency without modifying anything.
    pub fn check_integrity(&self) -> Result<IntegrityReport> {
        let users = self.store.scan(Table::Users)?;
        let books = self.store.scan(Table::Books)?;
        let loans = self.store.scan(Table::Loans)?;
        let report = integrity::check(&users, &books, &loans);
        if !report.is_ok() {
            warn!(issues = report.issues.len(), "integrity check found problems");
        }
        Ok(report)
    }

    // --- Table helpers ---

    /// First record whose key column equals `id`.
    fn find<R: Record>(&self, id: &str) -> Result<Option<R>> {
        let data = self.store.scan(R::TABLE)?;
        data.find_row(R::TABLE.key_column(), id)
            .map(|row| R::from_row(&data, row))
            .transpose()
    }

    fn insert<R: Record>(&mut self, record: &R) -> Result<()> {
        let table = R::TABLE;
        self.store.append(table, &record.to_fields())?;
        debug!(table = %table, id = record.id(), "inserted row");
        Ok(())
    }

    /// Rewrite `table` with `updates` applied to the rows keyed by `id`.
    ///
    /// Every other row and column is written back exactly as loaded.
    fn update_by_id(&mut self, table: Table, id: &str, updates: &[(&str, String)]) -> Result<usize> {
        let mut data = self.store.scan(table)?;
        let changed = data.set_where(table.key_column(), id, updates);
        self.store.replace(table, &data)?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ids::SequentialIds;
    use crate::storage::{MemoryStore, TableData};
    use chrono::{TimeZone, Utc};

    fn catalog() -> Catalog<MemoryStore> {
        Catalog::open(MemoryStore::new())
            .unwrap()
            .with_id_generator(SequentialIds::new("id"))
    }

    #[test]
    fn test_open_creates_all_tables() {
        let catalog = catalog();
        for table in Table::ALL {
            assert_eq!(
                catalog.store().table(table),
                Some(&TableData::for_table(table))
            );
        }
    }

    #[test]
    fn test_register_user_is_retrievable() {
        let mut catalog = catalog();
        let first = catalog.register_user("Ada", "a@x.com", "555").unwrap();
        let second = catalog.register_user("Ada", "a@x.com", "555").unwrap();
        assert_ne!(first, second);

        let user = catalog.get_user(&first).unwrap().unwrap();
        assert_eq!(
            (user.name.as_str(), user.email.as_str(), user.phone.as_str()),
            ("Ada", "a@x.com", "555")
        );
    }

    #[test]
    fn test_add_book_round_trip() {
        let mut catalog = catalog();
        let id = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let book = catalog.get_book(&id).unwrap().unwrap();
        assert_eq!(book.title, "Book A");
        assert_eq!(book.author, "Auth A");
        assert_eq!(book.category, "Fiction");
        assert_eq!(book.status, BookStatus::Available);
    }

    #[test]
    fn test_borrow_then_second_borrow_fails() {
        let mut catalog = catalog();
        let user = catalog.register_user("Ada", "a@x.com", "555").unwrap();
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();

        let loan = catalog.borrow_book(&book, &user, DEFAULT_LOAN_DAYS).unwrap();
        assert!(loan.is_some());
        assert_eq!(
            catalog.get_book(&book).unwrap().unwrap().status,
            BookStatus::Borrowed
        );

        let writes = catalog.store().writes();
        assert_eq!(catalog.borrow_book(&book, &user, 14).unwrap(), None);
        assert_eq!(catalog.store().writes(), writes);
        assert_eq!(catalog.store().table(Table::Loans).unwrap().len(), 1);
    }

    #[test]
    fn test_borrow_unknown_book_writes_nothing() {
        let mut catalog = catalog();
        let writes = catalog.store().writes();
        assert_eq!(catalog.borrow_book("nope", "u1", 14).unwrap(), None);
        assert_eq!(catalog.store().writes(), writes);
    }

    #[test]
    fn test_borrow_does_not_require_registered_user() {
        let mut catalog = catalog();
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let loan_id = catalog.borrow_book(&book, "ghost", 3).unwrap().unwrap();
        assert_eq!(catalog.get_loan(&loan_id).unwrap().unwrap().user_id, "ghost");
    }

    #[test]
    fn test_borrow_due_date_overflow_is_error() {
        let mut catalog = catalog();
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let err = catalog.borrow_book(&book, "u1", u32::MAX).unwrap_err();
        assert!(matches!(err, LibrisError::InvalidInput(_)));
        assert!(catalog.get_book(&book).unwrap().unwrap().is_available());
    }

    #[test]
    fn test_return_flow() {
        let borrowed_at = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let mut catalog = catalog().with_clock(FixedClock(borrowed_at));
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let loan = catalog.borrow_book(&book, "u1", 7).unwrap().unwrap();

        assert!(catalog.return_book(&loan).unwrap());
        let closed = catalog.get_loan(&loan).unwrap().unwrap();
        assert_eq!(closed.return_date, Some(borrowed_at));
        assert!(catalog.get_book(&book).unwrap().unwrap().is_available());

        let writes = catalog.store().writes();
        assert!(!catalog.return_book(&loan).unwrap());
        assert!(!catalog.return_book("missing").unwrap());
        assert_eq!(catalog.store().writes(), writes);
    }

    #[test]
    fn test_failed_return_leaves_book_status() {
        let mut catalog = catalog();
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let first = catalog.borrow_book(&book, "u1", 7).unwrap().unwrap();
        assert!(catalog.return_book(&first).unwrap());
        catalog.borrow_book(&book, "u2", 7).unwrap().unwrap();

        assert!(!catalog.return_book(&first).unwrap());
        assert_eq!(
            catalog.get_book(&book).unwrap().unwrap().status,
            BookStatus::Borrowed
        );
    }

    #[test]
    fn test_update_preserves_unknown_columns() {
        let mut books = TableData::new(vec![
            "book_id".into(),
            "title".into(),
            "author".into(),
            "category".into(),
            "status".into(),
            "shelf".into(),
        ]);
        books.rows.push(
            ["b1", "Dune", "Herbert", "SciFi", "available", "A3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let store = MemoryStore::new().with_table(Table::Books, books);
        let mut catalog = Catalog::open(store).unwrap();

        catalog.borrow_book("b1", "u1", 14).unwrap().unwrap();

        let data = catalog.store().table(Table::Books).unwrap();
        assert_eq!(data.rows[0], vec!["b1", "Dune", "Herbert", "SciFi", "borrowed", "A3"]);
    }

    #[test]
    fn test_search_in_insertion_order_with_category() {
        let mut catalog = catalog();
        catalog
            .add_book("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy")
            .unwrap();
        catalog.add_book("Lords of Finance", "Liaquat Ahamed", "History").unwrap();
        catalog.add_book("Dune", "Frank Herbert", "SciFi").unwrap();

        let all: Vec<String> = catalog
            .search_books("LORD", None)
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(all, vec!["The Lord of the Rings", "Lords of Finance"]);

        let fantasy = catalog.search_books("lord", Some("fantasy")).unwrap();
        assert_eq!(fantasy.len(), 1);
        assert_eq!(fantasy[0].title, "The Lord of the Rings");

        assert!(catalog.search_books("zzz", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_returns_rows_with_unknown_status() {
        let mut books = TableData::for_table(Table::Books);
        books.rows.push(
            ["b1", "Lord A", "X", "C", "lost"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        books.rows.push(
            ["b2", "Lord B", "X", "C", "available"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let catalog = Catalog::open(MemoryStore::new().with_table(Table::Books, books)).unwrap();
        let found = catalog.search_books("lord", None).unwrap();
        let ids: Vec<&str> = found.iter().map(|b| b.book_id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
        assert_eq!(found[0].status, BookStatus::Other("lost".into()));
    }

    #[test]
    fn test_borrow_refuses_unknown_status() {
        let mut books = TableData::for_table(Table::Books);
        books.rows.push(
            ["b1", "Dune", "Herbert", "SciFi", "lost"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let mut catalog =
            Catalog::open(MemoryStore::new().with_table(Table::Books, books)).unwrap();
        let writes = catalog.store().writes();

        assert_eq!(catalog.borrow_book("b1", "u1", 14).unwrap(), None);
        assert_eq!(catalog.store().writes(), writes);
        assert_eq!(catalog.store().table(Table::Books).unwrap().rows[0][4], "lost");
    }

    #[test]
    fn test_return_refuses_unparseable_return_date() {
        let mut books = TableData::for_table(Table::Books);
        books.rows.push(
            ["b1", "Dune", "Herbert", "SciFi", "borrowed"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let mut loans = TableData::for_table(Table::Loans);
        loans.rows.push(
            ["l1", "b1", "u1", "2024-01-01T00:00:00Z", "2024-01-15T00:00:00Z", "returned"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let store = MemoryStore::new()
            .with_table(Table::Books, books)
            .with_table(Table::Loans, loans);
        let mut catalog = Catalog::open(store).unwrap();
        let writes = catalog.store().writes();

        assert!(!catalog.return_book("l1").unwrap());
        assert_eq!(catalog.store().writes(), writes);
        assert_eq!(catalog.store().table(Table::Books).unwrap().rows[0][4], "borrowed");
    }

    #[test]
    fn test_check_integrity_after_normal_use() {
        let mut catalog = catalog();
        let user = catalog.register_user("Ada", "a@x.com", "555").unwrap();
        let book = catalog.add_book("Book A", "Auth A", "Fiction").unwrap();
        let loan = catalog.borrow_book(&book, &user, 14).unwrap().unwrap();
        assert!(catalog.check_integrity().unwrap().is_ok());
        catalog.return_book(&loan).unwrap();
        let report = catalog.check_integrity().unwrap();
        assert!(report.is_ok());
        assert_eq!(report.loans, 1);
    }
}
