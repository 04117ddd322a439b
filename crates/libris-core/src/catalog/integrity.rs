//! Cross-table consistency check.
//!
//! Works on raw rows so that a single malformed row is reported instead of
//! aborting the whole check.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::clock::parse_optional_timestamp;
use crate::storage::{Table, TableData};

/// One inconsistency found by `Catalog::check_integrity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Book is `borrowed` but no open loan references it.
    BorrowedWithoutOpenLoan { book_id: String },
    /// Book is `available` while an open loan references it.
    AvailableWithOpenLoan { book_id: String, loan_id: String },
    /// More than one open loan references the same book.
    MultipleOpenLoans {
        book_id: String,
        loan_ids: Vec<String>,
    },
    /// The same identifier appears on more than one row.
    DuplicateId { table: Table, id: String },
    /// Loan references a book that is not in the catalog.
    UnknownBook { loan_id: String, book_id: String },
    /// Loan references a user that was never registered.
    UnknownUser { loan_id: String, user_id: String },
    /// A row whose typed columns do not parse.
    CorruptRow {
        table: Table,
        id: String,
        reason: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::BorrowedWithoutOpenLoan { book_id } => {
                write!(f, "book {} is borrowed but has no open loan", book_id)
            }
            IntegrityIssue::AvailableWithOpenLoan { book_id, loan_id } => {
                write!(f, "book {} is available but loan {} is open", book_id, loan_id)
            }
            IntegrityIssue::MultipleOpenLoans { book_id, loan_ids } => write!(
                f,
                "book {} has {} open loans: {}",
                book_id,
                loan_ids.len(),
                loan_ids.join(", ")
            ),
            IntegrityIssue::DuplicateId { table, id } => {
                write!(f, "{} id {} appears more than once", table, id)
            }
            IntegrityIssue::UnknownBook { loan_id, book_id } => {
                write!(f, "loan {} references unknown book {}", loan_id, book_id)
            }
            IntegrityIssue::UnknownUser { loan_id, user_id } => {
                write!(f, "loan {} references unknown user {}", loan_id, user_id)
            }
            IntegrityIssue::CorruptRow { table, id, reason } => {
                write!(f, "{} row {} is corrupt: {}", table, id, reason)
            }
        }
    }
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub users: usize,
    pub books: usize,
    pub loans: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

pub(super) fn check(users: &TableData, books: &TableData, loans: &TableData) -> IntegrityReport {
    let mut issues = Vec::new();

    let user_ids = unique_ids(Table::Users, users, &mut issues);
    let book_ids = unique_ids(Table::Books, books, &mut issues);
    unique_ids(Table::Loans, loans, &mut issues);

    let mut open_by_book: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in &loans.rows {
        let loan_id = loans.value(row, "loan_id");
        let book_id = loans.value(row, "book_id");
        let user_id = loans.value(row, "user_id");

        if !book_ids.contains(book_id) {
            issues.push(IntegrityIssue::UnknownBook {
                loan_id: loan_id.to_string(),
                book_id: book_id.to_string(),
            });
        }
        if !user_ids.contains(user_id) {
            issues.push(IntegrityIssue::UnknownUser {
                loan_id: loan_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        match parse_optional_timestamp(loans.value(row, "return_date")) {
            Ok(None) => open_by_book.entry(book_id).or_default().push(loan_id),
            Ok(Some(_)) => {}
            Err(err) => issues.push(IntegrityIssue::CorruptRow {
                table: Table::Loans,
                id: loan_id.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    for row in &books.rows {
        let book_id = books.value(row, "book_id");
        let open = open_by_book.get(book_id).map(Vec::as_slice).unwrap_or(&[]);

        match books.value(row, "status") {
            "borrowed" if open.is_empty() => {
                issues.push(IntegrityIssue::BorrowedWithoutOpenLoan {
                    book_id: book_id.to_string(),
                });
            }
            "available" if !open.is_empty() => {
                issues.push(IntegrityIssue::AvailableWithOpenLoan {
                    book_id: book_id.to_string(),
                    loan_id: open[0].to_string(),
                });
            }
            "borrowed" | "available" => {}
            other => issues.push(IntegrityIssue::CorruptRow {
                table: Table::Books,
                id: book_id.to_string(),
                reason: format!("unknown status {:?}", other),
            }),
        }

        if open.len() > 1 {
            issues.push(IntegrityIssue::MultipleOpenLoans {
                book_id: book_id.to_string(),
                loan_ids: open.iter().map(|id| id.to_string()).collect(),
            });
        }
    }

    IntegrityReport {
        users: users.len(),
        books: books.len(),
        loans: loans.len(),
        issues,
    }
}

fn unique_ids<'a>(
    table: Table,
    data: &'a TableData,
    issues: &mut Vec<IntegrityIssue>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for row in &data.rows {
        let id = data.value(row, table.key_column());
        if !seen.insert(id) && reported.insert(id) {
            issues.push(IntegrityIssue::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(table: Table, rows: &[&[&str]]) -> TableData {
        let mut data = TableData::for_table(table);
        for row in rows {
            data.rows.push(row.iter().map(|v| v.to_string()).collect());
        }
        data
    }

    const TS: &str = "2024-01-01T00:00:00.000000Z";

    #[test]
    fn test_consistent_tables_pass() {
        let users = table(Table::Users, &[&["u1", "Ada", "a@x", "5", TS]]);
        let books = table(
            Table::Books,
            &[
                &["b1", "T", "A", "C", "borrowed"],
                &["b2", "T2", "A2", "C", "available"],
            ],
        );
        let loans = table(
            Table::Loans,
            &[
                &["l1", "b1", "u1", TS, TS, ""],
                &["l0", "b2", "u1", TS, TS, TS],
            ],
        );

        let report = check(&users, &books, &loans);
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!((report.users, report.books, report.loans), (1, 2, 2));
    }

    #[test]
    fn test_half_finished_return_is_reported() {
        let users = table(Table::Users, &[&["u1", "Ada", "a@x", "5", TS]]);
        let books = table(Table::Books, &[&["b1", "T", "A", "C", "borrowed"]]);
        let loans = table(Table::Loans, &[&["l1", "b1", "u1", TS, TS, TS]]);

        let report = check(&users, &books, &loans);
        assert_eq!(
            report.issues,
            vec![IntegrityIssue::BorrowedWithoutOpenLoan {
                book_id: "b1".into()
            }]
        );
    }

    #[test]
    fn test_double_lending_and_dangling_refs() {
        let users = table(Table::Users, &[]);
        let books = table(
            Table::Books,
            &[&["b1", "T", "A", "C", "available"], &["b1", "T", "A", "C", "lost"]],
        );
        let loans = table(
            Table::Loans,
            &[
                &["l1", "b1", "u9", TS, TS, ""],
                &["l2", "b1", "u9", TS, TS, ""],
                &["l3", "b404", "u9", TS, TS, "not a date"],
            ],
        );

        let report = check(&users, &books, &loans);
        let issues = &report.issues;
        assert!(issues.contains(&IntegrityIssue::DuplicateId {
            table: Table::Books,
            id: "b1".into()
        }));
        assert!(issues.contains(&IntegrityIssue::AvailableWithOpenLoan {
            book_id: "b1".into(),
            loan_id: "l1".into()
        }));
        assert!(issues.contains(&IntegrityIssue::MultipleOpenLoans {
            book_id: "b1".into(),
            loan_ids: vec!["l1".into(), "l2".into()]
        }));
        assert!(issues.contains(&IntegrityIssue::UnknownBook {
            loan_id: "l3".into(),
            book_id: "b404".into()
        }));
        assert!(issues.contains(&IntegrityIssue::UnknownUser {
            loan_id: "l1".into(),
            user_id: "u9".into()
        }));
        assert!(issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::CorruptRow { table: Table::Loans, .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::CorruptRow { table: Table::Books, .. })));
    }

    #[test]
    fn test_issue_display() {
        let issue = IntegrityIssue::UnknownUser {
            loan_id: "l1".into(),
            user_id: "u9".into(),
        };
        assert_eq!(issue.to_string(), "loan l1 references unknown user u9");
    }
}
