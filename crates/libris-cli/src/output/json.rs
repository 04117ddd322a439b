//! JSON output formatting.

use chrono::{DateTime, Utc};
use libris_core::{Book, IntegrityReport, Loan};

pub fn book_json(book: &Book) -> serde_json::Value {
    serde_json::json!({
        "book_id": book.book_id,
        "title": book.title,
        "author": book.author,
        "category": book.category,
        "status": book.status,
    })
}

pub fn books_json(books: &[Book]) -> Vec<serde_json::Value> {
    books.iter().map(book_json).collect()
}

pub fn loan_json(loan: &Loan, now: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "loan_id": loan.loan_id,
        "book_id": loan.book_id,
        "user_id": loan.user_id,
        "borrow_date": loan.borrow_date,
        "due_date": loan.due_date,
        "return_date": loan.return_date,
        "open": loan.is_open(),
        "overdue": loan.is_overdue(now),
    })
}

pub fn report_json(report: &IntegrityReport) -> serde_json::Value {
    let issues: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
    serde_json::json!({
        "ok": report.is_ok(),
        "users": report.users,
        "books": report.books,
        "loans": report.loans,
        "issues": issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use libris_core::BookStatus;

    #[test]
    fn test_book_status_is_snake_case() {
        let book = Book {
            book_id: "b1".into(),
            title: "Dune".into(),
            author: "Herbert".into(),
            category: "SF".into(),
            status: BookStatus::Borrowed,
        };
        let value = book_json(&book);
        assert_eq!(value["status"], "borrowed");
        assert_eq!(value["title"], "Dune");
    }

    #[test]
    fn test_loan_flags() {
        let borrowed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let loan = Loan {
            loan_id: "l1".into(),
            book_id: "b1".into(),
            user_id: "u1".into(),
            borrow_date: borrowed,
            due_date: borrowed + chrono::Duration::days(14),
            return_date: None,
        };
        let later = borrowed + chrono::Duration::days(30);
        let value = loan_json(&loan, later);
        assert_eq!(value["open"], true);
        assert_eq!(value["overdue"], true);
        assert!(value["return_date"].is_null());
    }
}
