//! Text and table output formatting.

use chrono::{DateTime, Utc};
use libris_core::{Book, IntegrityReport, Loan};

use crate::ui::{self, Badge, UiContext};

const BOOK_HEADERS: [&str; 5] = ["ID", "Title", "Author", "Category", "Status"];
const STATUS_COLUMN: usize = 4;

fn book_row(book: &Book) -> Vec<String> {
    vec![
        book.book_id.clone(),
        book.title.clone(),
        book.author.clone(),
        book.category.clone(),
        book.status.to_string(),
    ]
}

pub fn print_book(ctx: &UiContext, book: &Book) {
    let status = ui::theme::status(book.status.as_str(), book.is_available(), ctx.color);
    for (key, value) in [
        ("Book ID", book.book_id.as_str()),
        ("Title", book.title.as_str()),
        ("Author", book.author.as_str()),
        ("Category", book.category.as_str()),
        ("Status", status.as_str()),
    ] {
        println!("{}", ui::kv(ctx, key, value));
    }
}

pub fn print_book_list(ctx: &UiContext, books: &[Book]) {
    let rows: Vec<Vec<String>> = books.iter().map(book_row).collect();
    println!("{}", ui::table(ctx, &BOOK_HEADERS, &rows, Some(STATUS_COLUMN)));
}

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn print_loan(ctx: &UiContext, loan: &Loan, now: DateTime<Utc>) {
    let returned = loan
        .return_date
        .as_ref()
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());
    let state = if !loan.is_open() {
        "returned"
    } else if loan.is_overdue(now) {
        "overdue"
    } else {
        "open"
    };

    println!("{}", ui::kv(ctx, "Loan ID", &loan.loan_id));
    println!("{}", ui::kv(ctx, "Book ID", &loan.book_id));
    println!("{}", ui::kv(ctx, "User ID", &loan.user_id));
    println!("{}", ui::kv(ctx, "Borrowed", &format_date(&loan.borrow_date)));
    println!("{}", ui::kv(ctx, "Due", &format_date(&loan.due_date)));
    println!("{}", ui::kv(ctx, "Returned", &returned));
    println!("{}", ui::kv(ctx, "State", state));
}

pub fn print_report(ctx: &UiContext, report: &IntegrityReport) {
    let counts = format!(
        "{} users, {} books, {} loans",
        report.users, report.books, report.loans
    );
    if report.is_ok() {
        println!("{}", ui::badge(ctx, Badge::Ok, &format!("Consistent ({})", counts)));
        return;
    }

    println!(
        "{}",
        ui::badge(
            ctx,
            Badge::Warn,
            &format!("{} issue(s) found ({})", report.issues.len(), counts)
        )
    );
    for issue in &report.issues {
        println!("  - {}", issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
        assert_eq!(format_date(&ts), "2024-03-09 14:05 UTC");
    }

    #[test]
    fn test_book_row_order_matches_headers() {
        let book = Book {
            book_id: "b1".into(),
            title: "Dune".into(),
            author: "Herbert".into(),
            category: "SF".into(),
            status: libris_core::BookStatus::Available,
        };
        let row = book_row(&book);
        assert_eq!(row.len(), BOOK_HEADERS.len());
        assert_eq!(row[STATUS_COLUMN], "available");
    }
}
