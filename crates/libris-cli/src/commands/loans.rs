use chrono::Utc;

use crate::app::AppContext;
use crate::cli::{BorrowArgs, ReturnArgs, ShowArgs};
use crate::errors::CliError;
use crate::output::{loan_json, print_loan};
use crate::ui;

pub fn handle_borrow(ctx: &AppContext, args: &BorrowArgs) -> anyhow::Result<()> {
    let days = ctx.loan_days(args.days)?;
    let mut catalog = ctx.open_catalog()?;

    let loan_id = match catalog.borrow_book(&args.book_id, &args.user_id, days) {
        Ok(Some(loan_id)) => loan_id,
        Ok(None) => {
            return Err(CliError::refused_with_hint(
                "Book is not available for borrowing.",
                format!("Hint: Run `libris show-book {}` to see its status.", args.book_id),
            )
            .into())
        }
        Err(libris_core::LibrisError::InvalidInput(message)) => {
            return Err(CliError::invalid_input(message).into())
        }
        Err(err) => return Err(err.into()),
    };

    if ctx.quiet() {
        println!("{}", loan_id);
        return Ok(());
    }
    let ui_ctx = ctx.ui(false)?;
    let days_text = days.to_string();
    println!(
        "{}",
        ui::receipt(
            &ui_ctx,
            "Book borrowed",
            &[
                ("Loan ID", loan_id.as_str()),
                ("Book ID", args.book_id.as_str()),
                ("Days", days_text.as_str()),
            ]
        )
    );
    Ok(())
}

pub fn handle_return(ctx: &AppContext, args: &ReturnArgs) -> anyhow::Result<()> {
    let mut catalog = ctx.open_catalog()?;
    if !catalog.return_book(&args.loan_id)? {
        return Err(CliError::refused_with_hint(
            "Invalid loan ID or book already returned.",
            format!("Hint: Run `libris show-loan {}` to inspect the loan.", args.loan_id),
        )
        .into());
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui(false)?;
        println!(
            "{}",
            ui::receipt(&ui_ctx, "Book returned", &[("Loan ID", args.loan_id.as_str())])
        );
    }
    Ok(())
}

pub fn handle_show_loan(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let catalog = ctx.open_catalog()?;
    let loan = catalog.get_loan(&args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Loan not found: {}", args.id),
            "Hint: Loan IDs are printed by `libris borrow`.",
        )
    })?;

    let now = Utc::now();
    let ui_ctx = ctx.ui(args.json)?;
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&loan_json(&loan, now))?);
    } else {
        print_loan(&ui_ctx, &loan, now);
    }
    Ok(())
}
