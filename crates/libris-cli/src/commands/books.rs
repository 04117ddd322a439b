use libris_core::BookQuery;

use crate::app::AppContext;
use crate::cli::{AddBookArgs, SearchArgs, ShowArgs};
use crate::errors::CliError;
use crate::output::{book_json, books_json, print_book, print_book_list};
use crate::ui;

pub fn handle_add_book(ctx: &AppContext, args: &AddBookArgs) -> anyhow::Result<()> {
    let mut catalog = ctx.open_catalog()?;
    let book_id = catalog.add_book(&args.title, &args.author, &args.category)?;

    if ctx.quiet() {
        println!("{}", book_id);
        return Ok(());
    }
    let ui_ctx = ctx.ui(false)?;
    println!(
        "{}",
        ui::receipt(
            &ui_ctx,
            "Book added",
            &[("Book ID", book_id.as_str()), ("Title", args.title.as_str())]
        )
    );
    Ok(())
}

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let catalog = ctx.open_catalog()?;
    let query = BookQuery::new(&args.query).category(args.category.as_deref());
    let mut books = catalog.find_books(&query)?;
    if let Some(limit) = args.limit {
        books.truncate(limit);
    }

    let ui_ctx = ctx.ui(args.json)?;
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&books_json(&books))?);
        return Ok(());
    }
    if ctx.quiet() {
        for book in &books {
            println!("{}", book.book_id);
        }
        return Ok(());
    }
    if books.is_empty() {
        println!(
            "{}",
            ui::badge(&ui_ctx, ui::Badge::Info, "No books found matching your search.")
        );
        return Ok(());
    }
    print_book_list(&ui_ctx, &books);
    Ok(())
}

pub fn handle_show_book(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let catalog = ctx.open_catalog()?;
    let book = catalog.get_book(&args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Book not found: {}", args.id),
            "Hint: Run `libris search \"\"` to list book IDs.",
        )
    })?;

    let ui_ctx = ctx.ui(args.json)?;
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&book_json(&book))?);
    } else {
        print_book(&ui_ctx, &book);
    }
    Ok(())
}
