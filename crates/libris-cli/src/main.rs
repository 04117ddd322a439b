//! Libris CLI - lend and track the books of a small library
//!
//! Subcommands perform one catalog operation each; without a subcommand
//! the interactive menu runs.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;
use crate::ui::UiContext;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let ctx = AppContext::new(&cli);
    if let Err(err) = run(&ctx, &cli) {
        let ui_ctx = UiContext::from_env(false, ctx.color_disabled());
        ui::print_error(&ui_ctx, &format!("{:#}", err));
        let code = err
            .downcast_ref::<CliError>()
            .map(CliError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::RegisterUser(args)) => commands::handle_register_user(ctx, args),
        Some(Commands::AddBook(args)) => commands::handle_add_book(ctx, args),
        Some(Commands::Borrow(args)) => commands::handle_borrow(ctx, args),
        Some(Commands::Return(args)) => commands::handle_return(ctx, args),
        Some(Commands::Search(args)) => commands::handle_search(ctx, args),
        Some(Commands::ShowBook(args)) => commands::handle_show_book(ctx, args),
        Some(Commands::ShowLoan(args)) => commands::handle_show_loan(ctx, args),
        Some(Commands::Check(args)) => commands::handle_check(ctx, args),
        Some(Commands::Completions(args)) => commands::handle_completions(args),
        Some(Commands::Menu) | None => commands::handle_menu(ctx),
    }
}
