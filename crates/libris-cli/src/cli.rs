use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use libris_core::VERSION;

/// Libris - lend and track the books of a small library from the terminal
#[derive(Parser)]
#[command(name = "libris")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the library CSV tables
    #[arg(short, long, global = true, env = "LIBRIS_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Run without a subcommand to open the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (print only ids and results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging to stderr (overridden by LIBRIS_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `register-user` command
#[derive(Args)]
pub struct RegisterUserArgs {
    /// Full name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Email address (not validated)
    #[arg(value_name = "EMAIL")]
    pub email: String,

    /// Phone number (not validated)
    #[arg(value_name = "PHONE")]
    pub phone: String,
}

/// Arguments for the `add-book` command
#[derive(Args)]
pub struct AddBookArgs {
    /// Book title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Author name
    #[arg(value_name = "AUTHOR")]
    pub author: String,

    /// Category (e.g., "Fiction")
    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

/// Arguments for the `borrow` command
#[derive(Args)]
pub struct BorrowArgs {
    /// Book ID
    #[arg(value_name = "BOOK_ID")]
    pub book_id: String,

    /// User ID (recorded as given)
    #[arg(value_name = "USER_ID")]
    pub user_id: String,

    /// Loan length in days (default from config, else 14)
    #[arg(long)]
    pub days: Option<u32>,
}

/// Arguments for the `return` command
#[derive(Args)]
pub struct ReturnArgs {
    /// Loan ID
    #[arg(value_name = "LOAN_ID")]
    pub loan_id: String,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Text matched against title and author (case-insensitive)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Only books in this category (exact, case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show-book` and `show-loan` commands
#[derive(Args)]
pub struct ShowArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new user
    RegisterUser(RegisterUserArgs),

    /// Add a new book to the catalog
    AddBook(AddBookArgs),

    /// Lend a book to a user
    Borrow(BorrowArgs),

    /// Return a borrowed book
    Return(ReturnArgs),

    /// Search books by title or author
    Search(SearchArgs),

    /// Show a book by ID
    ShowBook(ShowArgs),

    /// Show a loan by ID
    ShowLoan(ShowArgs),

    /// Check that book statuses agree with open loans
    Check(CheckArgs),

    /// Open the interactive menu
    Menu,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
