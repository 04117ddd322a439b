//! Interactive numbered menu.
//!
//! Reads one line per prompt from any `BufRead` and writes to any `Write`,
//! so sessions can be driven from a pipe or a test buffer. End of input
//! behaves like choosing Exit.

use std::io::{BufRead, Write};

use libris_core::{Catalog, TableStore};

use crate::app::AppContext;

const MENU: &str = "\n=== Library Management System ===\n\
1. Register New User\n\
2. Add New Book\n\
3. Borrow Book\n\
4. Return Book\n\
5. Search Books\n\
6. Exit";

const GOODBYE: &str = "Thank you for using the Library Management System!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    RegisterUser,
    AddBook,
    Borrow,
    Return,
    Search,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::RegisterUser),
            "2" => Some(Self::AddBook),
            "3" => Some(Self::Borrow),
            "4" => Some(Self::Return),
            "5" => Some(Self::Search),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub fn handle_menu(ctx: &AppContext) -> anyhow::Result<()> {
    let loan_days = ctx.loan_days(None)?;
    let mut catalog = ctx.open_catalog()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(&mut catalog, stdin.lock(), stdout.lock(), loan_days).run()
}

pub struct Menu<'c, S: TableStore, R, W> {
    catalog: &'c mut Catalog<S>,
    input: R,
    output: W,
    loan_days: u32,
}

impl<'c, S: TableStore, R: BufRead, W: Write> Menu<'c, S, R, W> {
    pub fn new(catalog: &'c mut Catalog<S>, input: R, output: W, loan_days: u32) -> Self {
        Self {
            catalog,
            input,
            output,
            loan_days,
        }
    }

    /// Run until Exit or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("\nEnter your choice (1-6): ")? else {
                writeln!(self.output)?;
                break;
            };

            let result = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => self.dispatch(choice),
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            match result {
                Ok(true) => {}
                Ok(false) => {
                    writeln!(self.output)?;
                    break;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "menu action failed");
                    writeln!(self.output, "Error: {}", err)?;
                }
            }
        }
        writeln!(self.output, "{}", GOODBYE)?;
        self.output.flush()?;
        Ok(())
    }

    /// Perform one action. `Ok(false)` means input ended mid-action.
    fn dispatch(&mut self, choice: MenuChoice) -> anyhow::Result<bool> {
        match choice {
            MenuChoice::RegisterUser => self.register_user(),
            MenuChoice::AddBook => self.add_book(),
            MenuChoice::Borrow => self.borrow(),
            MenuChoice::Return => self.return_book(),
            MenuChoice::Search => self.search(),
            MenuChoice::Exit => Ok(false),
        }
    }

    fn register_user(&mut self) -> anyhow::Result<bool> {
        let Some(fields) = self.prompts(&["Enter name: ", "Enter email: ", "Enter phone: "])? else {
            return Ok(false);
        };
        let user_id = self.catalog.register_user(&fields[0], &fields[1], &fields[2])?;
        writeln!(self.output, "User registered successfully! User ID: {}", user_id)?;
        Ok(true)
    }

    fn add_book(&mut self) -> anyhow::Result<bool> {
        let Some(fields) = self.prompts(&[
            "Enter book title: ",
            "Enter author name: ",
            "Enter book category: ",
        ])?
        else {
            return Ok(false);
        };
        let book_id = self.catalog.add_book(&fields[0], &fields[1], &fields[2])?;
        writeln!(self.output, "Book added successfully! Book ID: {}", book_id)?;
        Ok(true)
    }

    fn borrow(&mut self) -> anyhow::Result<bool> {
        let Some(fields) = self.prompts(&["Enter book ID: ", "Enter user ID: "])? else {
            return Ok(false);
        };
        match self.catalog.borrow_book(&fields[0], &fields[1], self.loan_days)? {
            Some(loan_id) => {
                writeln!(self.output, "Book borrowed successfully! Loan ID: {}", loan_id)?
            }
            None => writeln!(self.output, "Book is not available for borrowing.")?,
        }
        Ok(true)
    }

    fn return_book(&mut self) -> anyhow::Result<bool> {
        let Some(loan_id) = self.prompt("Enter loan ID: ")? else {
            return Ok(false);
        };
        if self.catalog.return_book(&loan_id)? {
            writeln!(self.output, "Book returned successfully!")?;
        } else {
            writeln!(self.output, "Invalid loan ID or book already returned.")?;
        }
        Ok(true)
    }

    fn search(&mut self) -> anyhow::Result<bool> {
        let Some(fields) = self.prompts(&[
            "Enter search term: ",
            "Enter category (optional, press Enter to skip): ",
        ])?
        else {
            return Ok(false);
        };
        let books = self
            .catalog
            .search_books(&fields[0], Some(fields[1].as_str()))?;

        if books.is_empty() {
            writeln!(self.output, "No books found matching your search.")?;
            return Ok(true);
        }
        writeln!(self.output, "\nSearch Results:")?;
        for book in &books {
            writeln!(self.output, "Title: {}", book.title)?;
            writeln!(self.output, "Author: {}", book.author)?;
            writeln!(self.output, "Category: {}", book.category)?;
            writeln!(self.output, "Status: {}", book.status)?;
            writeln!(self.output, "---")?;
        }
        Ok(true)
    }

    /// Ask each question in turn; `None` if input ends first.
    fn prompts(&mut self, questions: &[&str]) -> anyhow::Result<Option<Vec<String>>> {
        let mut answers = Vec::with_capacity(questions.len());
        for question in questions {
            match self.prompt(question)? {
                Some(answer) => answers.push(answer),
                None => return Ok(None),
            }
        }
        Ok(Some(answers))
    }

    /// Print `question` and read one line without its line ending.
    fn prompt(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::MemoryStore;
    use std::io::Cursor;

    fn run_session(catalog: &mut Catalog<MemoryStore>, input: &str) -> String {
        let mut output = Vec::new();
        Menu::new(catalog, Cursor::new(input.as_bytes()), &mut output, 14)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(MenuChoice::parse(" 3 \n"), Some(MenuChoice::Borrow));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("borrow"), None);
    }

    #[test]
    fn test_exit_prints_goodbye() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let out = run_session(&mut catalog, "6\n");
        assert!(out.contains("1. Register New User"));
        assert!(out.ends_with("Thank you for using the Library Management System!\n"));
    }

    #[test]
    fn test_invalid_choice_then_end_of_input() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let out = run_session(&mut catalog, "9\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Thank you for using the Library Management System!"));
    }

    #[test]
    fn test_add_borrow_and_search_session() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let book_id = catalog.add_book("Dune", "Frank Herbert", "SF").unwrap();

        let input = format!("3\n{book}\nu1\n3\n{book}\nu2\n5\ndune\n\n6\n", book = book_id);
        let out = run_session(&mut catalog, &input);

        assert!(out.contains("Book borrowed successfully! Loan ID: "));
        assert!(out.contains("Book is not available for borrowing."));
        assert!(out.contains("Search Results:\nTitle: Dune\nAuthor: Frank Herbert\nCategory: SF\nStatus: borrowed\n---\n"));
    }

    #[test]
    fn test_register_and_unknown_return() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let out = run_session(&mut catalog, "1\nAda\nada@x.com\n555\n4\nnope\n6\n");
        assert!(out.contains("User registered successfully! User ID: "));
        assert!(out.contains("Invalid loan ID or book already returned."));
    }

    #[test]
    fn test_empty_search() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let out = run_session(&mut catalog, "5\nzzz\n\n6\n");
        assert!(out.contains("No books found matching your search."));
    }

    #[test]
    fn test_input_ending_mid_action_exits() {
        let mut catalog = Catalog::open(MemoryStore::new()).unwrap();
        let out = run_session(&mut catalog, "2\nDune\n");
        assert!(out.ends_with("Thank you for using the Library Management System!\n"));
        assert!(catalog.search_books("", None).unwrap().is_empty());
    }
}
