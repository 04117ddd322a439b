//! Table storage: the `TableStore` trait, its backends, and the CSV codec.

pub mod codec;
mod csv_file;
mod memory;
mod table;
mod traits;

pub use csv_file::CsvFileStore;
pub use memory::MemoryStore;
pub use table::{Table, TableData};
pub use traits::TableStore;
