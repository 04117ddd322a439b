//! CSV file storage backend.
//!
//! Each table lives in its own CSV file inside a data directory. Appends
//! write a single encoded row; every other change rewrites the file through
//! `fs::write_atomic`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LibrisError, Result};
use crate::fs::write_atomic;
use crate::storage::codec::{decode_table, encode_row, encode_table};
use crate::storage::table::{Table, TableData};
use crate::storage::traits::TableStore;

/// File-backed table store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    dir: PathBuf,
}

impl CsvFileStore {
    /// Open a store in `dir`, creating the directory if needed.
    ///
    /// Tables are not created here; the catalog calls `ensure` for each.
    ///
    /// # Errors
    ///
    /// Returns `LibrisError::InvalidInput` if `dir` exists but is not a
    /// directory, `LibrisError::Storage` if it cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(LibrisError::InvalidInput(format!(
                "Data path is not a directory: {}",
                dir.display()
            )));
        }
        fs::create_dir_all(&dir).map_err(|e| {
            LibrisError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `table`.
    pub fn path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    fn read(&self, table: Table) -> Result<Vec<u8>> {
        let path = self.path(table);
        fs::read(&path).map_err(|e| {
            LibrisError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

impl TableStore for CsvFileStore {
    fn ensure(&mut self, table: Table) -> Result<()> {
        let path = self.path(table);
        let is_blank = match fs::metadata(&path) {
            Ok(meta) if meta.len() == 0 => true,
            Ok(_) => decode_table(&self.read(table)?)?.has_blank_header(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                return Err(LibrisError::Storage(format!(
                    "Failed to stat {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        if !is_blank {
            return Ok(());
        }

        debug!(table = %table, path = %path.display(), "creating table file");
        let bytes = encode_table(&TableData::for_table(table))?;
        write_atomic(&path, &bytes).map_err(|e| {
            LibrisError::Storage(format!("Failed to create {}: {}", path.display(), e))
        })
    }

    fn scan(&self, table: Table) -> Result<TableData> {
        let bytes = self.read(table)?;
        let data = decode_table(&bytes)?;
        debug!(table = %table, rows = data.len(), "scanned table");
        Ok(data)
    }

    fn append(&mut self, table: Table, fields: &[(&str, String)]) -> Result<()> {
        self.ensure(table)?;
        let existing = self.read(table)?;
        let header = decode_table(&existing)?;
        header.require_key_column(table)?;

        let mut bytes = Vec::new();
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            bytes.push(b'\n');
        }
        bytes.extend(encode_row(&header.align(fields))?);

        let path = self.path(table);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| {
                LibrisError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;
        file.write_all(&bytes).map_err(|e| {
            LibrisError::Storage(format!("Failed to append to {}: {}", path.display(), e))
        })?;
        debug!(table = %table, "appended row");
        Ok(())
    }

    fn replace(&mut self, table: Table, data: &TableData) -> Result<()> {
        let path = self.path(table);
        let bytes = encode_table(data)?;
        write_atomic(&path, &bytes).map_err(|e| {
            LibrisError::Storage(format!("Failed to rewrite {}: {}", path.display(), e))
        })?;
        debug!(table = %table, rows = data.len(), "rewrote table");
        Ok(())
    }
}
