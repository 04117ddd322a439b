//! Filesystem helpers for whole-table rewrites.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Replace `destination` with `data` via a sibling temp file and a rename.
///
/// Readers observe either the old contents or the new contents, never a
/// partially written table.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed into place.
/// The temp file is removed on failure.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = temp_sibling(destination)?;

    let result = (|| {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename_with_fallback(&temp_path, destination)
}

/// Rename `temp_path` onto `destination`, removing the destination first on
/// platforms where rename refuses to overwrite.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    let Err(initial_err) = fs::rename(temp_path, destination) else {
        return Ok(());
    };

    let _ = fs::remove_file(destination);
    fs::rename(temp_path, destination).map_err(|retry_err| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(
            retry_err.kind(),
            format!(
                "Rename of {} failed (initial: {}, retry: {})",
                destination.display(),
                initial_err,
                retry_err
            ),
        )
    })
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid table path: {}", path.display()),
            )
        })?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(format!("System time error: {}", e)))?
        .as_nanos();
    Ok(parent.join(format!(".{}.{}.tmp", filename, nanos)))
}
