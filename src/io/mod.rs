pub mod row_source;

pub use row_source::{CsvRowSource, MemoryRowSource, Record, RowSource};

use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write file", path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system("Failed to create directory", path, e))?;
    }
    Ok(())
}
