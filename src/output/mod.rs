//! Report writers.
//!
//! This module handles writing ranked rows in various formats:
//! - CSV text (default, one header line plus one line per key)
//! - Pretty JSON

pub mod csv;
pub mod json;

// Re-export main functions
pub use csv::write_csv;
pub use json::{write_json, Report};

use crate::utils::error::OutputError;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Open the report destination: `path` if given, stdout otherwise
///
/// Missing parent directories of `path` are created.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, OutputError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(OutputError::WriteFailed)?;
    Ok(Box::new(BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_open_output_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("nested/dirs/report.csv");

        let mut writer = open_output(Some(&nested)).unwrap();
        writer.write_all(b"#srcport,packets,bytes\n").unwrap();
        writer.flush().unwrap();
        drop(writer);

        assert_eq!(
            std::fs::read_to_string(&nested).unwrap(),
            "#srcport,packets,bytes\n"
        );
    }
}
