//! Recursive discovery of input files.
//!
//! Every regular file below the root is an input, including symlinks that
//! point at regular files. Directory symlinks are not followed. Entries are
//! visited in file-name order; aggregation does not depend on it.

use crate::utils::error::InputError;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazy iterator over input file paths
///
/// Unreadable subdirectories are logged, counted and skipped.
pub struct InputWalker {
    root: PathBuf,
    entries: walkdir::IntoIter,
    skipped: u64,
}

/// Start walking `root`
///
/// **Public** - entry point for input discovery
///
/// # Errors
/// * `InputError::UnreadableDirectory` - root missing or cannot be listed
/// * `InputError::NotADirectory` - root exists but is not a directory
pub fn walk_input(root: &Path) -> Result<InputWalker, InputError> {
    let metadata = std::fs::metadata(root).map_err(|source| InputError::UnreadableDirectory {
        path: root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(InputError::NotADirectory(root.to_path_buf()));
    }

    // Listing failures on the root are fatal, unlike those further down
    std::fs::read_dir(root).map_err(|source| InputError::UnreadableDirectory {
        path: root.to_path_buf(),
        source,
    })?;

    debug!("Walking input directory: {}", root.display());

    Ok(InputWalker {
        root: root.to_path_buf(),
        entries: WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter(),
        skipped: 0,
    })
}

impl InputWalker {
    /// Number of entries skipped because they could not be read
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for InputWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let error = InputError::UnreadableDirectory {
                        path,
                        source: err.into(),
                    };
                    warn!("Skipping: {}", error);
                    self.skipped += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // is_file follows symlinks
            if entry.path().is_file() {
                return Some(entry.into_path());
            }

            warn!("Skipping non-regular entry: {}", entry.path().display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("top.bin"), b"").unwrap();
        fs::write(dir.path().join("a/mid.bin"), b"").unwrap();
        fs::write(dir.path().join("a/b/deep.bin"), b"").unwrap();

        let mut names: Vec<String> = walk_input(dir.path())
            .unwrap()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["deep.bin", "mid.bin", "top.bin"]);
    }

    #[test]
    fn test_walk_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut walker = walk_input(dir.path()).unwrap();
        assert!(walker.next().is_none());
        assert_eq!(walker.skipped(), 0);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = walk_input(&dir.path().join("nope"));
        assert!(matches!(result, Err(InputError::UnreadableDirectory { .. })));
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("flows.bin");
        fs::write(&file, b"").unwrap();

        assert!(matches!(
            walk_input(&file),
            Err(InputError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlinks_are_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.bin");
        fs::write(&target, b"").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.bin")).unwrap();

        assert_eq!(walk_input(dir.path()).unwrap().count(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.bin"), b"").unwrap();
        fs::write(dir.path().join("open.bin"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut walker = walk_input(dir.path()).unwrap();
        let names: Vec<String> = walker
            .by_ref()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        let skipped = walker.skipped();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(names, vec!["open.bin"]);
        assert_eq!(skipped, 1);
    }
}
