//! File system utilities.

use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// List regular files directly inside `dir` (non-recursive), sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Failed to read directory entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Rename `from` to `to` without ever overwriting.
///
/// Links `to` first and only then unlinks `from`, so a destination created
/// concurrently makes the link fail instead of being replaced. Filesystems
/// without hard links fall back to a checked rename.
///
/// Fails with `FileAlreadyExists` if `to` exists and with `SourceVanished`
/// if `from` is gone.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    match std::fs::hard_link(from, to) {
        Ok(()) => match std::fs::remove_file(from) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        },
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(crate::Error::FileAlreadyExists(to.display().to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !from.exists() => {
            Err(crate::Error::SourceVanished(from.display().to_string()))
        }
        Err(e) => {
            tracing::debug!("Hard link to {} failed ({}), using rename", to.display(), e);
            checked_rename(from, to)
        }
    }
}

fn checked_rename(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
    }

    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !from.exists() => {
            Err(crate::Error::SourceVanished(from.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// File name of a path, if it is valid UTF-8.
pub fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// File name for display, with invalid UTF-8 replaced.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_is_flat_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.mkv"), "").unwrap();
        fs::write(temp_dir.path().join("a.mkv"), "").unwrap();
        fs::create_dir(temp_dir.path().join("Sub")).unwrap();
        fs::write(temp_dir.path().join("Sub").join("c.mkv"), "").unwrap();

        let files = list_files(temp_dir.path()).unwrap();
        let names: Vec<&str> = files.iter().filter_map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.mkv", "b.mkv"]);
    }

    #[test]
    fn test_list_files_rejects_non_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.mkv");
        fs::write(&file, "").unwrap();

        assert!(matches!(list_files(&file), Err(crate::Error::NotADirectory(_))));
        assert!(matches!(
            list_files(&temp_dir.path().join("missing")),
            Err(crate::Error::PathNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_name_rejects_invalid_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/media").join(OsStr::from_bytes(b"Movie.2010.Dir\xffCut.mkv"));
        assert_eq!(file_name(&path), None);
        assert_eq!(display_name(&path), "Movie.2010.Dir\u{fffd}Cut.mkv");
        assert_eq!(file_name(Path::new("/media/Heat.1995.mkv")), Some("Heat.1995.mkv"));
    }

    #[test]
    fn test_rename_file() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("old.mkv");
        let to = temp_dir.path().join("new.mkv");
        fs::write(&from, "data").unwrap();

        rename_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_leaves_single_link() {
        use std::os::unix::fs::MetadataExt;

        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("Heat.1995.mkv");
        let to = temp_dir.path().join("Heat (1995).mkv");
        fs::write(&from, "data").unwrap();

        rename_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::metadata(&to).unwrap().nlink(), 1);
    }

    #[test]
    fn test_checked_rename_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("old.mkv");
        let to = temp_dir.path().join("new.mkv");
        fs::write(&from, "old").unwrap();
        fs::write(&to, "new").unwrap();

        assert!(matches!(
            checked_rename(&from, &to),
            Err(crate::Error::FileAlreadyExists(_))
        ));
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
    }

    #[test]
    fn test_rename_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("old.mkv");
        let to = temp_dir.path().join("new.mkv");
        fs::write(&from, "old").unwrap();
        fs::write(&to, "new").unwrap();

        assert!(matches!(
            rename_file(&from, &to),
            Err(crate::Error::FileAlreadyExists(_))
        ));
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
        assert!(from.exists());
    }

    #[test]
    fn test_rename_vanished_source() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("gone.mkv");
        let to = temp_dir.path().join("new.mkv");

        assert!(matches!(
            rename_file(&from, &to),
            Err(crate::Error::SourceVanished(_))
        ));
    }
}
