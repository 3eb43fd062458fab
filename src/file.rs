use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Suffix appended to a file name to form its backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

/// A UTF-8 text file loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    /// Path the content was read from
    pub path: PathBuf,

    /// File content
    pub content: String,
}

impl TextFile {
    /// Reads a text file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] if the path does not exist or is not
    /// a regular file, [`Error::InvalidUtf8`] if the content is not UTF-8,
    /// and [`Error::Io`] for other read failures.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = read_text(&path)?;
        Ok(Self { path, content })
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }

    /// Returns the number of whitespace-separated words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// Reads a file as UTF-8 text.
///
/// # Errors
///
/// See [`TextFile::read`].
pub fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }

    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::invalid_utf8(path))
}

/// Returns the backup location for `path`: the full file name plus `.bak`.
///
/// `notes.txt` becomes `notes.txt.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, BACKUP_SUFFIX)
}

/// Writes `original` to the backup location of `path`.
///
/// An existing backup is overwritten.
///
/// # Errors
///
/// Returns an error if the backup cannot be written.
pub fn write_backup(path: &Path, original: &str) -> Result<PathBuf> {
    let backup = backup_path(path);
    write_text_atomic(&backup, original)?;
    debug!("Created backup: {}", backup.display());
    Ok(backup)
}

/// Replaces `path` with the content of its backup.
///
/// The backup is left in place.
///
/// # Errors
///
/// Returns [`Error::BackupNotFound`] if there is no backup, or an IO error
/// if reading or writing fails.
pub fn restore(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    if !backup.is_file() {
        return Err(Error::backup_not_found(backup));
    }

    let original = read_text(&backup)?;
    write_text_atomic(path, &original)?;
    debug!("Restored {} from {}", path.display(), backup.display());
    Ok(backup)
}

/// Writes a file atomically.
///
/// # Process
///
/// 1. Writes content to a uniquely named temporary file in the target's directory
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over the target path
///
/// An existing target keeps its permissions. The temporary file is removed
/// whenever a step fails, and no other file in the directory is touched.
///
/// # Errors
///
/// Returns an error if any step fails.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(temp_file.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| Error::io(temp_file.path(), e))?;
    }

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file.persist(path).map_err(|e| Error::io(path, e.error))?;

    Ok(())
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt.bak")
        );
        assert_eq!(
            backup_path(Path::new("dir/README")),
            PathBuf::from("dir/README.bak")
        );
    }

    #[test]
    fn test_read_text_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("line one\nline two words").unwrap();

        let text = TextFile::read(file.path()).unwrap();
        assert_eq!(text.content, "line one\nline two words");
        assert_eq!(text.word_count(), 5);
        assert_eq!(text.line_count(), 2);
        assert_eq!(text.size_bytes(), 23);
    }

    #[test]
    fn test_read_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = TextFile::read(temp.child("missing.txt").path()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_read_directory_is_not_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = read_text(temp.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("binary.dat");
        file.write_binary(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_text(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_write_text_atomic_replaces_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("out.txt");
        file.write_str("old").unwrap();

        write_text_atomic(file.path(), "new 🎉").unwrap();

        file.assert("new 🎉");
        let leftovers: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_write_text_atomic_keeps_neighbouring_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("old").unwrap();
        let user_tmp = temp.child("notes.txt.tmp");
        user_tmp.write_str("IMPORTANT USER DATA").unwrap();
        let user_bak_tmp = temp.child("notes.txt.bak.tmp");
        user_bak_tmp.write_str("ALSO MINE").unwrap();

        write_backup(file.path(), "old").unwrap();
        write_text_atomic(file.path(), "new").unwrap();

        file.assert("new");
        temp.child("notes.txt.bak").assert("old");
        user_tmp.assert("IMPORTANT USER DATA");
        user_bak_tmp.assert("ALSO MINE");
    }

    #[test]
    fn test_write_text_atomic_failure_leaves_no_temp_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let target = temp.child("occupied");
        target.create_dir_all().unwrap();
        target.child("inner.txt").write_str("x").unwrap();

        assert!(write_text_atomic(target.path(), "new").is_err());

        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_text_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("script.sh");
        file.write_str("echo hi").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o754)).unwrap();

        write_text_atomic(file.path(), "echo HI 🎉").unwrap();

        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o754);
    }

    #[test]
    fn test_write_backup_and_restore() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("original").unwrap();

        let backup = write_backup(file.path(), "original").unwrap();
        assert_eq!(backup, temp.child("notes.txt.bak").path());

        file.write_str("CHAOS 🚀").unwrap();
        let restored_from = restore(file.path()).unwrap();

        assert_eq!(restored_from, backup);
        file.assert("original");
        temp.child("notes.txt.bak").assert("original");
    }

    #[test]
    fn test_restore_without_backup() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.txt");
        file.write_str("text").unwrap();

        let err = restore(file.path()).unwrap_err();
        assert!(matches!(err, Error::BackupNotFound { .. }));
        file.assert("text");
    }
}
