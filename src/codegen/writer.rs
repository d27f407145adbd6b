//! Safe File Writing
//!
//! Commits a fully buffered document to disk in one step: the text goes to a
//! temporary file next to the target, is flushed, and is then renamed over the
//! target. The target either keeps its old content or holds the complete new
//! content; it is never left truncated halfway.

use crate::error::{GeneratorError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Safe file writer with atomic replacement and optional backups
#[derive(Debug, Clone, Default)]
pub struct SafeCodeWriter {
    /// Copy the previous file to `<name>.bak` before overwriting
    pub create_backups: bool,
}

impl SafeCodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backups(mut self, enabled: bool) -> Self {
        self.create_backups = enabled;
        self
    }

    /// Replace the content of `path` with `content`.
    ///
    /// Whatever the file held before is discarded. A symlinked `path` is
    /// written through, so the file it points to receives the content.
    /// Errors are returned as-is and never retried.
    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        let target = resolve_target(path)?;

        let parent = parent_dir(&target);
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| GeneratorError::io(parent, e))?;
        }

        self.check_permissions(&target)?;

        if self.create_backups && target.is_file() {
            self.create_backup(&target)?;
        }

        self.atomic_write(&target, content)
    }

    fn check_permissions(&self, path: &Path) -> Result<()> {
        if path.exists() {
            let metadata = fs::metadata(path).map_err(|e| GeneratorError::io(path, e))?;
            if metadata.permissions().readonly() {
                return Err(GeneratorError::ReadOnly {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    fn create_backup(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| GeneratorError::Config(format!("invalid file name: {path:?}")))?;
        let backup_path = path.with_file_name(format!("{}.bak", file_name.to_string_lossy()));

        fs::copy(path, &backup_path).map_err(|e| GeneratorError::io(&backup_path, e))?;
        tracing::debug!(backup = %backup_path.display(), "created backup");
        Ok(backup_path)
    }

    fn atomic_write(&self, path: &Path, content: &str) -> Result<()> {
        let parent = parent_dir(path);

        let mut temp_file =
            NamedTempFile::new_in(parent).map_err(|e| GeneratorError::io(parent, e))?;
        let temp_path = temp_file.path().to_path_buf();
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| GeneratorError::io(&temp_path, e))?;
        temp_file
            .flush()
            .map_err(|e| GeneratorError::io(&temp_path, e))?;

        // NamedTempFile is created 0600; give the result normal file permissions
        let permissions = match fs::metadata(path) {
            Ok(existing) => Some(existing.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            temp_file
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| GeneratorError::io(&temp_path, e))?;
        }

        temp_file
            .persist(path)
            .map_err(|e| GeneratorError::Persist {
                path: path.to_path_buf(),
                source: e.error,
            })?;

        Ok(())
    }
}

/// The file a write to `path` must land in.
///
/// Symlinks are followed so the rename replaces the link's destination and
/// the link itself survives. A dangling link resolves to its (relative to the
/// link) destination, which is then created.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    let is_symlink = fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let destination = fs::read_link(path).map_err(|e| GeneratorError::io(path, e))?;
            Ok(parent_dir(path).join(destination))
        }
        Err(e) => Err(GeneratorError::io(path, e)),
    }
}

/// Directory a temp file for `path` must live in so the rename stays on one filesystem
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Compute SHA-256 hash of file contents
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| GeneratorError::io(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute SHA-256 hash of string
pub fn compute_string_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parent_dir_of_bare_file_name_is_cwd() {
        assert_eq!(parent_dir(Path::new("repeat.h")), Path::new("."));
        assert_eq!(parent_dir(Path::new("out/repeat.h")), Path::new("out"));
    }

    #[test]
    fn test_write_creates_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/repeat.h");

        SafeCodeWriter::new().write(&path, "text\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "text\n");
    }

    #[test]
    fn test_write_leaves_no_backup_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.h");
        fs::write(&path, "old").unwrap();

        SafeCodeWriter::new().write(&path, "new").unwrap();

        assert!(!dir.path().join("repeat.h.bak").exists());
    }

    #[test]
    fn test_backup_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.h");
        fs::write(&path, "old").unwrap();

        SafeCodeWriter::new()
            .with_backups(true)
            .write(&path, "new")
            .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("repeat.h.bak")).unwrap(),
            "old"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink_updates_destination() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real_repeat.h");
        let link = dir.path().join("repeat.h");
        fs::write(&real, "stale unrelated content").unwrap();
        symlink(&real, &link).unwrap();

        SafeCodeWriter::new().write(&link, "fresh").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "fresh");
        assert_eq!(fs::read_to_string(&link).unwrap(), "fresh");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_dangling_symlink_creates_destination() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let link = dir.path().join("repeat.h");
        symlink("generated_repeat.h", &link).unwrap();

        SafeCodeWriter::new().write(&link, "fresh").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(dir.path().join("generated_repeat.h")).unwrap(),
            "fresh"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_regular_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.h");
        SafeCodeWriter::new().write(&path, "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_compute_string_hash() {
        let hash1 = compute_string_hash("test content");
        let hash2 = compute_string_hash("test content");
        let hash3 = compute_string_hash("different content");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_file_hash_matches_string_hash() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeat.h");
        fs::write(&path, "abc").unwrap();
        assert_eq!(compute_file_hash(&path).unwrap(), compute_string_hash("abc"));
    }
}
