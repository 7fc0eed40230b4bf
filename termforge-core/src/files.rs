use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File operations rooted at a base directory.
///
/// Paths handed to the manager are joined onto the base dir and `~` is
/// expanded, mirroring how the setup flows address everything relative
/// to `$HOME`. All operations go straight to the filesystem; nothing is
/// routed through a shell.
pub struct FileManager {
    base_dir: PathBuf,
}

impl FileManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Manager rooted at the user's home directory
    pub fn home() -> Result<Self> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(Self::new(home))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn full_path(&self, path: &str) -> PathBuf {
        let expanded = expand_home(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    /// Creates a directory (and parents), returning its full path
    pub fn create_directory(&self, dir_name: &str) -> Result<PathBuf> {
        let dir_path = self.full_path(dir_name);
        fs::create_dir_all(&dir_path)
            .with_context(|| format!("Failed to create directory {}", dir_path.display()))?;
        Ok(dir_path)
    }

    /// Removes a directory; `recursive` removes contents as well
    pub fn remove_directory(&self, dir_name: &str, recursive: bool) -> Result<PathBuf> {
        let dir_path = self.full_path(dir_name);

        let result = if recursive {
            fs::remove_dir_all(&dir_path)
        } else {
            fs::remove_dir(&dir_path)
        };
        result.with_context(|| format!("Failed to remove directory {}", dir_path.display()))?;

        Ok(dir_path)
    }

    /// Lists file names in a directory matching a `*`/`?` pattern
    pub fn list_files(&self, dir_name: &str, pattern: &str) -> Result<Vec<String>> {
        let dir_path = self.full_path(dir_name);
        let mut names = Vec::new();

        for entry in fs::read_dir(&dir_path)
            .with_context(|| format!("Failed to read directory {}", dir_path.display()))?
        {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if matches_pattern(name, pattern) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Finds files under the base dir matching a pattern, optionally
    /// walking subdirectories
    pub fn find_files(&self, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        if !recursive {
            return Ok(self
                .list_files(".", pattern)?
                .into_iter()
                .map(|name| self.base_dir.join(name))
                .collect());
        }

        let mut found = Vec::new();
        for entry in walkdir::WalkDir::new(&self.base_dir).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        if let Some(name) = entry.file_name().to_str() {
                            if matches_pattern(name, pattern) {
                                found.push(entry.path().to_path_buf());
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to access entry: {}", e);
                }
            }
        }

        Ok(found)
    }

    pub fn move_file(&self, src: &str, dest: &str) -> Result<PathBuf> {
        let src_path = self.full_path(src);
        let dest_path = self.full_path(dest);
        fs::rename(&src_path, &dest_path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                src_path.display(),
                dest_path.display()
            )
        })?;
        Ok(dest_path)
    }

    pub fn copy_file(&self, src: &str, dest: &str) -> Result<PathBuf> {
        let src_path = self.full_path(src);
        let dest_path = self.full_path(dest);
        fs::copy(&src_path, &dest_path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                src_path.display(),
                dest_path.display()
            )
        })?;
        Ok(dest_path)
    }

    pub fn delete_file(&self, filename: &str) -> Result<PathBuf> {
        let filepath = self.full_path(filename);
        fs::remove_file(&filepath)
            .with_context(|| format!("Failed to delete {}", filepath.display()))?;
        Ok(filepath)
    }

    /// Writes a file. With `overwrite` unset, an existing file is left
    /// untouched and an error is returned.
    pub fn create_file(&self, filename: &str, content: &str, overwrite: bool) -> Result<PathBuf> {
        let filepath = self.full_path(filename);

        if !overwrite && filepath.exists() {
            anyhow::bail!("File already exists: {}", filepath.display());
        }

        if let Some(parent) = filepath.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&filepath, content)
            .with_context(|| format!("Failed to write {}", filepath.display()))?;
        Ok(filepath)
    }

    /// Reads a file to a string; a missing path is reported as
    /// "File not found"
    pub fn read_file(&self, filename: &str) -> Result<String> {
        let filepath = self.full_path(filename);

        if !filepath.exists() {
            anyhow::bail!("File not found: {}", filepath.display());
        }

        fs::read_to_string(&filepath)
            .with_context(|| format!("Failed to read {}", filepath.display()))
    }

    /// Sets permissions from an octal string such as "755"
    #[cfg(unix)]
    pub fn change_permissions(&self, path: &str, mode: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.full_path(path);
        let mode = u32::from_str_radix(mode, 8)
            .with_context(|| format!("Invalid octal mode: {}", mode))?;
        fs::set_permissions(&full_path, fs::Permissions::from_mode(mode))
            .with_context(|| format!("Failed to set permissions on {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Moves an existing file or directory aside to `<name>.old`.
    ///
    /// Returns the backup path when something was backed up, None when
    /// the path did not exist. A stale backup from a previous run is
    /// replaced.
    pub fn backup_existing(&self, path: &str) -> Result<Option<PathBuf>> {
        let full_path = self.full_path(path);

        if !full_path.exists() {
            return Ok(None);
        }

        let backup_path = backup_path_for(&full_path);
        if backup_path.exists() {
            if backup_path.is_dir() {
                fs::remove_dir_all(&backup_path)
            } else {
                fs::remove_file(&backup_path)
            }
            .with_context(|| format!("Failed to clear stale backup {}", backup_path.display()))?;
        }

        fs::rename(&full_path, &backup_path).with_context(|| {
            format!(
                "Failed to back up {} to {}",
                full_path.display(),
                backup_path.display()
            )
        })?;

        info!("Backed up {} -> {}", full_path.display(), backup_path.display());
        Ok(Some(backup_path))
    }

    /// Restores a `.old` backup over the given path if one exists
    pub fn restore_backup(&self, path: &str) -> Result<Option<PathBuf>> {
        let full_path = self.full_path(path);
        let backup_path = backup_path_for(&full_path);

        if !backup_path.exists() {
            return Ok(None);
        }

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)
            } else {
                fs::remove_file(&full_path)
            }
            .with_context(|| format!("Failed to remove {}", full_path.display()))?;
        }

        fs::rename(&backup_path, &full_path).with_context(|| {
            format!(
                "Failed to restore {} from {}",
                full_path.display(),
                backup_path.display()
            )
        })?;

        info!("Restored {} from backup", full_path.display());
        Ok(Some(full_path))
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(".old");
    path.with_file_name(name)
}

/// Expands a leading `~` or `~/` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Shell-style wildcard match supporting `*` and `?`
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    fn matches(name: &[u8], pattern: &[u8]) -> bool {
        match (pattern.first(), name.first()) {
            (None, None) => true,
            (Some(b'*'), _) => {
                matches(name, &pattern[1..])
                    || (!name.is_empty() && matches(&name[1..], pattern))
            }
            (Some(b'?'), Some(_)) => matches(&name[1..], &pattern[1..]),
            (Some(p), Some(n)) if p == n => matches(&name[1..], &pattern[1..]),
            _ => false,
        }
    }
    matches(name.as_bytes(), pattern.as_bytes())
}
