use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A dotfile or config dir moved aside during install
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Path the file lived at before the setup touched it
    pub original: PathBuf,
    /// Where the `.old` copy went
    pub backup: PathBuf,
    /// Unix timestamp of the backup
    pub timestamp: i64,
}

/// A path the installer created or replaced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallRecord {
    pub path: PathBuf,
    pub timestamp: i64,
}

/// Receipt of what an install run did to the machine.
///
/// Persisted as JSON so a later `--uninstall` can remove exactly what
/// was installed and put the `.old` backups back, instead of guessing
/// from a hardcoded path list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupManifest {
    backups: Vec<BackupRecord>,
    installed: Vec<InstallRecord>,
    #[serde(skip)]
    manifest_path: PathBuf,
}

impl SetupManifest {
    pub fn new(manifest_path: PathBuf) -> Self {
        Self {
            manifest_path,
            ..Default::default()
        }
    }

    /// Default location under the user's state directory
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home)
            .join(".local/state/termforge")
            .join("manifest.json"))
    }

    /// Load the manifest from disk, or start a fresh one if absent
    pub fn load(manifest_path: PathBuf) -> Result<Self> {
        if manifest_path.exists() {
            let data = fs::read_to_string(&manifest_path)
                .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
            let mut manifest: SetupManifest = serde_json::from_str(&data)
                .with_context(|| format!("Corrupt manifest at {}", manifest_path.display()))?;
            manifest.manifest_path = manifest_path;
            Ok(manifest)
        } else {
            Ok(Self::new(manifest_path))
        }
    }

    /// Save the manifest to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.manifest_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(&self.manifest_path, data)
            .with_context(|| format!("Failed to write {}", self.manifest_path.display()))?;
        Ok(())
    }

    pub fn record_backup(&mut self, original: &Path, backup: &Path) {
        self.backups.push(BackupRecord {
            original: original.to_path_buf(),
            backup: backup.to_path_buf(),
            timestamp: chrono::Utc::now().timestamp(),
        });
    }

    pub fn record_installed(&mut self, path: &Path) {
        if self.installed.iter().any(|r| r.path == path) {
            return;
        }
        self.installed.push(InstallRecord {
            path: path.to_path_buf(),
            timestamp: chrono::Utc::now().timestamp(),
        });
    }

    pub fn backups(&self) -> &[BackupRecord] {
        &self.backups
    }

    /// Installed paths, newest first, for removal in reverse order
    pub fn installed_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&InstallRecord> = self.installed.iter().collect();
        paths.sort_by_key(|r| std::cmp::Reverse(r.timestamp));
        paths.into_iter().map(|r| r.path.as_path()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backups.is_empty() && self.installed.is_empty()
    }

    /// Drops all records; called once an uninstall has consumed them
    pub fn clear(&mut self) {
        self.backups.clear();
        self.installed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/manifest.json");

        let mut manifest = SetupManifest::new(path.clone());
        manifest.record_backup(Path::new("/home/u/.zshrc"), Path::new("/home/u/.zshrc.old"));
        manifest.record_installed(Path::new("/home/u/.config/polybar"));
        manifest.save().unwrap();

        let loaded = SetupManifest::load(path).unwrap();
        assert_eq!(loaded.backups().len(), 1);
        assert_eq!(loaded.backups()[0].original, Path::new("/home/u/.zshrc"));
        assert_eq!(
            loaded.installed_paths(),
            vec![Path::new("/home/u/.config/polybar")]
        );
    }

    #[test]
    fn test_load_missing_manifest_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let manifest = SetupManifest::load(dir.path().join("none.json")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_record_installed_dedupes() {
        let mut manifest = SetupManifest::new(PathBuf::from("/tmp/m.json"));
        manifest.record_installed(Path::new("/a"));
        manifest.record_installed(Path::new("/a"));
        assert_eq!(manifest.installed_paths().len(), 1);
    }

    #[test]
    fn test_clear_empties_records() {
        let mut manifest = SetupManifest::new(PathBuf::from("/tmp/m.json"));
        manifest.record_installed(Path::new("/a"));
        manifest.record_backup(Path::new("/b"), Path::new("/b.old"));
        assert!(!manifest.is_empty());
        manifest.clear();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_corrupt_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "not json").unwrap();
        assert!(SetupManifest::load(path).is_err());
    }
}
