//! Uninstall stage: remove what the installer wrote, restore backups

use crate::files::FileManager;
use crate::manifest::SetupManifest;
use crate::printer::StepPrinter;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Paths the installer may have written, used when no manifest exists
/// (install from an older version, or a deleted state dir)
const LEGACY_PATHS: &[&str] = &[
    ".config/polybar",
    ".config/openbox",
    ".config/wallpapers",
    ".Xresources",
    ".oh-my-zsh",
    ".termux/colors.properties",
    ".zshrc",
];

/// Removes installed files and restores `.old` backups.
///
/// With a manifest present, removal is driven by its records; without
/// one, the legacy fixed path list is swept instead.
pub fn run(home: &FileManager, manifest: &mut SetupManifest) -> Result<()> {
    let mut printer = StepPrinter::new(3);
    printer.section("Uninstalling");

    if manifest.is_empty() {
        printer.step("No manifest found; removing known paths");
        for path in LEGACY_PATHS {
            remove_path(&home.base_dir().join(path))?;
            home.restore_backup(path)?;
        }
    } else {
        printer.step("Removing installed files");
        for path in manifest.installed_paths() {
            remove_path(path)?;
        }

        printer.step("Restoring backups");
        for record in manifest.backups().to_vec() {
            if !record.backup.exists() {
                info!("Backup {} is gone, skipping", record.backup.display());
                continue;
            }
            remove_path(&record.original)?;
            fs::rename(&record.backup, &record.original).with_context(|| {
                format!(
                    "Failed to restore {} from {}",
                    record.original.display(),
                    record.backup.display()
                )
            })?;
            info!("Restored {}", record.original.display());
        }

        manifest.clear();
        manifest.save()?;
    }

    printer.step("Uninstall complete");
    Ok(())
}

fn remove_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    } else {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    info!("Removed {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_driven_uninstall_restores_backups() {
        let dir = TempDir::new().unwrap();
        let home = FileManager::new(dir.path());
        let mut manifest = SetupManifest::new(dir.path().join("manifest.json"));

        // Simulate an install that replaced a user zshrc
        home.create_file(".zshrc", "users own config", true).unwrap();
        let backup = home.backup_existing(".zshrc").unwrap().unwrap();
        manifest.record_backup(&dir.path().join(".zshrc"), &backup);
        let installed = home.create_file(".zshrc", "installed config", true).unwrap();
        manifest.record_installed(&installed);

        run(&home, &mut manifest).unwrap();

        assert_eq!(
            home.read_file(".zshrc").unwrap(),
            "users own config"
        );
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_manifest_driven_uninstall_removes_installed_dirs() {
        let dir = TempDir::new().unwrap();
        let home = FileManager::new(dir.path());
        let mut manifest = SetupManifest::new(dir.path().join("manifest.json"));

        let polybar = home.create_directory(".config/polybar").unwrap();
        home.create_file(".config/polybar/config.ini", "bar", true)
            .unwrap();
        manifest.record_installed(&polybar);

        run(&home, &mut manifest).unwrap();
        assert!(!polybar.exists());
    }

    #[test]
    fn test_legacy_uninstall_sweeps_fixed_paths() {
        let dir = TempDir::new().unwrap();
        let home = FileManager::new(dir.path());
        let mut manifest = SetupManifest::new(dir.path().join("manifest.json"));

        home.create_file(".zshrc", "installed", true).unwrap();
        home.create_file(".zshrc.old", "previous", true).unwrap();
        home.create_file(".config/openbox/rc.xml", "<xml/>", true)
            .unwrap();

        run(&home, &mut manifest).unwrap();

        assert_eq!(home.read_file(".zshrc").unwrap(), "previous");
        assert!(!dir.path().join(".config/openbox").exists());
    }

    #[test]
    fn test_uninstall_on_clean_home_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let home = FileManager::new(dir.path());
        let mut manifest = SetupManifest::new(dir.path().join("manifest.json"));
        run(&home, &mut manifest).unwrap();
    }
}
