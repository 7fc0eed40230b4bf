//! Openbox/polybar desktop configuration stage

use crate::assets;
use crate::files::FileManager;
use crate::manifest::SetupManifest;
use crate::printer::StepPrinter;
use crate::runner;
use anyhow::{Context, Result};
use log::warn;

const POLYBAR_DIR: &str = ".config/polybar";
const OPENBOX_DIR: &str = ".config/openbox";
const WALLPAPER_DIR: &str = ".config/wallpapers";
const XRESOURCES: &str = ".Xresources";

/// Bundled wallpaper shipped with the binary
const WALLPAPER: &[u8] = include_bytes!("../../assets/wallpaper.png");

/// Installs the panel and window-manager configs.
///
/// Every target that already exists is moved aside to `.old` first and
/// the backup recorded in the manifest.
pub fn setup(home: &FileManager, manifest: &mut SetupManifest) -> Result<()> {
    let mut printer = StepPrinter::new(5);
    printer.section("Setting up the desktop");

    printer.step("Backing up existing desktop configs");
    for path in [POLYBAR_DIR, OPENBOX_DIR, WALLPAPER_DIR, XRESOURCES] {
        if let Some(backup) = home.backup_existing(path)? {
            manifest.record_backup(&home.base_dir().join(path), &backup);
        }
    }

    printer.step("Installing polybar config");
    let polybar_dir = home.create_directory(POLYBAR_DIR)?;
    home.create_file(
        &format!("{}/config.ini", POLYBAR_DIR),
        assets::POLYBAR_CONFIG,
        true,
    )?;
    let launch = crate::script::BashScriptManager::new(&polybar_dir);
    launch.create_script("launch.sh", assets::POLYBAR_LAUNCH)?;
    manifest.record_installed(&polybar_dir);

    printer.step("Installing openbox config");
    let openbox_dir = home.create_directory(OPENBOX_DIR)?;
    home.create_file(&format!("{}/rc.xml", OPENBOX_DIR), assets::OPENBOX_RC, true)?;
    let autostart = crate::script::BashScriptManager::new(&openbox_dir);
    autostart.create_script("autostart", assets::OPENBOX_AUTOSTART)?;
    manifest.record_installed(&openbox_dir);

    printer.step("Installing wallpaper");
    let wallpaper_dir = home.create_directory(WALLPAPER_DIR)?;
    std::fs::write(wallpaper_dir.join("default.png"), WALLPAPER)
        .with_context(|| format!("Failed to write {}/default.png", wallpaper_dir.display()))?;
    manifest.record_installed(&wallpaper_dir);

    printer.step("Patching X resources");
    let xresources_path = home.create_file(XRESOURCES, assets::XRESOURCES, true)?;
    manifest.record_installed(&xresources_path);

    // No X server during install is normal; xrdb picks the file up on
    // the next session start
    let xresources = xresources_path
        .to_str()
        .context("Xresources path is not valid UTF-8")?;
    match runner::run("xrdb", &[xresources]) {
        Ok(output) if output.success => printer.ok("X resources loaded"),
        Ok(output) => {
            printer.warn("xrdb failed; resources load on next session");
            warn!("xrdb: {}", output.stderr_or_empty());
        }
        Err(e) => {
            printer.warn("xrdb unavailable; resources load on next session");
            warn!("xrdb: {}", e);
        }
    }

    Ok(())
}
