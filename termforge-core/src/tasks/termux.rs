//! Termux app configuration stage

use crate::assets;
use crate::files::FileManager;
use crate::manifest::SetupManifest;
use crate::printer::StepPrinter;
use crate::runner;
use anyhow::Result;
use log::warn;

const TERMUX_DIR: &str = ".termux";
const COLORS_FILE: &str = ".termux/colors.properties";
const PROPERTIES_FILE: &str = ".termux/termux.properties";

/// The on-screen key row enabled in termux.properties
const EXTRA_KEYS: &str = "extra-keys = [['ESC','/','-','HOME','UP','END','PGUP'],['TAB','CTRL','ALT','LEFT','DOWN','RIGHT','PGDN']]";

/// Writes the Termux terminal configuration and reloads it
pub fn configure(home: &FileManager, manifest: &mut SetupManifest) -> Result<()> {
    let mut printer = StepPrinter::new(3);
    printer.section("Configuring Termux");

    printer.step("Writing color scheme");
    home.create_directory(TERMUX_DIR)?;
    let colors_path = home.create_file(COLORS_FILE, assets::TERMUX_COLORS, true)?;
    manifest.record_installed(&colors_path);

    printer.step("Enabling extra keys row");
    let properties = match home.read_file(PROPERTIES_FILE) {
        Ok(existing) => enable_extra_keys(&existing),
        Err(_) => format!("{}\n", EXTRA_KEYS),
    };
    home.create_file(PROPERTIES_FILE, &properties, true)?;

    printer.step("Reloading Termux settings");
    match runner::run("termux-reload-settings", &[]) {
        Ok(output) if output.success => printer.ok("Settings reloaded"),
        Ok(output) => {
            printer.warn("termux-reload-settings failed");
            warn!("termux-reload-settings: {}", output.stderr_or_empty());
        }
        Err(e) => {
            printer.warn("termux-reload-settings unavailable");
            warn!("termux-reload-settings: {}", e);
        }
    }

    Ok(())
}

/// Uncomments an existing extra-keys line, or appends the bundled one.
///
/// Idempotent: content that already has an active extra-keys line comes
/// back unchanged.
fn enable_extra_keys(properties: &str) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(properties.lines().count() + 1);
    let mut enabled = false;

    for line in properties.lines() {
        let trimmed = line.trim_start();
        if !enabled && trimmed.starts_with('#') && trimmed[1..].trim_start().starts_with("extra-keys") {
            lines.push(trimmed[1..].trim_start().to_string());
            enabled = true;
        } else {
            if trimmed.starts_with("extra-keys") {
                enabled = true;
            }
            lines.push(line.to_string());
        }
    }

    if !enabled {
        lines.push(EXTRA_KEYS.to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_extra_keys_uncomments_existing_line() {
        let input = "# some header\n# extra-keys = [['ESC','UP']]\nbell-character = ignore\n";
        let output = enable_extra_keys(input);
        assert!(output.contains("\nextra-keys = [['ESC','UP']]\n"));
        assert!(output.contains("bell-character = ignore"));
    }

    #[test]
    fn test_enable_extra_keys_appends_when_absent() {
        let output = enable_extra_keys("bell-character = ignore\n");
        assert!(output.contains("extra-keys = "));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_enable_extra_keys_is_idempotent() {
        let once = enable_extra_keys("# extra-keys = [['ESC']]\n");
        let twice = enable_extra_keys(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_enable_extra_keys_leaves_unrelated_comments() {
        let input = "# a comment about keys\nextra-keys = [['ESC']]\n";
        let output = enable_extra_keys(input);
        assert!(output.contains("# a comment about keys"));
    }
}
