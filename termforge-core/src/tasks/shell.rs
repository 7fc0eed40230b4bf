//! Zsh and oh-my-zsh configuration stage

use crate::assets;
use crate::files::FileManager;
use crate::manifest::SetupManifest;
use crate::printer::StepPrinter;
use crate::runner;
use anyhow::{Context, Result};
use log::{info, warn};

const OMZ_DIR: &str = ".oh-my-zsh";
const ZSHRC: &str = ".zshrc";
const ZSHRC_TEMPLATE: &str = ".oh-my-zsh/templates/zshrc.zsh-template";
const ALIAS_MARKER: &str = "#------------------------------------------";

/// Installs oh-my-zsh and writes the zsh configuration.
///
/// Prior `.oh-my-zsh` and `.zshrc` are moved aside to `.old` and the
/// backups recorded so uninstall can put them back.
pub fn setup(home: &FileManager, manifest: &mut SetupManifest) -> Result<()> {
    let mut printer = StepPrinter::new(5);
    printer.section("Setting up zsh");

    printer.step("Backing up existing zsh configuration");
    for path in [OMZ_DIR, ZSHRC] {
        if let Some(backup) = home.backup_existing(path)? {
            manifest.record_backup(&home.base_dir().join(path), &backup);
        }
    }

    printer.step("Cloning oh-my-zsh");
    let omz_path = home.base_dir().join(OMZ_DIR);
    let omz_target = omz_path
        .to_str()
        .context("Home path is not valid UTF-8")?;
    runner::run_checked(
        "git",
        &["clone", "--depth", "1", assets::OMZ_REPO_URL, omz_target],
    )?;
    manifest.record_installed(&omz_path);

    printer.step("Writing .zshrc");
    let template = home.read_file(ZSHRC_TEMPLATE)?;
    let zshrc = select_theme(&template, assets::ZSH_THEME_NAME);
    let zshrc = append_aliases(&zshrc);
    let zshrc_path = home.create_file(ZSHRC, &zshrc, true)?;
    manifest.record_installed(&zshrc_path);

    printer.step("Installing prompt theme");
    let theme_rel = format!(
        "{}/custom/themes/{}.zsh-theme",
        OMZ_DIR,
        assets::ZSH_THEME_NAME
    );
    home.create_file(&theme_rel, assets::ZSH_THEME, true)?;

    printer.step("Zsh configuration written");
    printer.ok(&format!("{} configured with theme '{}'", ZSHRC, assets::ZSH_THEME_NAME));
    Ok(())
}

/// Makes zsh the login shell when it is not already
pub fn set_default_shell() -> Result<()> {
    let current = std::env::var("SHELL").unwrap_or_default();
    if current.contains("zsh") {
        info!("Zsh is already the default shell");
        return Ok(());
    }

    let zsh_path = which::which("zsh").context("zsh is not installed")?;
    let zsh = zsh_path
        .to_str()
        .context("zsh path is not valid UTF-8")?;

    info!("Setting default shell to {}", zsh);
    let output = runner::run("chsh", &["-s", zsh])?;
    if !output.success {
        // Termux has no chsh outside its own; tolerate and tell the user
        warn!(
            "chsh failed ({}); set the shell manually with: chsh -s {}",
            output.stderr_or_empty(),
            zsh
        );
    }
    Ok(())
}

/// Points the template's theme selection at the bundled theme
fn select_theme(zshrc: &str, theme: &str) -> String {
    zshrc.replace(
        "ZSH_THEME=\"robbyrussell\"",
        &format!("ZSH_THEME=\"{}\"", theme),
    )
}

/// Appends the alias block unless a previous run already did
fn append_aliases(zshrc: &str) -> String {
    if zshrc.contains(ALIAS_MARKER) {
        return zshrc.to_string();
    }
    let mut out = zshrc.trim_end().to_string();
    out.push('\n');
    out.push_str(assets::ZSHRC_ALIASES);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_theme_replaces_default() {
        let template = "export ZSH=$HOME/.oh-my-zsh\nZSH_THEME=\"robbyrussell\"\n";
        let result = select_theme(template, "forge");
        assert!(result.contains("ZSH_THEME=\"forge\""));
        assert!(!result.contains("robbyrussell"));
    }

    #[test]
    fn test_select_theme_leaves_other_lines_alone() {
        let template = "plugins=(git)\nZSH_THEME=\"robbyrussell\"\n";
        let result = select_theme(template, "forge");
        assert!(result.contains("plugins=(git)"));
    }

    #[test]
    fn test_append_aliases_adds_block_once() {
        let once = append_aliases("ZSH_THEME=\"forge\"\n");
        assert!(once.contains("alias ll="));

        let twice = append_aliases(&once);
        assert_eq!(once, twice);
    }
}
