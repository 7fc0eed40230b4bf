//! Neovim configuration stage

use crate::assets;
use crate::download::Downloader;
use crate::files::FileManager;
use crate::printer::StepPrinter;
use crate::runner;
use anyhow::Result;
use log::warn;

const NVIM_CONFIG_DIR: &str = ".config/nvim";
const AUTOLOAD_DIR: &str = ".local/share/nvim/site/autoload";

/// Writes the Neovim config, fetches vim-plug and installs plugins.
///
/// The headless plugin install needs network and a working nvim; its
/// failure leaves a usable config behind, so it is tolerated.
pub fn setup(home: &FileManager) -> Result<()> {
    let mut printer = StepPrinter::new(4);
    printer.section("Setting up Neovim");

    printer.step("Creating config directories");
    home.create_directory(NVIM_CONFIG_DIR)?;
    let autoload = home.create_directory(AUTOLOAD_DIR)?;

    printer.step("Fetching vim-plug");
    if autoload.join("plug.vim").exists() {
        printer.ok("vim-plug already installed");
    } else {
        Downloader::new(&autoload).download_file(assets::VIM_PLUG_URL, Some("plug.vim"))?;
        printer.ok("vim-plug downloaded");
    }

    printer.step("Writing init.vim");
    home.create_file(&format!("{}/init.vim", NVIM_CONFIG_DIR), assets::INIT_VIM, true)?;

    printer.step("Installing plugins");
    match runner::run("nvim", &["--headless", "+PlugInstall", "+qall"]) {
        Ok(output) if output.success => printer.ok("Plugins installed"),
        Ok(output) => {
            printer.warn("Plugin install failed; run :PlugInstall inside nvim");
            warn!("PlugInstall failed: {}", output.stderr_or_empty());
        }
        Err(e) => {
            printer.warn("Could not run nvim; run :PlugInstall inside nvim");
            warn!("nvim invocation failed: {}", e);
        }
    }

    Ok(())
}
