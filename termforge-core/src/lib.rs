use anyhow::Result;

pub mod assets;
pub mod catalog;
pub mod distro;
pub mod download;
pub mod files;
pub mod manifest;
pub mod printer;
pub mod runner;
pub mod script;
pub mod system;
pub mod tasks;

// Re-export the types most callers need
pub use catalog::Package;
pub use distro::{Distro, PackageManager};
pub use download::Downloader;
pub use files::FileManager;
pub use manifest::SetupManifest;
pub use printer::StepPrinter;
pub use runner::CommandOutput;
pub use script::BashScriptManager;
pub use system::SystemManager;

/// Configuration options for the setup engine
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// Install the optional development toolchain alongside essentials
    pub with_dev_tools: bool,
    /// Install the Openbox/polybar desktop environment
    pub with_desktop: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            with_dev_tools: true,
            with_desktop: false,
        }
    }
}

/// Orchestrates the setup stages against a detected (or injected)
/// distribution
pub struct SetupEngine {
    config: SetupConfig,
    system: SystemManager,
}

impl SetupEngine {
    /// Engine for the distribution the process is running on
    pub fn new(config: SetupConfig) -> Self {
        Self {
            config,
            system: SystemManager::detect(),
        }
    }

    /// Engine with an explicit system manager; used to target a known
    /// distro and by tests
    pub fn with_system(config: SetupConfig, system: SystemManager) -> Self {
        Self { config, system }
    }

    pub fn system(&self) -> &SystemManager {
        &self.system
    }

    /// Runs the full install: packages, zsh, neovim, and optionally the
    /// desktop. A failed required package aborts with an error the CLI
    /// turns into exit code 1.
    pub fn install(&self) -> Result<()> {
        let home = FileManager::home()?;
        let mut manifest = SetupManifest::load(SetupManifest::default_path()?)?;
        let on_termux = *self.system.distro() == Distro::Termux;

        tasks::base::refresh_and_upgrade(&self.system)?;

        let mut packages: Vec<Package> = catalog::ESSENTIALS.to_vec();
        if self.config.with_dev_tools {
            packages.extend_from_slice(catalog::DEV_TOOLS);
        }
        let summary = tasks::base::install_packages(&self.system, &packages)?;
        log::info!(
            "Packages: {} installed, {} already present, {} optional failures",
            summary.installed,
            summary.already_present,
            summary.failed_optional.len()
        );

        tasks::shell::setup(&home, &mut manifest)?;
        manifest.save()?;
        tasks::shell::set_default_shell()?;

        tasks::editor::setup(&home)?;

        if on_termux {
            tasks::termux::configure(&home, &mut manifest)?;
            manifest.save()?;
        }

        if self.config.with_desktop {
            tasks::base::enable_x11_repo(&self.system)?;

            // termux-* helpers only exist inside the Termux repos
            let names: Vec<&str> = catalog::DESKTOP
                .iter()
                .copied()
                .filter(|name| on_termux || !name.starts_with("termux-"))
                .collect();
            tasks::base::install_package_names(&self.system, &names)?;
            tasks::desktop::setup(&home, &mut manifest)?;
            manifest.save()?;
        }

        manifest.save()?;
        Ok(())
    }

    /// Removes installed configs and restores `.old` backups
    pub fn uninstall(&self) -> Result<()> {
        let home = FileManager::home()?;
        let mut manifest = SetupManifest::load(SetupManifest::default_path()?)?;
        tasks::uninstall::run(&home, &mut manifest)
    }

    /// Refreshes the package index and upgrades the system
    pub fn update(&self) -> Result<CommandOutput> {
        self.system.update_system()
    }

    /// Prints the distro, host summary and package status
    pub fn status(&self) -> Result<()> {
        println!("Distro: {}", self.system.distro());

        if let Ok(info) = self.system.get_system_info() {
            println!("Kernel: {}", info);
        }
        if let Ok(uptime) = self.system.get_uptime() {
            println!("Uptime: {}", uptime);
        }

        catalog::print_package_status();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_skips_desktop() {
        let config = SetupConfig::default();
        assert!(config.with_dev_tools);
        assert!(!config.with_desktop);
    }

    #[test]
    fn test_engine_exposes_injected_system() {
        let engine = SetupEngine::with_system(
            SetupConfig::default(),
            SystemManager::new(Distro::Arch),
        );
        assert_eq!(*engine.system().distro(), Distro::Arch);
    }
}
