//! Package installation stage

use crate::catalog::Package;
use crate::distro::Distro;
use crate::printer::StepPrinter;
use crate::runner;
use crate::system::SystemManager;
use anyhow::Result;
use log::{info, warn};

/// Outcome of a package-list installation
#[derive(Debug, Default)]
pub struct InstallSummary {
    pub installed: usize,
    pub already_present: usize,
    pub failed_optional: Vec<String>,
}

/// Refreshes the package index and upgrades the base system
pub fn refresh_and_upgrade(system: &SystemManager) -> Result<()> {
    let printer = StepPrinter::new(0);
    printer.section("Updating base system");

    let output = system.update_system()?;
    if !output.success {
        anyhow::bail!("System update failed: {}", output.stderr_or_empty());
    }

    printer.ok("Package index refreshed and system upgraded");
    Ok(())
}

/// Enables the Termux X11 repository; a no-op on other distros
pub fn enable_x11_repo(system: &SystemManager) -> Result<()> {
    if *system.distro() != Distro::Termux {
        return Ok(());
    }

    info!("Enabling Termux x11-repo");
    let output = system.install_package("x11-repo")?;
    if !output.success {
        anyhow::bail!("Failed to enable x11-repo: {}", output.stderr_or_empty());
    }
    Ok(())
}

/// Installs a catalog of packages, verifying each one.
///
/// Required packages that fail abort the run immediately: later stages
/// write configs that assume they exist. Optional failures are recorded
/// and reported.
pub fn install_packages(system: &SystemManager, packages: &[Package]) -> Result<InstallSummary> {
    let mut printer = StepPrinter::new(packages.len());
    printer.section("Installing packages");

    let mut summary = InstallSummary::default();

    for pkg in packages {
        printer.step(&format!("Installing {}", pkg.name));

        if pkg.is_installed() {
            printer.ok(&format!("{} already installed", pkg.name));
            summary.already_present += 1;
            continue;
        }

        let output = system.install_package(pkg.name)?;
        let ok = output.success && verify_installed(system, pkg.name, pkg.command);

        if ok {
            printer.ok(&format!("{} installed", pkg.name));
            summary.installed += 1;
        } else if pkg.required {
            anyhow::bail!(
                "Failed to install required package {}: {}",
                pkg.name,
                output.stderr_or_empty()
            );
        } else {
            printer.warn(&format!("{} failed to install (optional)", pkg.name));
            warn!("Optional package {} failed: {}", pkg.name, output.stderr_or_empty());
            summary.failed_optional.push(pkg.name.to_string());
        }
    }

    Ok(summary)
}

/// Installs a list of package names, all of them mandatory
pub fn install_package_names(system: &SystemManager, names: &[&str]) -> Result<()> {
    let mut printer = StepPrinter::new(names.len());
    printer.section("Installing desktop packages");

    for name in names {
        printer.step(&format!("Installing {}", name));

        let output = system.install_package(name)?;
        let ok = output.success && verify_installed(system, name, None);
        if !ok {
            anyhow::bail!(
                "Failed to install {}: {}",
                name,
                output.stderr_or_empty()
            );
        }
        printer.ok(&format!("{} installed", name));
    }

    Ok(())
}

/// Confirms a package actually landed.
///
/// On Termux, `pkg list-installed <name>` gives a definitive answer.
/// Elsewhere there is no output format stable enough to parse, so a
/// shipped binary is probed when one is known and the manager's exit
/// status is trusted otherwise.
fn verify_installed(system: &SystemManager, name: &str, command: Option<&str>) -> bool {
    if *system.distro() == Distro::Termux {
        return runner::run("pkg", &["list-installed", name])
            .map(|o| o.success && listing_contains(&o.stdout, name))
            .unwrap_or(false);
    }

    match command {
        Some(command) => {
            which::which(command).is_ok() || runner::is_command_available(command)
        }
        None => true,
    }
}

/// Whether a `pkg list-installed` listing names the package.
///
/// Lines look like `git/stable 2.43.0 aarch64 [installed]`; the name is
/// everything before the first slash.
fn listing_contains(stdout: &str, name: &str) -> bool {
    stdout.lines().any(|line| {
        line.split('/')
            .next()
            .map(|pkg| pkg.trim() == name)
            .unwrap_or(false)
    })
}
