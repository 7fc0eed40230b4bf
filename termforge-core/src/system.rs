use crate::distro::{Distro, PackageManager};
use crate::runner::{self, CommandOutput};
use anyhow::Result;
use log::info;

/// Distro-aware dispatch from abstract intents (update the system,
/// install a package) to concrete package-manager invocations.
///
/// The distro is an explicit constructor argument rather than ambient
/// state; `SystemManager::detect()` is a convenience for the common
/// case. Every dispatching operation refuses to run on an unsupported
/// distro instead of executing an empty command.
pub struct SystemManager {
    distro: Distro,
}

impl SystemManager {
    pub fn new(distro: Distro) -> Self {
        Self { distro }
    }

    /// Manager for the distribution the process is running on
    pub fn detect() -> Self {
        Self::new(Distro::detect())
    }

    pub fn distro(&self) -> &Distro {
        &self.distro
    }

    fn manager(&self) -> Result<PackageManager> {
        self.distro.package_manager().ok_or_else(|| {
            anyhow::anyhow!("Unsupported Linux distribution: {}", self.distro)
        })
    }

    fn build_argv(
        &self,
        manager: PackageManager,
        args: &[&str],
        package: Option<&str>,
        use_sudo: bool,
    ) -> Vec<String> {
        let mut argv = Vec::with_capacity(args.len() + 3);
        if use_sudo && manager.wants_sudo() {
            argv.push("sudo".to_string());
        }
        argv.push(manager.program().to_string());
        argv.extend(args.iter().map(|a| a.to_string()));
        if let Some(package) = package {
            argv.push(package.to_string());
        }
        argv
    }

    /// The argv that `install_package` would execute, without running it
    pub fn install_command(&self, package: &str) -> Result<Vec<String>> {
        let manager = self.manager()?;
        Ok(self.build_argv(manager, manager.install_args(), Some(package), needs_sudo()))
    }

    /// The argv sequence that `update_system` would execute
    pub fn update_command(&self) -> Result<Vec<Vec<String>>> {
        let manager = self.manager()?;
        let sudo = needs_sudo();

        let mut commands = Vec::new();
        if let Some(refresh) = manager.refresh_args() {
            commands.push(self.build_argv(manager, refresh, None, sudo));
        }
        commands.push(self.build_argv(manager, manager.upgrade_args(), None, sudo));
        Ok(commands)
    }

    /// Refreshes the package index and upgrades installed packages.
    ///
    /// Runs the manager's refresh and upgrade verbs in order and returns
    /// the output of the last command; a failed refresh short-circuits.
    pub fn update_system(&self) -> Result<CommandOutput> {
        let manager = self.manager()?;
        let sudo = needs_sudo();

        if let Some(refresh) = manager.refresh_args() {
            let argv = self.build_argv(manager, refresh, None, sudo);
            info!("Refreshing package index: {}", argv.join(" "));
            let output = run_argv(&argv)?;
            if !output.success {
                return Ok(output);
            }
        }

        let argv = self.build_argv(manager, manager.upgrade_args(), None, sudo);
        info!("Upgrading system: {}", argv.join(" "));
        run_argv(&argv)
    }

    /// Installs a single package through the distro's package manager.
    ///
    /// Re-installing something already present is left to the manager's
    /// own idempotence; nothing is retried or rolled back here.
    pub fn install_package(&self, package_name: &str) -> Result<CommandOutput> {
        if package_name.is_empty() {
            anyhow::bail!("Package name is empty");
        }

        let argv = self.install_command(package_name)?;
        info!("Installing package: {}", argv.join(" "));
        run_argv(&argv)
    }

    // Host probes carried over from the original tool. Each is a single
    // pass-through; the caller interprets the text.

    pub fn check_disk_usage(&self) -> Result<CommandOutput> {
        runner::run("df", &["-h"])
    }

    pub fn check_memory_usage(&self) -> Result<CommandOutput> {
        runner::run("free", &["-h"])
    }

    pub fn get_system_info(&self) -> Result<String> {
        Ok(runner::run("uname", &["-a"])?.stdout)
    }

    pub fn get_uptime(&self) -> Result<String> {
        Ok(runner::run("uptime", &["-p"])?.stdout)
    }

    pub fn get_logged_in_users(&self) -> Result<String> {
        Ok(runner::run("who", &[])?.stdout)
    }

    pub fn get_ip_address(&self) -> Result<String> {
        Ok(runner::run("curl", &["-s", "ifconfig.me"])?.stdout)
    }

    pub fn reboot_system(&self) -> Result<CommandOutput> {
        if needs_sudo() && self.distro != Distro::Termux {
            runner::run("sudo", &["reboot"])
        } else {
            runner::run("reboot", &[])
        }
    }

    /// Adds an entry to the current user's crontab.
    ///
    /// The existing table is read with `crontab -l`, the entry appended
    /// unless already present, and the merged table fed back through
    /// `crontab -`.
    pub fn add_cron_job(&self, schedule: &str, command: &str) -> Result<()> {
        let entry = cron_entry(schedule, command);

        // Exit status 1 with no table just means an empty crontab
        let existing = runner::run("crontab", &["-l"])
            .map(|o| if o.success { o.stdout } else { String::new() })
            .unwrap_or_default();

        match merged_crontab(&existing, &entry) {
            Some(merged) => {
                let output = runner::run_with_stdin("crontab", &["-"], &merged)?;
                if !output.success {
                    anyhow::bail!("Failed to install crontab: {}", output.stderr_or_empty());
                }
                info!("Added cron job: {}", entry);
                Ok(())
            }
            None => {
                info!("Cron job already present, skipping: {}", entry);
                Ok(())
            }
        }
    }
}

fn run_argv(argv: &[String]) -> Result<CommandOutput> {
    let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
    runner::run(&argv[0], &args)
}

/// Whether package-manager invocations must be escalated for this
/// process. Root never needs sudo.
#[cfg(unix)]
fn needs_sudo() -> bool {
    (unsafe { libc::geteuid() }) != 0
}

#[cfg(not(unix))]
fn needs_sudo() -> bool {
    false
}

fn cron_entry(schedule: &str, command: &str) -> String {
    format!("{} {}", schedule.trim(), command.trim())
}

/// Appends an entry to a crontab, returning None when it is already
/// listed
fn merged_crontab(existing: &str, entry: &str) -> Option<String> {
    if existing.lines().any(|line| line.trim() == entry) {
        return None;
    }

    let mut merged = existing.trim_end().to_string();
    if !merged.is_empty() {
        merged.push('\n');
    }
    merged.push_str(entry);
    merged.push('\n');
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_contains_verb_and_package() {
        let cases = [
            (Distro::Ubuntu, "apt-get", "install"),
            (Distro::Debian, "apt-get", "install"),
            (Distro::Fedora, "dnf", "install"),
            (Distro::CentOs, "dnf", "install"),
            (Distro::Rhel, "dnf", "install"),
            (Distro::Arch, "pacman", "-S"),
            (Distro::Termux, "pkg", "install"),
        ];

        for (distro, program, verb) in cases {
            let manager = SystemManager::new(distro.clone());
            let argv = manager.install_command("htop").unwrap();
            assert!(
                argv.contains(&program.to_string()),
                "{:?}: missing {}",
                distro,
                program
            );
            assert!(argv.contains(&verb.to_string()), "{:?}: missing {}", distro, verb);
            assert_eq!(argv.last().map(String::as_str), Some("htop"));
        }
    }

    #[test]
    fn test_unknown_distro_is_rejected() {
        let manager = SystemManager::new(Distro::Unknown("gentoo".to_string()));

        let err = manager.install_command("htop").unwrap_err().to_string();
        assert!(err.contains("Unsupported Linux distribution"));

        let err = manager.install_package("htop").unwrap_err().to_string();
        assert!(err.contains("Unsupported Linux distribution"));

        let err = manager.update_system().unwrap_err().to_string();
        assert!(err.contains("Unsupported Linux distribution"));
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        let manager = SystemManager::new(Distro::Unknown(String::new()));
        let err = manager.update_command().unwrap_err().to_string();
        assert!(err.contains("Unsupported Linux distribution"));
    }

    #[test]
    fn test_empty_package_name_is_rejected() {
        let manager = SystemManager::new(Distro::Ubuntu);
        assert!(manager.install_package("").is_err());
    }

    #[test]
    fn test_update_command_refreshes_index_where_separate() {
        let manager = SystemManager::new(Distro::Ubuntu);
        let commands = manager.update_command().unwrap();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].contains(&"update".to_string()));
        assert!(commands[1].contains(&"upgrade".to_string()));

        let manager = SystemManager::new(Distro::Arch);
        let commands = manager.update_command().unwrap();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].contains(&"-Syu".to_string()));
    }

    #[test]
    fn test_termux_commands_never_use_sudo() {
        let manager = SystemManager::new(Distro::Termux);
        let argv = manager.install_command("wget").unwrap();
        assert_eq!(argv.first().map(String::as_str), Some("pkg"));
        for commands in manager.update_command().unwrap() {
            assert_ne!(commands.first().map(String::as_str), Some("sudo"));
        }
    }

    #[test]
    fn test_package_name_is_a_single_argv_element() {
        // An injection attempt stays one argument instead of becoming
        // part of a shell string
        let manager = SystemManager::new(Distro::Ubuntu);
        let argv = manager.install_command("htop; rm -rf /").unwrap();
        assert_eq!(argv.last().map(String::as_str), Some("htop; rm -rf /"));
    }

    #[test]
    fn test_merged_crontab_appends_entry() {
        let merged = merged_crontab("0 0 * * * /bin/true\n", "30 2 * * * backup").unwrap();
        assert!(merged.ends_with("30 2 * * * backup\n"));
        assert!(merged.contains("/bin/true"));
    }

    #[test]
    fn test_merged_crontab_on_empty_table() {
        let merged = merged_crontab("", "30 2 * * * backup").unwrap();
        assert_eq!(merged, "30 2 * * * backup\n");
    }

    #[test]
    fn test_merged_crontab_skips_duplicates() {
        let existing = "30 2 * * * backup\n";
        assert!(merged_crontab(existing, "30 2 * * * backup").is_none());
    }

    #[test]
    fn test_cron_entry_trims_parts() {
        assert_eq!(cron_entry(" 0 0 * * * ", " cmd "), "0 0 * * * cmd");
    }
}
