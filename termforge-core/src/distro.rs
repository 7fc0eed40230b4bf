//! Distro identification and package-manager command tables
//!
//! The supported targets and their managers:
//! - pkg (Termux)
//! - apt-get (Debian, Ubuntu)
//! - dnf (Fedora, CentOS, RHEL)
//! - pacman (Arch Linux)

use std::fs;

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// A recognized distribution, keyed off the `ID=` field of
/// `/etc/os-release` (or the Termux environment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distro {
    Ubuntu,
    Debian,
    Fedora,
    CentOs,
    Rhel,
    Arch,
    Termux,
    /// Anything else, carrying the raw identifier (possibly empty)
    Unknown(String),
}

impl Distro {
    /// Maps a raw os-release identifier to a distro
    pub fn from_id(id: &str) -> Self {
        match id {
            "ubuntu" => Distro::Ubuntu,
            "debian" => Distro::Debian,
            "fedora" => Distro::Fedora,
            "centos" => Distro::CentOs,
            "rhel" => Distro::Rhel,
            "arch" => Distro::Arch,
            other => Distro::Unknown(other.to_string()),
        }
    }

    /// The raw identifier string
    pub fn id(&self) -> &str {
        match self {
            Distro::Ubuntu => "ubuntu",
            Distro::Debian => "debian",
            Distro::Fedora => "fedora",
            Distro::CentOs => "centos",
            Distro::Rhel => "rhel",
            Distro::Arch => "arch",
            Distro::Termux => "termux",
            Distro::Unknown(id) => id,
        }
    }

    /// The package manager for this distro, None when unsupported
    pub fn package_manager(&self) -> Option<PackageManager> {
        match self {
            Distro::Termux => Some(PackageManager::Pkg),
            Distro::Ubuntu | Distro::Debian => Some(PackageManager::Apt),
            Distro::Fedora | Distro::CentOs | Distro::Rhel => Some(PackageManager::Dnf),
            Distro::Arch => Some(PackageManager::Pacman),
            Distro::Unknown(_) => None,
        }
    }

    /// Detects the running distribution.
    ///
    /// Termux does not ship an os-release file, so it is recognized from
    /// its environment first; everything else comes from the `ID=` line
    /// of /etc/os-release. An unreadable or unrecognized identifier maps
    /// to `Unknown` rather than failing.
    pub fn detect() -> Self {
        if is_termux_environment() {
            return Distro::Termux;
        }

        let id = fs::read_to_string(OS_RELEASE_PATH)
            .ok()
            .and_then(|content| parse_os_release_id(&content))
            .unwrap_or_default();

        let distro = Distro::from_id(&id);
        log::debug!("Detected distro: {:?}", distro);
        distro
    }
}

impl std::fmt::Display for Distro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distro::Unknown(id) if id.is_empty() => write!(f, "unknown"),
            other => write!(f, "{}", other.id()),
        }
    }
}

fn is_termux_environment() -> bool {
    if std::env::var_os("TERMUX_VERSION").is_some() {
        return true;
    }
    std::env::var("PREFIX")
        .map(|prefix| prefix.contains("com.termux"))
        .unwrap_or(false)
}

/// Pulls the distribution identifier out of os-release content.
///
/// Handles both `ID=ubuntu` and `ID="ubuntu"` forms; returns None when
/// no `ID=` line is present.
pub fn parse_os_release_id(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("ID=") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}

/// A package manager and its fixed argument templates.
///
/// Built once and immutable; the install argv is completed by appending
/// the package name, never by string interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pkg,
    Apt,
    Dnf,
    Pacman,
}

impl PackageManager {
    /// The executable to invoke
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Pkg => "pkg",
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
        }
    }

    /// Arguments to refresh the package index, None when the manager
    /// folds that into its upgrade verb
    pub fn refresh_args(&self) -> Option<&'static [&'static str]> {
        match self {
            PackageManager::Pkg => Some(&["update", "-y"]),
            PackageManager::Apt => Some(&["update"]),
            PackageManager::Dnf => None,
            PackageManager::Pacman => None,
        }
    }

    /// Arguments to upgrade all installed packages
    pub fn upgrade_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Pkg => &["upgrade", "-y"],
            PackageManager::Apt => &["upgrade", "-y"],
            PackageManager::Dnf => &["update", "-y"],
            PackageManager::Pacman => &["-Syu", "--noconfirm"],
        }
    }

    /// Arguments to install a package, before the package name
    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Pkg => &["install", "-y"],
            PackageManager::Apt => &["install", "-y"],
            PackageManager::Dnf => &["install", "-y"],
            PackageManager::Pacman => &["-S", "--noconfirm", "--needed"],
        }
    }

    /// Whether invocations must be escalated with sudo when the caller
    /// is not root. Termux has no root and no sudo.
    pub fn wants_sudo(&self) -> bool {
        !matches!(self, PackageManager::Pkg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release_id_unquoted() {
        let content = "NAME=\"Ubuntu\"\nID=ubuntu\nVERSION_ID=\"22.04\"\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("ubuntu"));
    }

    #[test]
    fn test_parse_os_release_id_quoted() {
        let content = "NAME=\"Arch Linux\"\nID=\"arch\"\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("arch"));
    }

    #[test]
    fn test_parse_os_release_id_ignores_id_like_keys() {
        let content = "VERSION_ID=\"38\"\nID_LIKE=\"fedora\"\nID=centos\n";
        assert_eq!(parse_os_release_id(content).as_deref(), Some("centos"));
    }

    #[test]
    fn test_parse_os_release_id_missing() {
        assert_eq!(parse_os_release_id("NAME=\"Something\"\n"), None);
        assert_eq!(parse_os_release_id(""), None);
    }

    #[test]
    fn test_from_id_round_trips_supported_ids() {
        for id in ["ubuntu", "debian", "fedora", "centos", "rhel", "arch"] {
            let distro = Distro::from_id(id);
            assert_eq!(distro.id(), id);
            assert!(distro.package_manager().is_some(), "{} unsupported", id);
        }
    }

    #[test]
    fn test_from_id_unknown_preserves_raw_identifier() {
        let distro = Distro::from_id("gentoo");
        assert_eq!(distro, Distro::Unknown("gentoo".to_string()));
        assert_eq!(distro.id(), "gentoo");
        assert!(distro.package_manager().is_none());
    }

    #[test]
    fn test_empty_identifier_is_unsupported() {
        let distro = Distro::from_id("");
        assert!(distro.package_manager().is_none());
        assert_eq!(distro.to_string(), "unknown");
    }

    #[test]
    fn test_manager_tables_are_consistent() {
        for manager in [
            PackageManager::Pkg,
            PackageManager::Apt,
            PackageManager::Dnf,
            PackageManager::Pacman,
        ] {
            assert!(!manager.program().is_empty());
            assert!(!manager.install_args().is_empty());
            assert!(!manager.upgrade_args().is_empty());
        }
    }

    #[test]
    fn test_only_pkg_skips_sudo() {
        assert!(!PackageManager::Pkg.wants_sudo());
        assert!(PackageManager::Apt.wants_sudo());
        assert!(PackageManager::Dnf.wants_sudo());
        assert!(PackageManager::Pacman.wants_sudo());
    }
}
