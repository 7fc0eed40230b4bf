use crate::runner;

/// A package the setup installs, and how to tell whether it is present
#[derive(Debug, Clone, Copy)]
pub struct Package {
    /// Name passed to the package manager
    pub name: &'static str,
    /// Binary to probe for, None when the package ships no binary
    pub command: Option<&'static str>,
    /// Required packages abort the setup when they fail to install
    pub required: bool,
    pub description: &'static str,
}

impl Package {
    /// Checks whether the package's binary is already on PATH
    pub fn is_installed(&self) -> bool {
        match self.command {
            Some(command) => {
                which::which(command).is_ok() || runner::is_command_available(command)
            }
            None => false,
        }
    }
}

/// Baseline terminal environment
pub const ESSENTIALS: &[Package] = &[
    Package {
        name: "git",
        command: Some("git"),
        required: true,
        description: "Version control, also used to fetch oh-my-zsh",
    },
    Package {
        name: "zsh",
        command: Some("zsh"),
        required: true,
        description: "Login shell the setup configures",
    },
    Package {
        name: "neovim",
        command: Some("nvim"),
        required: true,
        description: "Editor, configured with vim-plug",
    },
    Package {
        name: "curl",
        command: Some("curl"),
        required: true,
        description: "Used by vim-plug and the IP probe",
    },
    Package {
        name: "wget",
        command: Some("wget"),
        required: true,
        description: "Downloader backing all file fetches",
    },
    Package {
        name: "fastfetch",
        command: Some("fastfetch"),
        required: false,
        description: "System summary on shell startup",
    },
    Package {
        name: "btop",
        command: Some("btop"),
        required: false,
        description: "Resource monitor",
    },
];

/// Optional development toolchain
pub const DEV_TOOLS: &[Package] = &[
    Package {
        name: "nodejs",
        command: Some("node"),
        required: false,
        description: "Runtime for coc.nvim completion",
    },
    Package {
        name: "python",
        command: Some("python"),
        required: false,
        description: "Scripting runtime",
    },
    Package {
        name: "clang",
        command: Some("clang"),
        required: false,
        description: "C/C++ compiler",
    },
    Package {
        name: "make",
        command: Some("make"),
        required: false,
        description: "Build tool for plugin native extensions",
    },
];

/// Everything the Openbox desktop needs. All of these are mandatory:
/// later steps write configs that assume they exist.
pub const DESKTOP: &[&str] = &[
    "bc", "bmon", "calc", "calcurse", "curl", "dbus", "desktop-file-utils",
    "elinks", "feh", "fontconfig-utils", "fsmon", "geany", "git", "gtk2",
    "gtk3", "htop", "imagemagick", "jq", "leafpad", "man", "mpc", "mpd",
    "mutt", "ncmpcpp", "ncurses-utils", "neofetch", "netsurf", "obconf",
    "openbox", "openssl-tool", "polybar", "ranger", "rofi",
    "startup-notification", "termux-api", "thunar", "tigervnc", "vim",
    "wget", "xarchiver", "xbitmaps", "xcompmgr", "xfce4-settings",
    "xfce4-terminal", "xmlstarlet", "xorg-font-util", "xorg-xrdb", "zsh",
];

/// Checks the install status of the essential and dev-tool packages
pub fn check_packages() -> Vec<(Package, bool)> {
    ESSENTIALS
        .iter()
        .chain(DEV_TOOLS.iter())
        .map(|pkg| (*pkg, pkg.is_installed()))
        .collect()
}

/// Prints package status in a formatted table
pub fn print_package_status() {
    println!("\n==================================================");
    println!("  Package Status");
    println!("==================================================\n");

    let statuses = check_packages();
    let mut all_required_installed = true;

    for (pkg, installed) in &statuses {
        let status = if *installed { "✓" } else { "✗" };
        let required_label = if pkg.required {
            "[REQUIRED]"
        } else {
            "[OPTIONAL]"
        };

        println!("{} {} {}", status, pkg.name, required_label);
        println!("   {}", pkg.description);

        if pkg.required && !installed {
            all_required_installed = false;
        }

        println!();
    }

    println!("==================================================\n");

    if !all_required_installed {
        println!("⚠ WARNING: Some required packages are missing!");
        println!("Run 'termforge --install' to install them.\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_are_well_formed() {
        for pkg in ESSENTIALS.iter().chain(DEV_TOOLS.iter()) {
            assert!(!pkg.name.is_empty());
            assert!(!pkg.description.is_empty());
        }
    }

    #[test]
    fn test_essentials_cover_the_setup_prerequisites() {
        for name in ["git", "zsh", "neovim", "curl", "wget"] {
            let pkg = ESSENTIALS.iter().find(|p| p.name == name);
            assert!(pkg.is_some(), "missing {}", name);
            assert!(pkg.unwrap().required, "{} must be required", name);
        }
    }

    #[test]
    fn test_dev_tools_are_optional() {
        assert!(DEV_TOOLS.iter().all(|p| !p.required));
    }

    #[test]
    fn test_desktop_list_has_no_duplicates() {
        let mut names: Vec<&str> = DESKTOP.to_vec();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_desktop_list_includes_the_panel_stack() {
        for name in ["openbox", "polybar", "rofi", "tigervnc"] {
            assert!(DESKTOP.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_check_packages_returns_full_catalog() {
        let statuses = check_packages();
        assert_eq!(statuses.len(), ESSENTIALS.len() + DEV_TOOLS.len());
        assert!(statuses.iter().any(|(p, _)| p.name == "git"));
    }
}
