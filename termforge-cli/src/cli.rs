use clap::Parser;

/// Bootstraps a Termux or Linux terminal environment
#[derive(Parser, Debug)]
#[command(name = "termforge")]
#[command(author = "Laurens Kis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Installs packages and configures zsh, neovim and an Openbox desktop", long_about = None)]
pub struct Args {
    /// Install the base environment (packages, zsh, neovim)
    #[arg(long = "install")]
    pub install: bool,

    /// Also install the Openbox/polybar desktop (implies --install)
    #[arg(long = "desktop")]
    pub desktop: bool,

    /// Remove installed configs and restore .old backups
    #[arg(long = "uninstall")]
    pub uninstall: bool,

    /// Refresh the package index and upgrade the system
    #[arg(long = "update")]
    pub update: bool,

    /// Show distro and package status without changing anything
    #[arg(long = "status")]
    pub status: bool,

    /// Skip the optional development toolchain (nodejs, python, clang, make)
    #[arg(long = "no-dev-tools")]
    pub no_dev_tools: bool,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Whether any action flag was given at all
    pub fn has_action(&self) -> bool {
        self.install || self.desktop || self.uninstall || self.update || self.status
    }
}

/// Parses command-line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_flag_parses() {
        let args = Args::parse_from(["termforge", "--desktop", "-y"]);
        assert!(args.desktop);
        assert!(args.yes);
        assert!(args.has_action());
    }

    #[test]
    fn test_no_flags_means_no_action() {
        let args = Args::parse_from(["termforge"]);
        assert!(!args.has_action());
    }

    #[test]
    fn test_install_and_update_both_parse() {
        // Dispatch order is decided in main, not by clap
        let args = Args::parse_from(["termforge", "--install", "--update"]);
        assert!(args.install);
        assert!(args.update);
    }
}
