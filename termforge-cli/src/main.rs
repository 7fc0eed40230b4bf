use anyhow::Result;
use termforge_core::{Distro, SetupConfig, SetupEngine};

mod cli;

fn main() -> Result<()> {
    let args = cli::parse_args();

    if !args.has_action() {
        eprintln!("No action requested.");
        eprintln!("Use --install, --desktop, --uninstall, --update or --status.");
        eprintln!("See --help for details.");
        std::process::exit(1);
    }

    // Initialize logger with appropriate level based on verbose flag
    if std::env::var("RUST_LOG").is_err() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let config = SetupConfig {
        with_dev_tools: !args.no_dev_tools,
        with_desktop: args.desktop,
    };
    let engine = SetupEngine::new(config);

    // Writing dotfiles into root's home is never what the user meant;
    // termforge invokes sudo itself where escalation is needed. Termux
    // runs single-user, so the check does not apply there.
    #[cfg(unix)]
    {
        let changes_home = args.install || args.desktop || args.uninstall;
        if changes_home
            && *engine.system().distro() != Distro::Termux
            && unsafe { libc::geteuid() } == 0
        {
            eprintln!("ERROR: termforge refuses to run as root.");
            eprintln!("Run it as the user whose environment should be configured.");
            std::process::exit(1);
        }
    }

    if args.status {
        engine.status()?;
    }

    if args.update && !(args.install || args.desktop) {
        let output = engine.update()?;
        if !output.success {
            eprintln!("Error: system update failed: {}", output.stderr_or_empty());
            std::process::exit(1);
        }
        println!("System updated.");
    }

    if args.install || args.desktop {
        let scope = if args.desktop {
            "base environment + Openbox desktop"
        } else {
            "base environment"
        };
        println!("Target distro: {}", engine.system().distro());
        println!("About to install: {}", scope);

        if !args.yes && !confirm("Proceed? [Y/n]: ")? {
            println!("Aborted.");
            return Ok(());
        }

        match engine.install() {
            Ok(_) => {
                println!("\n[+] Installation complete!");
                println!("Restart your session to pick up the new shell and settings.");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.uninstall {
        if !args.yes && !confirm("Remove installed configs and restore backups? [Y/n]: ")? {
            println!("Aborted.");
            return Ok(());
        }

        match engine.uninstall() {
            Ok(_) => println!("\n[+] Uninstallation complete!"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut response = String::new();
    std::io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    Ok(response.is_empty() || response == "y" || response == "yes")
}
