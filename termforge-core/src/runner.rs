use anyhow::{Context, Result};
use std::process::Command;

/// Captured result of a single external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Trimmed standard output
    pub stdout: String,
    /// Trimmed standard error, None when the stream was empty
    pub stderr: Option<String>,
    /// Whether the command exited with status zero
    pub success: bool,
}

impl CommandOutput {
    /// Stderr if present, otherwise an empty string
    pub fn stderr_or_empty(&self) -> &str {
        self.stderr.as_deref().unwrap_or("")
    }
}

/// Runs a command synchronously and captures its output.
///
/// Arguments are passed as a vector, never interpolated into a shell
/// string, so caller-supplied values (package names, paths) cannot be
/// used to smuggle extra commands in.
///
/// A non-zero exit is reported through `CommandOutput::success`, not as
/// an `Err`; `Err` means the process could not be spawned at all.
pub fn run(program: &str, args: &[&str]) -> Result<CommandOutput> {
    log::debug!("run: {} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    Ok(CommandOutput {
        stdout,
        stderr: if stderr.is_empty() { None } else { Some(stderr) },
        success: output.status.success(),
    })
}

/// Like [`run`], but a non-zero exit becomes an error carrying the
/// command's stderr. Used by setup steps that must abort on failure.
pub fn run_checked(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let output = run(program, args)?;

    if !output.success {
        anyhow::bail!(
            "{} {} failed: {}",
            program,
            args.join(" "),
            output.stderr_or_empty()
        );
    }

    Ok(output)
}

/// Runs a command with a string piped to its stdin.
pub fn run_with_stdin(program: &str, args: &[&str], input: &str) -> Result<CommandOutput> {
    use std::io::Write;
    use std::process::Stdio;

    log::debug!("run (stdin piped): {} {}", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute {}", program))?;

    child
        .stdin
        .as_mut()
        .context("Child process has no stdin")?
        .write_all(input.as_bytes())?;

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed to wait for {}", program))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    Ok(CommandOutput {
        stdout,
        stderr: if stderr.is_empty() { None } else { Some(stderr) },
        success: output.status.success(),
    })
}

/// Checks if a command is available in the system PATH
pub fn is_command_available(command: &str) -> bool {
    Command::new(command)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_trimmed_stdout() {
        let output = run("echo", &["hello"]).unwrap();
        assert_eq!(output.stdout, "hello");
        assert!(output.stderr.is_none());
        assert!(output.success);
    }

    #[test]
    fn test_run_captures_stderr_when_nonempty() {
        let output = run("sh", &["-c", "echo oops >&2"]).unwrap();
        assert_eq!(output.stdout, "");
        assert_eq!(output.stderr.as_deref(), Some("oops"));
    }

    #[test]
    fn test_run_reports_nonzero_exit_without_err() {
        let output = run("sh", &["-c", "exit 3"]).unwrap();
        assert!(!output.success);
    }

    #[test]
    fn test_run_errors_when_program_missing() {
        let result = run("this_command_definitely_does_not_exist_12345", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_checked_errors_on_failure() {
        let result = run_checked("sh", &["-c", "echo broken >&2; exit 1"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("broken"));
    }

    #[test]
    fn test_run_with_stdin_feeds_input() {
        let output = run_with_stdin("cat", &[], "piped content").unwrap();
        assert_eq!(output.stdout, "piped content");
    }

    #[test]
    fn test_is_command_available_for_existing_command() {
        let has_sh = is_command_available("sh") || is_command_available("bash");
        assert!(has_sh, "No POSIX shell found");
    }

    #[test]
    fn test_is_command_available_for_nonexistent_command() {
        assert!(!is_command_available("this_command_definitely_does_not_exist_12345"));
    }
}
