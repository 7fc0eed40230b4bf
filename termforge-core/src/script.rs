use crate::runner::{self, CommandOutput};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SHEBANG: &str = "#!/bin/bash\n";

/// Writes and runs throwaway bash scripts under a scratch directory.
///
/// Some setup steps (oh-my-zsh's own installer, vendor bootstrap
/// snippets) only exist as shell script bodies; this keeps them on disk
/// where the user can inspect them instead of piping curl into sh.
pub struct BashScriptManager {
    base_dir: PathBuf,
}

impl BashScriptManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn full_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Writes a script with a bash shebang and marks it executable
    pub fn create_script(&self, script_name: &str, commands: &str) -> Result<PathBuf> {
        let script_path = self.full_path(script_name);

        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create {}", self.base_dir.display()))?;

        let mut body = String::with_capacity(SHEBANG.len() + commands.len() + 1);
        body.push_str(SHEBANG);
        body.push_str(commands);
        if !commands.ends_with('\n') {
            body.push('\n');
        }

        fs::write(&script_path, body)
            .with_context(|| format!("Failed to write {}", script_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("Failed to chmod {}", script_path.display()))?;
        }

        log::debug!("Wrote script {}", script_path.display());
        Ok(script_path)
    }

    /// Runs a previously created script; a missing script is an error
    /// and nothing is executed
    pub fn execute_script(&self, script_name: &str) -> Result<CommandOutput> {
        let script_path = self.full_path(script_name);

        if !script_path.exists() {
            anyhow::bail!("Script not found: {}", script_path.display());
        }

        let path = script_path
            .to_str()
            .with_context(|| format!("Script path is not valid UTF-8: {}", script_path.display()))?;
        runner::run("bash", &[path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (TempDir, BashScriptManager) {
        let dir = TempDir::new().unwrap();
        let manager = BashScriptManager::new(dir.path());
        (dir, manager)
    }

    #[test]
    fn test_create_script_writes_shebang_and_mode() {
        let (_dir, bm) = manager();
        let path = bm.create_script("hello.sh", "echo hi").unwrap();

        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("#!/bin/bash\n"));
        assert!(body.ends_with("echo hi\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_execute_script_returns_output() {
        let (_dir, bm) = manager();
        bm.create_script("greet.sh", "echo scripted").unwrap();

        let output = bm.execute_script("greet.sh").unwrap();
        assert_eq!(output.stdout, "scripted");
        assert!(output.success);
    }

    #[test]
    fn test_execute_missing_script_errors() {
        let (_dir, bm) = manager();
        let err = bm.execute_script("ghost.sh").unwrap_err().to_string();
        assert!(err.contains("Script not found"));
    }
}
