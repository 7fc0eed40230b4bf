use crate::runner;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Fetches files with wget into a download directory.
///
/// The original setup relied on wget's `-N` timestamping and resume
/// behavior; delegating to it keeps those semantics without pulling an
/// HTTP stack into the tool.
pub struct Downloader {
    download_dir: PathBuf,
}

impl Downloader {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Downloads a URL, saving it under the download dir.
    ///
    /// The target filename defaults to the last path segment of the URL.
    pub fn download_file(&self, url: &str, filename: Option<&str>) -> Result<PathBuf> {
        if !runner::is_command_available("wget") {
            anyhow::bail!("wget is not installed; cannot download {}", url);
        }

        let filename = match filename {
            Some(name) => name.to_string(),
            None => basename_of(url)
                .with_context(|| format!("Cannot derive a filename from {}", url))?,
        };

        std::fs::create_dir_all(&self.download_dir)
            .with_context(|| format!("Failed to create {}", self.download_dir.display()))?;

        let filepath = self.download_dir.join(&filename);
        let target = filepath
            .to_str()
            .with_context(|| format!("Download path is not valid UTF-8: {}", filepath.display()))?;

        log::info!("Downloading {} -> {}", url, filepath.display());
        let output = runner::run("wget", &["-q", "-O", target, url])?;

        if !output.success {
            anyhow::bail!(
                "Download of {} failed: {}",
                url,
                output.stderr_or_empty()
            );
        }

        Ok(filepath)
    }
}

fn basename_of(url: &str) -> Option<String> {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let trimmed = without_scheme.trim_end_matches('/');
    let (_, name) = trimmed.rsplit_once('/')?;
    // Strip any query string wget would not include in the name
    let name = name.split('?').next().unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_of_plain_url() {
        assert_eq!(
            basename_of("https://example.com/dir/plug.vim").as_deref(),
            Some("plug.vim")
        );
    }

    #[test]
    fn test_basename_of_strips_query() {
        assert_eq!(
            basename_of("https://example.com/font.ttf?raw=true").as_deref(),
            Some("font.ttf")
        );
    }

    #[test]
    fn test_basename_of_bare_host_is_none() {
        assert!(basename_of("https://example.com/").is_none());
        assert!(basename_of("https:").is_none());
    }
}
