//! Template acquisition from a local directory or a git repository
//!
//! Remote templates are cloned shallowly into a temporary directory that
//! lives as long as the acquired handle. `owner/repo` shorthand expands to
//! the matching GitHub clone URL.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tempfile::TempDir;

static GITHUB_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+/[\w.-]+$").expect("valid shorthand pattern"));

/// Where a template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Local(PathBuf),
    Git(String),
}

/// A template ready to read from disk. Holds the clone's temporary
/// directory alive for remote sources.
pub struct AcquiredTemplate {
    root: PathBuf,
    _clone_dir: Option<TempDir>,
}

impl AcquiredTemplate {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource {
    /// Interpret a command-line template argument. An existing filesystem
    /// path wins; anything else is treated as a git location.
    pub fn parse(spec: &str) -> Self {
        let path = Path::new(spec);
        if path.exists() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Git(normalise_git_url(spec))
        }
    }

    pub fn acquire(&self) -> Result<AcquiredTemplate> {
        match self {
            Self::Local(path) => {
                if !path.is_dir() {
                    bail!("template directory not found: {}", path.display());
                }
                Ok(AcquiredTemplate {
                    root: path.clone(),
                    _clone_dir: None,
                })
            }
            Self::Git(url) => {
                let clone_dir =
                    TempDir::new().context("failed to create a temporary clone directory")?;
                clone(url, clone_dir.path())?;
                Ok(AcquiredTemplate {
                    root: clone_dir.path().to_path_buf(),
                    _clone_dir: Some(clone_dir),
                })
            }
        }
    }
}

/// Expand `owner/repo` shorthand; full URLs and ssh locations pass through.
fn normalise_git_url(spec: &str) -> String {
    if spec.contains("://") || spec.starts_with("git@") {
        spec.to_string()
    } else if GITHUB_SHORTHAND.is_match(spec) {
        format!("https://github.com/{}.git", spec)
    } else {
        spec.to_string()
    }
}

fn clone(url: &str, target: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", url])
        .arg(target)
        .output()
        .context("failed to run git; is it installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone of '{}' failed: {}", url, stderr.trim());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_expands_to_a_github_clone_url() {
        assert_eq!(
            normalise_git_url("acme/starter"),
            "https://github.com/acme/starter.git"
        );
    }

    #[test]
    fn full_urls_pass_through_unchanged() {
        assert_eq!(
            normalise_git_url("https://gitlab.com/acme/starter.git"),
            "https://gitlab.com/acme/starter.git"
        );
        assert_eq!(
            normalise_git_url("git@github.com:acme/starter.git"),
            "git@github.com:acme/starter.git"
        );
    }

    #[test]
    fn existing_paths_parse_as_local_sources() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().to_str().unwrap();
        assert_eq!(
            TemplateSource::parse(spec),
            TemplateSource::Local(dir.path().to_path_buf())
        );
    }

    #[test]
    fn missing_paths_parse_as_git_sources() {
        assert_eq!(
            TemplateSource::parse("acme/starter"),
            TemplateSource::Git("https://github.com/acme/starter.git".into())
        );
    }

    #[test]
    fn acquiring_a_missing_local_directory_fails() {
        let source = TemplateSource::Local(PathBuf::from("/nonexistent/template"));
        assert!(source.acquire().is_err());
    }

    #[test]
    fn acquiring_a_local_directory_points_at_it() {
        let dir = tempfile::tempdir().unwrap();
        let acquired = TemplateSource::Local(dir.path().to_path_buf())
            .acquire()
            .unwrap();
        assert_eq!(acquired.root(), dir.path());
    }
}
