//! Rendering a template directory into a destination
//!
//! Files ending in `.jinja` are rendered with the collected answers and
//! ambient context, then written with the suffix stripped. Everything else
//! is copied byte for byte. Relative paths may themselves be templates.

use crate::question::AnswerMap;
use crate::templates::context;
use anyhow::{Context, Result};
use minijinja::Environment;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TEMPLATE_SUFFIX: &str = ".jinja";

/// Always excluded, on top of the manifest's ignore list.
const DEFAULT_IGNORE: &[&str] = &[
    crate::manifest::MANIFEST_FILE,
    ".git",
    ".DS_Store",
    "Thumbs.db",
    "__pycache__",
    "*.swp",
    "*~",
];

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Extra prefix/suffix/exact patterns to exclude.
    pub ignore: Vec<String>,
    /// Render `{{ ... }}` in relative paths too.
    pub render_paths: bool,
}

/// Render one template string against the answers collected so far.
pub fn render_str(template: &str, answers: &AnswerMap) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.render_str(template, answers)
}

/// Render `template_dir` into `dest`, returning the relative paths of the
/// files written, in traversal order.
pub fn render_dir(
    template_dir: &Path,
    dest: &Path,
    answers: &AnswerMap,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let ctx = context::template_context(answers);
    let mut written = Vec::new();

    for entry in WalkDir::new(template_dir)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.context("failed to walk template directory")?;
        let rel = entry
            .path()
            .strip_prefix(template_dir)
            .context("walked entry outside the template root")?;

        if is_ignored(rel, &options.ignore) {
            continue;
        }

        let Some(target_rel) = target_path(rel, &env, &ctx, options.render_paths)
            .with_context(|| format!("failed to render path '{}'", rel.display()))?
        else {
            // A path segment rendered to nothing: conditional content,
            // skipped along with everything underneath it.
            continue;
        };

        let target = dest.join(&target_rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let final_rel = write_file(entry.path(), &target, &target_rel, &env, &ctx)
            .with_context(|| format!("failed to render '{}'", rel.display()))?;
        written.push(final_rel);
    }

    Ok(written)
}

fn write_file(
    source: &Path,
    target: &Path,
    target_rel: &Path,
    env: &Environment,
    ctx: &AnswerMap,
) -> Result<PathBuf> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if let Some(stripped) = name.strip_suffix(TEMPLATE_SUFFIX) {
        let content = std::fs::read_to_string(source)?;
        let rendered = env.render_str(&content, ctx)?;
        let final_target = target.with_file_name(stripped);
        std::fs::write(&final_target, rendered)?;
        Ok(target_rel.with_file_name(stripped))
    } else {
        std::fs::copy(source, target)?;
        Ok(target_rel.to_path_buf())
    }
}

/// Render path segments, failing the whole run on template errors. A
/// segment that renders to an empty string yields `None`.
fn target_path(
    rel: &Path,
    env: &Environment,
    ctx: &AnswerMap,
    render_paths: bool,
) -> Result<Option<PathBuf>, minijinja::Error> {
    if !render_paths {
        return Ok(Some(rel.to_path_buf()));
    }

    let mut out = PathBuf::new();
    for segment in rel.iter() {
        let segment = segment.to_string_lossy();
        let rendered = if segment.contains("{{") {
            env.render_str(&segment, ctx)?
        } else {
            segment.into_owned()
        };
        if rendered.is_empty() {
            return Ok(None);
        }
        out.push(rendered);
    }
    Ok(Some(out))
}

fn is_ignored(rel: &Path, extra: &[String]) -> bool {
    rel.iter().any(|segment| {
        let segment = segment.to_string_lossy();
        DEFAULT_IGNORE
            .iter()
            .any(|pattern| matches_pattern(&segment, pattern))
            || extra
                .iter()
                .any(|pattern| matches_pattern(&segment, pattern))
    })
}

/// `*suffix`, `prefix*`, or exact name.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix('*') {
        name.ends_with(suffix)
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        name.starts_with(prefix)
    } else {
        name == pattern
    }
}
