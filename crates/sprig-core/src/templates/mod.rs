//! Template acquisition and rendering

mod context;
mod render;
mod source;

pub use render::{render_dir, render_str, RenderOptions};
pub use source::{AcquiredTemplate, TemplateSource};

use std::path::{Path, PathBuf};

/// Human-readable summary of a finished render.
pub fn summarize(dest: &Path, written: &[PathBuf]) -> String {
    let mut out = format!(
        "Created {} file{} in {}",
        written.len(),
        if written.len() == 1 { "" } else { "s" },
        dest.display()
    );
    for path in written {
        out.push_str("\n  ");
        out.push_str(&path.display().to_string());
    }
    out
}
