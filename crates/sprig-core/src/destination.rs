//! Destination directory preparation

use crate::error::PromptError;
use crate::prompt::{PromptIo, Prompter};
use std::io;
use std::path::Path;

/// Make sure the destination is a directory we may write into. A missing
/// directory is created; a non-empty one needs `--force` or an explicit
/// confirmation, and declining aborts the run.
pub fn ensure_destination<T: PromptIo>(
    prompter: &mut Prompter<T>,
    dest: &Path,
    force: bool,
) -> Result<(), PromptError> {
    if !dest.exists() {
        std::fs::create_dir_all(dest)?;
        return Ok(());
    }

    if !dest.is_dir() {
        return Err(PromptError::Config(format!(
            "destination '{}' exists and is not a directory",
            dest.display()
        )));
    }

    if force || is_empty_dir(dest)? {
        return Ok(());
    }

    if prompter.confirm_overwrite(dest)? {
        Ok(())
    } else {
        Err(PromptError::Aborted)
    }
}

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(std::fs::read_dir(dir)?.next().is_none())
}
