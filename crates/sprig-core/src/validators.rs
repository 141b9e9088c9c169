//! Built-in validators
//!
//! Reusable `Validator` constructors for common manifest needs. All of them
//! are context-free (`Validator::Simple`); question-specific cross-field
//! checks are written by callers with `Validator::with_answers`.

use crate::question::Validator;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SSH_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@[\w.-]+:[\w./-]+$").expect("valid ssh url pattern"));

/// Rejects input that is empty after trimming.
pub fn required() -> Validator {
    Validator::simple(|raw| {
        if raw.trim().is_empty() {
            (false, Some("Please provide a value.".to_string()))
        } else {
            (true, None)
        }
    })
}

/// Accepts empty input, `git@host:path` SSH remotes, and absolute
/// http(s)/ssh URLs. Everything else is rejected with a hint.
pub fn repository_url() -> Validator {
    Validator::simple(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() || SSH_URL_PATTERN.is_match(trimmed) {
            return (true, None);
        }

        if let Ok(url) = Url::parse(trimmed) {
            let scheme_ok = matches!(url.scheme(), "http" | "https" | "ssh");
            if scheme_ok && url.has_host() && !url.path().is_empty() {
                return (true, None);
            }
        }

        (
            false,
            Some("Repository URL must be an HTTP(S) or git@ SSH URL.".to_string()),
        )
    })
}

/// Requires the trimmed input to match `expr` in full.
pub fn pattern(expr: &str, message: Option<String>) -> Result<Validator, regex::Error> {
    let display = expr.to_string();
    let regex = Regex::new(&format!("^(?:{})$", expr))?;
    Ok(Validator::simple(move |raw| {
        if regex.is_match(raw.trim()) {
            (true, None)
        } else {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("Value must match pattern '{}'.", display));
            (false, Some(msg))
        }
    }))
}
