//! Ambient template context
//!
//! Values available to every template without being asked for: the git
//! identity of whoever is running the tool and the current date. Collected
//! answers always win over ambient values.

use crate::question::{AnswerMap, Value};
use chrono::{Datelike, Local};
use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

static GITHUB_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([\w.-]+)/").expect("valid remote pattern"));

/// Answers merged over the ambient values.
pub(crate) fn template_context(answers: &AnswerMap) -> AnswerMap {
    let mut ctx = AnswerMap::new();
    let now = Local::now();
    ctx.insert("current_year", Value::Int(i64::from(now.year())));
    ctx.insert("current_date", Value::Str(now.format("%Y-%m-%d").to_string()));

    if let Some(name) = git_config("user.name") {
        ctx.insert("git_user_name", Value::Str(name));
    }
    if let Some(email) = git_config("user.email") {
        ctx.insert("git_user_email", Value::Str(email));
    }
    if let Some(username) = github_username() {
        ctx.insert("github_username", Value::Str(username));
    }

    for (key, value) in answers.iter() {
        ctx.insert(key, value.clone());
    }
    ctx
}

fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// GitHub account guessed from the origin remote of the current repository.
fn github_username() -> Option<String> {
    username_from_remote(&git_config("remote.origin.url")?)
}

fn username_from_remote(remote: &str) -> Option<String> {
    GITHUB_REMOTE
        .captures(remote)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_carries_the_current_year() {
        let ctx = template_context(&AnswerMap::new());
        match ctx.get("current_year") {
            Some(Value::Int(year)) => assert!(*year >= 2025),
            other => panic!("unexpected current_year: {:?}", other),
        }
    }

    #[test]
    fn answers_shadow_ambient_values() {
        let mut answers = AnswerMap::new();
        answers.insert("current_year", Value::Int(1999));
        let ctx = template_context(&answers);
        assert_eq!(ctx.get("current_year"), Some(&Value::Int(1999)));
    }

    #[test]
    fn unknown_git_config_keys_resolve_to_none() {
        assert_eq!(git_config("sprig.definitely-not-a-key"), None);
    }

    #[test]
    fn username_extracts_from_ssh_and_https_remotes() {
        assert_eq!(
            username_from_remote("git@github.com:octo-cat/repo.git"),
            Some("octo-cat".to_string())
        );
        assert_eq!(
            username_from_remote("https://github.com/octo-cat/repo.git"),
            Some("octo-cat".to_string())
        );
        assert_eq!(username_from_remote("https://gitlab.com/octo/repo"), None);
    }
}
