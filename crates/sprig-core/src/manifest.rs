//! Template manifest (`sprig.yaml`) parsing
//!
//! A template directory carries a declarative manifest describing the
//! questions to ask and how to render afterwards. Malformed manifests are
//! configuration errors surfaced before any prompting happens.
//!
//! ```yaml
//! title: "My project template"
//! questions:
//!   - key: project_name
//!     prompt: "Project name?"
//!     default: demo
//!     validators: [required]
//!   - key: package_name
//!     prompt: "Package name?"
//!     default: "{{ project_name }}"
//!   - key: features
//!     prompt: "Features?"
//!     multiselect: true
//!     choices:
//!       - { value: cli, label: "Command line" }
//!       - { value: web, label: "Web server" }
//! ignore: ["*.swp"]
//! ```

use crate::error::PromptError;
use crate::question::{Choice, Question, Value};
use crate::{templates, validators};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST_FILE: &str = "sprig.yaml";

/// Root manifest of one template directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Banner printed before the first question.
    #[serde(default)]
    pub title: Option<String>,

    /// Ordered question list.
    pub questions: Vec<QuestionSpec>,

    /// Glob-ish patterns (prefix/suffix/exact) excluded from rendering,
    /// merged with the built-in ignore list.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Treat relative paths as templates too (`{{ package_name }}/mod.rs`).
    #[serde(default = "default_true")]
    pub render_paths: bool,
}

fn default_true() -> bool {
    true
}

/// Declarative form of one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub key: String,
    pub prompt: String,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default)]
    pub default: Option<DefaultSpec>,

    #[serde(default)]
    pub choices: Vec<ChoiceSpec>,

    #[serde(default)]
    pub multiselect: bool,

    /// Typed parsing of the accepted text.
    #[serde(default)]
    pub kind: ValueKind,

    /// Built-in validator names: `required`, `repository_url`,
    /// or `pattern:<regex>`.
    #[serde(default)]
    pub validators: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultSpec {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSpec {
    Bare(String),
    Labeled {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    Str,
    Int,
    Bool,
}

impl TemplateManifest {
    /// Load the manifest from a template directory.
    pub fn load(template_dir: &Path) -> Result<Self, PromptError> {
        let path = template_dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(PromptError::Config(format!(
                "template '{}' is missing {}",
                template_dir.display(),
                MANIFEST_FILE
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|err| {
            PromptError::Config(format!("failed to read {}: {}", path.display(), err))
        })?;
        serde_yaml::from_str(&content).map_err(|err| {
            PromptError::Config(format!("failed to parse {}: {}", path.display(), err))
        })
    }

    /// Build runnable questions from the declarative specs.
    pub fn build_questions(&self) -> Result<Vec<Question>, PromptError> {
        self.questions.iter().map(build_question).collect()
    }
}

fn build_question(spec: &QuestionSpec) -> Result<Question, PromptError> {
    let mut question = Question::new(spec.key.clone(), spec.prompt.clone());

    if let Some(help) = &spec.help {
        question = question.help(help.clone());
    }

    question = question.choices(spec.choices.iter().map(|c| match c {
        ChoiceSpec::Bare(value) => Choice::new(value.clone()),
        ChoiceSpec::Labeled { value, label } => Choice {
            value: value.clone(),
            label: label.clone(),
        },
    }));
    question = question.multiselect(spec.multiselect);

    if let Some(default) = &spec.default {
        question = match default {
            DefaultSpec::Many(items) => question.default_value(items.clone()),
            DefaultSpec::Single(text) if text.contains("{{") => {
                // Derived default: a template over the answers so far.
                // Render failures degrade to "no usable default".
                let template = text.clone();
                question.default_with(move |answers| {
                    Value::Str(templates::render_str(&template, answers).unwrap_or_default())
                })
            }
            DefaultSpec::Single(text) => question.default_value(text.clone()),
        };
    }

    question = match spec.kind {
        ValueKind::Str => question,
        ValueKind::Int => question.parser(|raw, _| {
            raw.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| "Enter a whole number.".to_string())
        }),
        ValueKind::Bool => question.parser(|raw, _| match raw.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(Value::Bool(true)),
            "n" | "no" | "false" | "0" => Ok(Value::Bool(false)),
            _ => Err("Enter yes or no.".to_string()),
        }),
    };

    for name in &spec.validators {
        question = question.validator(build_validator(&spec.key, name)?);
    }

    Ok(question)
}

fn build_validator(
    key: &str,
    name: &str,
) -> Result<crate::question::Validator, PromptError> {
    if let Some(expr) = name.strip_prefix("pattern:") {
        return validators::pattern(expr, None).map_err(|err| {
            PromptError::Config(format!(
                "question '{}' has an invalid pattern validator: {}",
                key, err
            ))
        });
    }

    match name {
        "required" => Ok(validators::required()),
        "repository_url" => Ok(validators::repository_url()),
        other => Err(PromptError::Config(format!(
            "question '{}' names an unknown validator '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::AnswerMap;

    const MANIFEST: &str = r#"
title: "Demo template"
questions:
  - key: project_name
    prompt: "Project name?"
    default: demo
    validators: [required]
  - key: package_name
    prompt: "Package name?"
    default: "{{ project_name }}_pkg"
  - key: port
    prompt: "Port?"
    kind: int
    default: "8080"
  - key: features
    prompt: "Features?"
    multiselect: true
    choices:
      - { value: cli, label: "Command line" }
      - web
ignore: ["*.swp"]
"#;

    fn manifest() -> TemplateManifest {
        serde_yaml::from_str(MANIFEST).unwrap()
    }

    #[test]
    fn parses_title_questions_and_ignore_list() {
        let m = manifest();
        assert_eq!(m.title.as_deref(), Some("Demo template"));
        assert_eq!(m.questions.len(), 4);
        assert_eq!(m.ignore, vec!["*.swp".to_string()]);
        assert!(m.render_paths);
    }

    #[test]
    fn bare_and_labeled_choices_both_parse() {
        let questions = manifest().build_questions().unwrap();
        let features = &questions[3];
        assert_eq!(features.choices[0].value, "cli");
        assert_eq!(features.choices[0].display(), "Command line");
        assert_eq!(features.choices[1].value, "web");
        assert_eq!(features.choices[1].display(), "web");
        assert!(features.multiselect);
    }

    #[test]
    fn templated_default_derives_from_earlier_answers() {
        let questions = manifest().build_questions().unwrap();
        let mut answers = AnswerMap::new();
        answers.insert("project_name", Value::Str("demo".into()));
        let resolved = questions[1].resolve_default(&answers);
        assert_eq!(resolved, Some(Value::Str("demo_pkg".into())));
    }

    #[test]
    fn int_kind_installs_a_parser() {
        let questions = manifest().build_questions().unwrap();
        let port = &questions[2];
        let parser = port.parser.as_ref().unwrap();
        assert_eq!(parser("8080", &AnswerMap::new()), Ok(Value::Int(8080)));
        assert!(parser("nope", &AnswerMap::new()).is_err());
    }

    #[test]
    fn named_validators_resolve_to_builtins() {
        let questions = manifest().build_questions().unwrap();
        assert_eq!(questions[0].validators.len(), 1);
        let (valid, _) = questions[0].validators[0].check("  ", &AnswerMap::new());
        assert!(!valid);
    }

    #[test]
    fn unknown_validator_name_is_a_config_error() {
        let yaml = r#"
questions:
  - key: x
    prompt: "X?"
    validators: [frobnicate]
"#;
        let m: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            m.build_questions(),
            Err(PromptError::Config(_))
        ));
    }

    #[test]
    fn pattern_validator_compiles_from_suffix() {
        let yaml = r#"
questions:
  - key: slug
    prompt: "Slug?"
    validators: ["pattern:[a-z-]+"]
"#;
        let m: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        let questions = m.build_questions().unwrap();
        let (valid, _) = questions[0].validators[0].check("my-slug", &AnswerMap::new());
        assert!(valid);
        let (valid, _) = questions[0].validators[0].check("Nope!", &AnswerMap::new());
        assert!(!valid);
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let yaml = r#"
questions:
  - key: slug
    prompt: "Slug?"
    validators: ["pattern:("]
"#;
        let m: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            m.build_questions(),
            Err(PromptError::Config(_))
        ));
    }

    #[test]
    fn bool_kind_parses_yes_no_forms() {
        let yaml = r#"
questions:
  - key: ci
    prompt: "CI?"
    kind: bool
"#;
        let m: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        let questions = m.build_questions().unwrap();
        let parser = questions[0].parser.as_ref().unwrap();
        assert_eq!(parser("yes", &AnswerMap::new()), Ok(Value::Bool(true)));
        assert_eq!(parser("N", &AnswerMap::new()), Ok(Value::Bool(false)));
        assert!(parser("maybe", &AnswerMap::new()).is_err());
    }

    #[test]
    fn missing_manifest_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TemplateManifest::load(dir.path()),
            Err(PromptError::Config(_))
        ));
    }

    #[test]
    fn load_round_trips_through_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), MANIFEST).unwrap();
        let m = TemplateManifest::load(dir.path()).unwrap();
        assert_eq!(m.questions.len(), 4);
    }
}
