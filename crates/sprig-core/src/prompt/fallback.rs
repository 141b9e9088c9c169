//! Fallback text-mode chooser
//!
//! Replaces both live menu strategies when no interactive terminal is
//! available. Choices render as a numbered list; input is one token (or a
//! comma-separated token list for multiselect), each token resolved as a
//! 1-based index, then a choice value, then a label, case-insensitively.
//! One unknown token discards the whole attempt. Parsers and validators
//! receive the resolved choice values, never the typed tokens, so the same
//! selection behaves identically here and in the live menu.

use crate::error::PromptError;
use crate::prompt::input::PromptIo;
use crate::prompt::{pipeline, print_error, print_selection_summary};
use crate::question::{AnswerMap, Choice, Question, Value};
use crate::style::Theme;
use std::io;

pub(crate) fn run(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    default: Option<&Value>,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    let default_values = default_values(question, default);

    loop {
        render_choices(io, theme, question, &default_values)?;

        let response = match read_response(io, theme) {
            Ok(line) => line,
            Err(err) => return Err(err),
        };
        let response = response.trim().to_string();

        let outcome = if response.is_empty() {
            if question.multiselect {
                Ok(Value::List(default_values.clone()))
            } else if let Some(first) = default_values.first() {
                Ok(Value::Str(first.clone()))
            } else {
                Err(PromptError::ChoiceRequired)
            }
        } else {
            resolve_response(&response, question)
        };

        let candidate = match outcome {
            Ok(candidate) => candidate,
            Err(err) if err.is_recoverable() => {
                print_error(io, theme, &err.to_string())?;
                continue;
            }
            Err(err) => return Err(err),
        };

        let raw = candidate.to_string();

        match pipeline::resolve(question, &raw, candidate, answers) {
            Ok(value) => {
                print_selection_summary(io, theme, &labels_for(&value, &question.choices))?;
                return Ok(value);
            }
            Err(err) if err.is_recoverable() => print_error(io, theme, &err.to_string())?,
            Err(err) => return Err(err),
        }
    }
}

/// Resolve the whole response: one token for single-select, a
/// comma-separated token list for multiselect. Any unknown token rejects
/// the entire attempt; nothing is partially committed.
fn resolve_response(response: &str, question: &Question) -> Result<Value, PromptError> {
    if question.multiselect {
        let mut resolved = Vec::new();
        for token in response.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match resolve_token(token, &question.choices) {
                Some(value) => resolved.push(value),
                None => return Err(PromptError::UnknownChoice(token.to_string())),
            }
        }
        Ok(Value::List(resolved))
    } else {
        match resolve_token(response, &question.choices) {
            Some(value) => Ok(Value::Str(value)),
            None => Err(PromptError::UnknownChoice(response.to_string())),
        }
    }
}

/// Index first, then value, then label; values and labels match
/// case-insensitively, indices are exact 1-based decimals.
fn resolve_token(token: &str, choices: &[Choice]) -> Option<String> {
    if let Some(idx) = (1..=choices.len()).find(|i| i.to_string() == token) {
        return Some(choices[idx - 1].value.clone());
    }

    let lower = token.to_lowercase();
    if let Some(choice) = choices.iter().find(|c| c.value.to_lowercase() == lower) {
        return Some(choice.value.clone());
    }

    choices
        .iter()
        .find(|c| c.display().to_lowercase() == lower)
        .map(|c| c.value.clone())
}

fn default_values(question: &Question, default: Option<&Value>) -> Vec<String> {
    match default {
        Some(Value::List(items)) if question.multiselect => items.clone(),
        Some(value) if !question.multiselect && !value.is_blank() => vec![value.to_string()],
        _ => Vec::new(),
    }
}

fn render_choices(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    default_values: &[String],
) -> io::Result<()> {
    for (idx, choice) in question.choices.iter().enumerate() {
        io.write_line(&format!(
            "{}{}",
            theme.default_style.apply_to(format!("  {}) ", idx + 1)),
            choice.display()
        ))?;
    }

    if question.multiselect {
        io.write_line(
            &theme
                .menu
                .instruction_style
                .apply_to("  Enter comma-separated numbers or values")
                .to_string(),
        )?;
    }

    if !default_values.is_empty() {
        let labels: Vec<String> = default_values
            .iter()
            .map(|v| display_for(v, &question.choices))
            .collect();
        io.write_line(
            &theme
                .default_style
                .apply_to(format!("  default: {}", labels.join(", ")))
                .to_string(),
        )?;
    }

    Ok(())
}

fn read_response(io: &mut dyn PromptIo, theme: &Theme) -> Result<String, PromptError> {
    io.write_str(&format!(
        "{} ",
        theme.summary.selected_style.apply_to(&theme.input_prefix)
    ))?;
    match io.read_line() {
        Ok(line) => Ok(line),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(PromptError::Aborted),
        Err(err) => Err(err.into()),
    }
}

fn display_for(value: &str, choices: &[Choice]) -> String {
    choices
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.display().to_string())
        .unwrap_or_else(|| value.to_string())
}

fn labels_for(value: &Value, choices: &[Choice]) -> Vec<String> {
    match value {
        Value::List(items) => items.iter().map(|v| display_for(v, choices)).collect(),
        other => vec![display_for(&other.to_string(), choices)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::input::ScriptedIo;

    fn colors() -> Vec<Choice> {
        vec![
            Choice::labeled("r", "Red"),
            Choice::labeled("g", "Green"),
            Choice::labeled("b", "Blue"),
        ]
    }

    fn ask(io: &mut ScriptedIo, question: &Question) -> Result<Value, PromptError> {
        let answers = AnswerMap::new();
        let default = question.resolve_default(&answers);
        run(io, &Theme::plain(), question, default.as_ref(), &answers)
    }

    #[test]
    fn numeric_index_selects_a_choice() {
        let question = Question::new("color", "Color?")
            .choices(colors())
            .default_value("g");
        let mut io = ScriptedIo::lines(["3"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("b".into()));
    }

    #[test]
    fn empty_input_accepts_the_default_value() {
        let question = Question::new("color", "Color?")
            .choices(colors())
            .default_value("g");
        let mut io = ScriptedIo::lines([""]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("g".into()));
    }

    #[test]
    fn empty_input_without_default_reprompts() {
        let question = Question::new("color", "Color?").choices(colors());
        let mut io = ScriptedIo::lines(["", "1"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("r".into()));
        assert!(io.rendered().contains("Please choose a value."));
    }

    #[test]
    fn values_and_labels_match_case_insensitively() {
        let question = Question::new("color", "Color?").choices(colors());
        let mut io = ScriptedIo::lines(["GREEN"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("g".into()));

        let question = Question::new("color", "Color?").choices(colors());
        let mut io = ScriptedIo::lines(["B"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("b".into()));
    }

    #[test]
    fn index_takes_precedence_over_value_and_label() {
        // A value literally named "2" must lose to the index reading.
        let choices = vec![
            Choice::labeled("2", "Two"),
            Choice::labeled("other", "Other"),
        ];
        let question = Question::new("pick", "Pick?").choices(choices);
        let mut io = ScriptedIo::lines(["2"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("other".into()));
    }

    #[test]
    fn unknown_single_token_rejects_and_reprompts() {
        let question = Question::new("color", "Color?").choices(colors());
        let mut io = ScriptedIo::lines(["purple", "red"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("r".into()));
        assert!(io.rendered().contains("Unknown choice 'purple'."));
    }

    #[test]
    fn multiselect_mixes_values_and_indices() {
        let question = Question::new("feats", "Features?")
            .choices(vec![
                Choice::labeled("a", "A"),
                Choice::labeled("b", "B"),
                Choice::labeled("c", "C"),
            ])
            .multiselect(true);
        let mut io = ScriptedIo::lines(["a, 3"]);
        assert_eq!(
            ask(&mut io, &question).unwrap(),
            Value::List(vec!["a".into(), "c".into()])
        );
    }

    #[test]
    fn one_bad_token_discards_the_whole_attempt() {
        let question = Question::new("feats", "Features?")
            .choices(colors())
            .multiselect(true);
        let mut io = ScriptedIo::lines(["r, nope, b", "r, b"]);
        assert_eq!(
            ask(&mut io, &question).unwrap(),
            Value::List(vec!["r".into(), "b".into()])
        );
        assert!(io.rendered().contains("Unknown choice 'nope'."));
    }

    #[test]
    fn multiselect_empty_input_reuses_default_list() {
        let question = Question::new("feats", "Features?")
            .choices(colors())
            .multiselect(true)
            .default_value(vec!["g", "b"]);
        let mut io = ScriptedIo::lines([""]);
        assert_eq!(
            ask(&mut io, &question).unwrap(),
            Value::List(vec!["g".into(), "b".into()])
        );
    }

    #[test]
    fn multiselect_without_default_accepts_empty_selection() {
        let question = Question::new("feats", "Features?")
            .choices(colors())
            .multiselect(true);
        let mut io = ScriptedIo::lines([""]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::List(vec![]));
        assert!(io.rendered().contains("none"));
    }

    #[test]
    fn renders_numbered_list_with_default_hint() {
        let question = Question::new("color", "Color?")
            .choices(colors())
            .default_value("g");
        let mut io = ScriptedIo::lines([""]);
        ask(&mut io, &question).unwrap();
        let rendered = io.rendered();
        assert!(rendered.contains("1) Red"));
        assert!(rendered.contains("3) Blue"));
        assert!(rendered.contains("default: Green"));
    }

    #[test]
    fn validator_failure_discards_and_redisplays() {
        // Validators see the resolved choice value, not the typed index.
        let question = Question::new("color", "Color?")
            .choices(colors())
            .validator(crate::question::Validator::simple(|raw| {
                (raw != "r", Some("red is taken".into()))
            }));
        let mut io = ScriptedIo::lines(["1", "2"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Str("g".into()));
        assert!(io.rendered().contains("red is taken"));
    }

    #[test]
    fn parser_receives_the_resolved_choice_value() {
        // Selecting by index must parse the choice value, not the index.
        let question = Question::new("port", "Port?")
            .choices(vec![
                Choice::labeled("8080", "Default port"),
                Choice::labeled("9090", "Alt port"),
            ])
            .parser(|raw, _| {
                raw.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| "Enter a whole number.".to_string())
            });
        let mut io = ScriptedIo::lines(["1"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Int(8080));
    }

    #[test]
    fn label_input_resolves_before_parsing() {
        let question = Question::new("port", "Port?")
            .choices(vec![
                Choice::labeled("8080", "Default port"),
                Choice::labeled("9090", "Alt port"),
            ])
            .parser(|raw, _| {
                raw.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| "Enter a whole number.".to_string())
            });
        let mut io = ScriptedIo::lines(["Alt port"]);
        assert_eq!(ask(&mut io, &question).unwrap(), Value::Int(9090));
        assert!(!io.rendered().contains("Enter a whole number."));
    }
}
