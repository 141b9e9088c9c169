//! Free-text prompt
//!
//! Single-line entry with an editable pre-filled default in live mode and a
//! press-enter-to-accept default in fallback mode. Empty input without a
//! usable default is a first-class rejection, separate from validators.

use crate::error::PromptError;
use crate::prompt::input::PromptIo;
use crate::prompt::{pipeline, print_error};
use crate::question::{AnswerMap, Question, Value};
use crate::style::Theme;
use std::io;

pub(crate) fn run(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    default: Option<&Value>,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    let usable_default = default.filter(|v| !v.is_blank());

    loop {
        let response = read_response(io, theme, usable_default)?;
        let stripped = response.trim();

        let (candidate, raw) = if stripped.is_empty() {
            match usable_default {
                Some(value) => (value.clone(), value.to_string()),
                None => {
                    print_error(io, theme, &PromptError::InputRequired.to_string())?;
                    continue;
                }
            }
        } else {
            (Value::Str(stripped.to_string()), stripped.to_string())
        };

        match pipeline::resolve(question, &raw, candidate, answers) {
            Ok(value) => {
                confirm(io, theme, &raw)?;
                return Ok(value);
            }
            Err(err) if err.is_recoverable() => print_error(io, theme, &err.to_string())?,
            Err(err) => return Err(err),
        }
    }
}

fn read_response(
    io: &mut dyn PromptIo,
    theme: &Theme,
    usable_default: Option<&Value>,
) -> Result<String, PromptError> {
    let prefix = format!(
        "{} ",
        theme.summary.selected_style.apply_to(&theme.input_prefix)
    );

    let result = if io.live() {
        io.write_str(&prefix)?;
        let initial = usable_default.map(ToString::to_string).unwrap_or_default();
        io.read_line_initial(&initial)
    } else {
        if let Some(value) = usable_default {
            io.write_line(
                &theme
                    .default_style
                    .apply_to(format!("  default: {}", value))
                    .to_string(),
            )?;
        }
        io.write_str(&prefix)?;
        io.read_line()
    };

    match result {
        Ok(line) => Ok(line),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(PromptError::Aborted),
        Err(err) => Err(err.into()),
    }
}

/// Show the accepted text, styled distinctly from question and error lines.
/// In live mode the input line itself is rewritten in place.
fn confirm(io: &mut dyn PromptIo, theme: &Theme, display: &str) -> io::Result<()> {
    if io.live() {
        io.clear_last_lines(1)?;
        io.write_line(
            &theme
                .summary
                .selected_style
                .apply_to(format!("{} {}", theme.input_prefix, display))
                .to_string(),
        )
    } else {
        io.write_line(
            &theme
                .summary
                .selected_style
                .apply_to(format!("{}{}", theme.summary.prefix, display))
                .to_string(),
        )
    }
}
