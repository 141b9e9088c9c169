//! Inline binary choice
//!
//! Compact single-line picker for exactly-two, non-multiselect questions in
//! live mode. Left/right (or up/down) flips between the two options, Enter
//! confirms, Escape aborts the run.

use crate::error::PromptError;
use crate::prompt::input::{next_key, PromptIo};
use crate::prompt::{pipeline, print_error, print_selection_summary};
use crate::question::{AnswerMap, Question, Value};
use crate::style::Theme;
use console::Key;
use std::io;

pub(crate) fn run(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    default: Option<&Value>,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    debug_assert_eq!(question.choices.len(), 2);

    let wanted = default.map(ToString::to_string);
    let mut cursor = wanted
        .and_then(|w| question.choices.iter().position(|c| c.value == w))
        .unwrap_or(0);

    io.hide_cursor()?;
    let result = run_loop(io, theme, question, &mut cursor, answers);
    io.show_cursor()?;
    result
}

fn run_loop(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    cursor: &mut usize,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    loop {
        draw(io, theme, question, *cursor)?;

        loop {
            match next_key(io)? {
                Key::ArrowLeft | Key::ArrowUp | Key::Char('h') | Key::Char('k')
                | Key::ArrowRight | Key::ArrowDown | Key::Char('l') | Key::Char('j') => {
                    *cursor = 1 - *cursor;
                    io.clear_last_lines(1)?;
                    draw(io, theme, question, *cursor)?;
                }
                Key::Enter => break,
                Key::Escape => {
                    io.clear_last_lines(1)?;
                    return Err(PromptError::Aborted);
                }
                _ => {}
            }
        }

        let choice = &question.choices[*cursor];
        let candidate = Value::Str(choice.value.clone());
        let raw = choice.value.clone();
        io.clear_last_lines(1)?;

        match pipeline::resolve(question, &raw, candidate, answers) {
            Ok(value) => {
                let header = format!(
                    "{}{}",
                    theme.prompt.prefix_style.apply_to(&theme.prompt.prefix),
                    theme.prompt.text_style.apply_to(&question.prompt)
                );
                io.write_line(&header)?;
                print_selection_summary(io, theme, &[choice.display().to_string()])?;
                return Ok(value);
            }
            Err(err) if err.is_recoverable() => print_error(io, theme, &err.to_string())?,
            Err(err) => return Err(err),
        }
    }
}

fn draw(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    cursor: usize,
) -> io::Result<()> {
    let inline = &theme.inline;
    let mut line = format!(
        "{}{} ",
        theme.prompt.prefix_style.apply_to(&theme.prompt.prefix),
        theme.prompt.text_style.apply_to(&question.prompt)
    );

    for (idx, choice) in question.choices.iter().enumerate() {
        let selected = idx == cursor;
        let icon = if selected {
            inline.selected_style.apply_to(&inline.selected_icon)
        } else {
            inline.unselected_style.apply_to(&inline.unselected_icon)
        };
        let text = if selected {
            inline.selected_style.apply_to(choice.display())
        } else {
            inline.unselected_style.apply_to(choice.display())
        };
        line.push_str(&format!("{} {}", icon, text));
        if idx == 0 {
            line.push_str(&inline.separator);
        }
    }

    io.write_line(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::input::ScriptedIo;
    use crate::question::{Choice, Validator};

    fn yes_no() -> Question {
        Question::new("overwrite", "Allow overwriting?")
            .choices([Choice::labeled("yes", "Yes"), Choice::labeled("no", "No")])
            .default_value("no")
    }

    #[test]
    fn enter_confirms_the_default_seeded_option() {
        let question = yes_no();
        let mut io = ScriptedIo::keys([Key::Enter]);
        let value = run(
            &mut io,
            &Theme::plain(),
            &question,
            Some(&Value::Str("no".into())),
            &AnswerMap::new(),
        )
        .unwrap();
        assert_eq!(value, Value::Str("no".into()));
    }

    #[test]
    fn arrows_flip_between_the_two_options() {
        let question = yes_no();
        let mut io = ScriptedIo::keys([Key::ArrowLeft, Key::Enter]);
        let value = run(
            &mut io,
            &Theme::plain(),
            &question,
            Some(&Value::Str("no".into())),
            &AnswerMap::new(),
        )
        .unwrap();
        assert_eq!(value, Value::Str("yes".into()));

        // Flipping twice lands back where it started.
        let question = yes_no();
        let mut io = ScriptedIo::keys([Key::ArrowRight, Key::ArrowRight, Key::Enter]);
        let value = run(
            &mut io,
            &Theme::plain(),
            &question,
            Some(&Value::Str("no".into())),
            &AnswerMap::new(),
        )
        .unwrap();
        assert_eq!(value, Value::Str("no".into()));
    }

    #[test]
    fn escape_aborts() {
        let question = yes_no();
        let mut io = ScriptedIo::keys([Key::Escape]);
        let err = run(
            &mut io,
            &Theme::plain(),
            &question,
            None,
            &AnswerMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::Aborted));
    }

    #[test]
    fn validation_failure_keeps_the_picker_alive() {
        let question = Question::new("confirm", "Proceed?")
            .choices([Choice::new("yes"), Choice::new("no")])
            .validator(Validator::simple(|raw| {
                (raw == "yes", Some("must pick yes".into()))
            }));
        // Default cursor on "yes"; move to "no", get rejected, move back.
        let mut io = ScriptedIo::keys([Key::ArrowRight, Key::Enter, Key::ArrowLeft, Key::Enter]);
        let value = run(
            &mut io,
            &Theme::plain(),
            &question,
            None,
            &AnswerMap::new(),
        )
        .unwrap();
        assert_eq!(value, Value::Str("yes".into()));
        assert!(io.rendered().contains("must pick yes"));
    }

    #[test]
    fn summary_line_shows_the_chosen_label() {
        let question = yes_no();
        let mut io = ScriptedIo::keys([Key::Enter]);
        run(
            &mut io,
            &Theme::plain(),
            &question,
            Some(&Value::Str("no".into())),
            &AnswerMap::new(),
        )
        .unwrap();
        assert!(io.rendered().contains("No"));
    }
}
