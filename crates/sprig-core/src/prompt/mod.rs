//! Answer orchestrator
//!
//! Iterates an ordered question list, resolves each default against the
//! answers collected so far, and dispatches to the mode-appropriate prompt
//! strategy: free text, full menu, inline two-option picker, or the
//! line-oriented fallback chooser. One accepted value is inserted into the
//! answer map before the next question is asked, so later defaults and
//! validators observe earlier answers. A user interrupt unwinds the whole
//! collection; no partial answer map reaches the caller.

mod fallback;
mod inline;
pub mod input;
mod menu;
mod pipeline;
mod text;

pub use input::{supports_live_interaction, PromptIo, TermIo};

use crate::error::PromptError;
use crate::question::{AnswerMap, Choice, Question, Value};
use crate::style::Theme;
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Drives one collection run through a single rendering handle.
pub struct Prompter<T: PromptIo> {
    io: T,
    theme: Theme,
}

impl Prompter<TermIo> {
    /// Prompter over the process terminal.
    pub fn new(theme: Theme) -> Self {
        Self::with_io(TermIo::stdout(), theme)
    }
}

impl<T: PromptIo> Prompter<T> {
    pub fn with_io(io: T, theme: Theme) -> Self {
        Self { io, theme }
    }

    /// Collect answers for every question, in order.
    pub fn collect(&mut self, questions: &[Question]) -> Result<AnswerMap, PromptError> {
        self.collect_with_initial(questions, AnswerMap::new())
    }

    /// Collect answers on top of caller-provided initial answers. Initial
    /// entries are visible to defaults and validators like any earlier
    /// answer; questions still ask for their own keys.
    pub fn collect_with_initial(
        &mut self,
        questions: &[Question],
        initial: AnswerMap,
    ) -> Result<AnswerMap, PromptError> {
        validate_questions(questions)?;

        let mut answers = initial;
        for question in questions {
            let value = self.ask(question, &answers)?;
            answers.insert(question.key.clone(), value);
        }
        Ok(answers)
    }

    /// Ask a single question against an existing answer map.
    pub fn ask(&mut self, question: &Question, answers: &AnswerMap) -> Result<Value, PromptError> {
        let default = question.resolve_default(answers);
        let live = self.io.live();

        if live && question.inline_eligible() {
            return inline::run(&mut self.io, &self.theme, question, default.as_ref(), answers);
        }

        self.print_header(question)?;

        if question.choices.is_empty() {
            text::run(&mut self.io, &self.theme, question, default.as_ref(), answers)
        } else if live {
            menu::run(&mut self.io, &self.theme, question, default.as_ref(), answers)
        } else {
            fallback::run(&mut self.io, &self.theme, question, default.as_ref(), answers)
        }
    }

    /// Yes/no overwrite confirmation through the inline-binary path.
    /// Without a live terminal there is nobody to ask; answer no.
    pub fn confirm_overwrite(&mut self, path: &Path) -> Result<bool, PromptError> {
        if !self.io.live() {
            return Ok(false);
        }

        let question = Question::new(
            "overwrite",
            format!("Allow overwriting files in '{}'?", path.display()),
        )
        .choices([Choice::labeled("yes", "Yes"), Choice::labeled("no", "No")])
        .default_value("no");

        let answer = self.ask(&question, &AnswerMap::new())?;
        Ok(answer.as_str() == Some("yes"))
    }

    fn print_header(&mut self, question: &Question) -> io::Result<()> {
        let theme = &self.theme;
        let mut header = format!(
            "{}{}",
            theme.prompt.prefix_style.apply_to(&theme.prompt.prefix),
            theme.prompt.text_style.apply_to(&question.prompt)
        );

        if let Some(help) = &question.help {
            header.push_str(
                &theme
                    .prompt
                    .help_style
                    .apply_to(format!(" — {}", help))
                    .to_string(),
            );
        }

        if !question.choices.is_empty() && self.io.live() {
            let instruction = if question.multiselect {
                &theme.menu.instruction_multi
            } else {
                &theme.menu.instruction_single
            };
            if !instruction.is_empty() {
                header.push_str("  ");
                header.push_str(&theme.menu.instruction_style.apply_to(instruction).to_string());
            }
        }

        self.io.write_line(&header)
    }
}

/// Reject malformed question lists before any prompting happens.
fn validate_questions(questions: &[Question]) -> Result<(), PromptError> {
    let mut seen = HashSet::new();
    for question in questions {
        if question.key.trim().is_empty() {
            return Err(PromptError::Config(format!(
                "question '{}' has an empty key",
                question.prompt
            )));
        }
        if !seen.insert(question.key.as_str()) {
            return Err(PromptError::Config(format!(
                "duplicate question key '{}'",
                question.key
            )));
        }

        let mut values = HashSet::new();
        for choice in &question.choices {
            if !values.insert(choice.value.as_str()) {
                return Err(PromptError::Config(format!(
                    "question '{}' has duplicate choice value '{}'",
                    question.key, choice.value
                )));
            }
        }

        if question.multiselect && question.choices.is_empty() {
            return Err(PromptError::Config(format!(
                "multiselect question '{}' has no choices",
                question.key
            )));
        }
    }
    Ok(())
}

pub(crate) fn print_error(
    io: &mut dyn PromptIo,
    theme: &Theme,
    message: &str,
) -> io::Result<()> {
    io.write_line(&format!(
        "{} {}",
        theme.error.style.apply_to(&theme.error.label),
        message
    ))
}

/// Confirmation line after a choice question: joined labels, or a dimmed
/// "none" for an empty multiselect.
pub(crate) fn print_selection_summary(
    io: &mut dyn PromptIo,
    theme: &Theme,
    labels: &[String],
) -> io::Result<()> {
    let (summary, style) = if labels.is_empty() {
        ("none".to_string(), &theme.summary.dim_style)
    } else {
        (labels.join(", "), &theme.summary.selected_style)
    };
    io.write_line(
        &style
            .apply_to(format!("{}{}", theme.summary.prefix, summary))
            .to_string(),
    )
}
