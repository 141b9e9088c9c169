//! Live single/multi choice menu
//!
//! The cursor/selection logic is a pure `(state, event) -> step` machine so
//! it can be driven by synthetic event sequences; the render loop around it
//! blocks on one key at a time and redraws synchronously after each change.

use crate::error::PromptError;
use crate::prompt::input::{next_key, PromptIo};
use crate::prompt::{pipeline, print_error, print_selection_summary};
use crate::question::{AnswerMap, Choice, Question, Value};
use crate::style::Theme;
use console::Key;
use std::collections::BTreeSet;
use std::io;

/// Logical menu events, decoupled from physical key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuEvent {
    Prev,
    Next,
    First,
    Last,
    Toggle,
    Confirm,
    Abort,
}

/// What the loop should do after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuStep {
    Continue,
    Confirmed,
    Aborted,
}

/// Map a physical key to a logical event. Toggle only exists for
/// multiselect menus; unbound keys map to nothing.
pub(crate) fn map_key(key: &Key, multiselect: bool) -> Option<MenuEvent> {
    match key {
        Key::ArrowUp | Key::ArrowLeft | Key::Char('k') | Key::Char('h') => Some(MenuEvent::Prev),
        Key::ArrowDown | Key::ArrowRight | Key::Char('j') | Key::Char('l') => Some(MenuEvent::Next),
        Key::Home => Some(MenuEvent::First),
        Key::End => Some(MenuEvent::Last),
        Key::Char(' ') if multiselect => Some(MenuEvent::Toggle),
        Key::Enter => Some(MenuEvent::Confirm),
        Key::Escape => Some(MenuEvent::Abort),
        _ => None,
    }
}

/// Transient cursor/selection state for one choice question.
#[derive(Debug, Clone)]
pub(crate) struct MenuState {
    pub cursor: usize,
    pub selected: BTreeSet<usize>,
    count: usize,
    multiselect: bool,
}

impl MenuState {
    /// Seed cursor and selection from the resolved default.
    ///
    /// Single-select: cursor on the default's index, else 0. Multiselect:
    /// selection holds the indices of default values present in the choice
    /// list; cursor on the lowest selected index, else 0.
    pub fn seeded(choices: &[Choice], default: Option<&Value>, multiselect: bool) -> Self {
        let count = choices.len();
        let mut selected = BTreeSet::new();
        let cursor;

        if multiselect {
            if let Some(Value::List(defaults)) = default {
                for (idx, choice) in choices.iter().enumerate() {
                    if defaults.iter().any(|v| v == &choice.value) {
                        selected.insert(idx);
                    }
                }
            }
            cursor = selected.iter().next().copied().unwrap_or(0);
        } else {
            let wanted = default.map(ToString::to_string);
            cursor = wanted
                .and_then(|w| choices.iter().position(|c| c.value == w))
                .unwrap_or(0);
        }

        Self {
            cursor,
            selected,
            count,
            multiselect,
        }
    }

    pub fn apply(&mut self, event: MenuEvent) -> MenuStep {
        match event {
            MenuEvent::Prev => {
                self.cursor = (self.cursor + self.count - 1) % self.count;
                MenuStep::Continue
            }
            MenuEvent::Next => {
                self.cursor = (self.cursor + 1) % self.count;
                MenuStep::Continue
            }
            MenuEvent::First => {
                self.cursor = 0;
                MenuStep::Continue
            }
            MenuEvent::Last => {
                self.cursor = self.count - 1;
                MenuStep::Continue
            }
            MenuEvent::Toggle => {
                if self.multiselect {
                    if !self.selected.remove(&self.cursor) {
                        self.selected.insert(self.cursor);
                    }
                }
                MenuStep::Continue
            }
            MenuEvent::Confirm => MenuStep::Confirmed,
            MenuEvent::Abort => MenuStep::Aborted,
        }
    }

    /// The confirmed candidate plus its raw string form for the pipeline.
    pub fn confirmed(&self, choices: &[Choice]) -> (Value, String) {
        if self.multiselect {
            let values: Vec<String> = self
                .selected
                .iter()
                .map(|&idx| choices[idx].value.clone())
                .collect();
            let raw = values.join(", ");
            (Value::List(values), raw)
        } else {
            let value = choices[self.cursor].value.clone();
            (Value::Str(value.clone()), value)
        }
    }

    /// Display labels for the confirmed selection.
    pub fn confirmed_labels(&self, choices: &[Choice]) -> Vec<String> {
        if self.multiselect {
            self.selected
                .iter()
                .map(|&idx| choices[idx].display().to_string())
                .collect()
        } else {
            vec![choices[self.cursor].display().to_string()]
        }
    }
}

/// Run the live menu for one question until a value is accepted or the run
/// is aborted. A validation failure redisplays the menu with cursor and
/// selection preserved, with the error shown above it.
pub(crate) fn run(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    default: Option<&Value>,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    let mut state = MenuState::seeded(&question.choices, default, question.multiselect);
    io.hide_cursor()?;
    let result = run_loop(io, theme, question, &mut state, answers);
    io.show_cursor()?;
    result
}

fn run_loop(
    io: &mut dyn PromptIo,
    theme: &Theme,
    question: &Question,
    state: &mut MenuState,
    answers: &AnswerMap,
) -> Result<Value, PromptError> {
    let lines = question.choices.len();

    loop {
        draw(io, theme, &question.choices, state)?;

        loop {
            let key = next_key(io)?;
            let Some(event) = map_key(&key, question.multiselect) else {
                continue;
            };
            match state.apply(event) {
                MenuStep::Continue => {
                    io.clear_last_lines(lines)?;
                    draw(io, theme, &question.choices, state)?;
                }
                MenuStep::Confirmed => break,
                MenuStep::Aborted => {
                    io.clear_last_lines(lines)?;
                    return Err(PromptError::Aborted);
                }
            }
        }

        let (candidate, raw) = state.confirmed(&question.choices);
        io.clear_last_lines(lines)?;

        match pipeline::resolve(question, &raw, candidate, answers) {
            Ok(value) => {
                print_selection_summary(io, theme, &state.confirmed_labels(&question.choices))?;
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
    choices: &[Choice],
    state: &MenuState,
) -> io::Result<()> {
    let menu = &theme.menu;
    let caret_pad = " ".repeat(console::measure_text_width(&menu.caret_icon));

    for (idx, choice) in choices.iter().enumerate() {
        let at_cursor = idx == state.cursor;
        let bullet_on = if state.multiselect {
            state.selected.contains(&idx)
        } else {
            at_cursor
        };

        let caret = if at_cursor {
            menu.caret_style.apply_to(&menu.caret_icon).to_string()
        } else {
            caret_pad.clone()
        };
        let bullet = if bullet_on {
            menu.bullet_selected_style
                .apply_to(&menu.bullet_selected_icon)
                .to_string()
        } else {
            menu.bullet_unselected_style
                .apply_to(&menu.bullet_unselected_icon)
                .to_string()
        };
        let text = if at_cursor {
            menu.text_selected_style.apply_to(choice.display())
        } else {
            menu.text_unselected_style.apply_to(choice.display())
        };

        io.write_line(&format!("{}{}{}", caret, bullet, text))?;
    }

    Ok(())
}
