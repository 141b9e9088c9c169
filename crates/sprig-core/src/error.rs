//! Error types for the prompt engine
//!
//! Recoverable errors are caught at the innermost retry loop and never
//! propagate past the question currently being asked. Fatal errors unwind
//! out of `Prompter::collect` without producing an answer map.

use thiserror::Error;

/// Errors produced while collecting answers.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A parser or validator rejected the candidate value (recoverable).
    #[error("{0}")]
    Validation(String),

    /// Empty free-text input with no usable default (recoverable).
    #[error("Please provide a value.")]
    InputRequired,

    /// Empty choice input with no usable default (recoverable).
    #[error("Please choose a value.")]
    ChoiceRequired,

    /// A fallback-mode token did not resolve to any choice (recoverable).
    #[error("Unknown choice '{0}'.")]
    UnknownChoice(String),

    /// Malformed question list or manifest (fatal, surfaced before prompting).
    #[error("configuration error: {0}")]
    Config(String),

    /// The user interrupted the run (fatal).
    #[error("aborted by user")]
    Aborted,

    /// Terminal I/O failed (fatal).
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Whether the enclosing retry loop may redisplay the prompt and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PromptError::Validation(_)
                | PromptError::InputRequired
                | PromptError::ChoiceRequired
                | PromptError::UnknownChoice(_)
        )
    }
}
