//! Sprig Core - Shared library for interactive project scaffolding
//!
//! This library drives question-and-answer collection in a terminal and
//! renders a template directory from the answers. It is designed to be used
//! by thin CLI binaries (e.g., `sprig`) that load a declarative manifest and
//! hand the resulting questions to the prompt engine.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Questions** - `Question`, `Value`, and `AnswerMap`: the data model a
//!   collection run operates on, including validators, parsers, and defaults
//!   derived from earlier answers
//! - **Prompting** - `Prompter` and the per-question strategies: free text,
//!   arrow-key menus, an inline two-option picker, and a line-oriented
//!   fallback for non-interactive terminals
//! - **Templates** - manifest loading, template acquisition (local directory
//!   or git clone), and directory rendering
//!
//! # Example Usage
//!
//! ```ignore
//! use sprig_core::{Prompter, Question, Theme};
//!
//! let questions = vec![
//!     Question::new("project_name", "Project name?").default_value("demo"),
//! ];
//! let answers = Prompter::new(Theme::default()).collect(&questions)?;
//! ```

pub mod destination;
pub mod error;
pub mod manifest;
pub mod prompt;
pub mod question;
pub mod style;
pub mod templates;
pub mod validators;

// Re-export main types for convenience
pub use destination::ensure_destination;
pub use error::PromptError;
pub use manifest::TemplateManifest;
pub use prompt::{supports_live_interaction, PromptIo, Prompter, TermIo};
pub use question::{AnswerMap, Choice, Question, Validator, Value};
pub use style::Theme;
pub use templates::{render_dir, summarize, RenderOptions, TemplateSource};
