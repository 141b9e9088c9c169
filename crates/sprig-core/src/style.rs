//! Display theming for prompts, menus, and summaries
//!
//! Purely cosmetic: icons, prefixes, separators, instruction strings, and
//! `console::Style` attributes. The theme has no bearing on prompt state
//! transitions, so a bare-string test theme behaves identically.

use console::Style;

/// Question header styling.
#[derive(Debug, Clone)]
pub struct PromptTheme {
    pub prefix: String,
    pub prefix_style: Style,
    pub text_style: Style,
    pub help_style: Style,
}

impl Default for PromptTheme {
    fn default() -> Self {
        Self {
            prefix: "? ".into(),
            prefix_style: Style::new().cyan().bold(),
            text_style: Style::new().white().bold(),
            help_style: Style::new().dim(),
        }
    }
}

/// Inline two-option picker styling.
#[derive(Debug, Clone)]
pub struct InlineTheme {
    pub selected_icon: String,
    pub unselected_icon: String,
    pub separator: String,
    pub selected_style: Style,
    pub unselected_style: Style,
}

impl Default for InlineTheme {
    fn default() -> Self {
        Self {
            selected_icon: "●".into(),
            unselected_icon: "○".into(),
            separator: " / ".into(),
            selected_style: Style::new().bold(),
            unselected_style: Style::new().dim(),
        }
    }
}

/// Full-menu styling.
#[derive(Debug, Clone)]
pub struct MenuTheme {
    pub caret_icon: String,
    pub caret_style: Style,
    pub bullet_selected_icon: String,
    pub bullet_unselected_icon: String,
    pub bullet_selected_style: Style,
    pub bullet_unselected_style: Style,
    pub text_selected_style: Style,
    pub text_unselected_style: Style,
    pub instruction_single: String,
    pub instruction_multi: String,
    pub instruction_style: Style,
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self {
            caret_icon: "▌  ".into(),
            caret_style: Style::new().cyan().bold(),
            bullet_selected_icon: "● ".into(),
            bullet_unselected_icon: "○ ".into(),
            bullet_selected_style: Style::new().bold(),
            bullet_unselected_style: Style::new().dim(),
            text_selected_style: Style::new().bold(),
            text_unselected_style: Style::new(),
            instruction_single: "↑/↓ move  Enter select".into(),
            instruction_multi: "↑/↓ move  Space toggle  Enter confirm".into(),
            instruction_style: Style::new().dim(),
        }
    }
}

/// Post-acceptance confirmation line styling.
#[derive(Debug, Clone)]
pub struct SummaryTheme {
    pub prefix: String,
    pub selected_style: Style,
    pub dim_style: Style,
}

impl Default for SummaryTheme {
    fn default() -> Self {
        Self {
            prefix: "  → ".into(),
            selected_style: Style::new().green().bold(),
            dim_style: Style::new().dim(),
        }
    }
}

/// Error line styling.
#[derive(Debug, Clone)]
pub struct ErrorTheme {
    pub label: String,
    pub style: Style,
}

impl Default for ErrorTheme {
    fn default() -> Self {
        Self {
            label: "Error:".into(),
            style: Style::new().red().bold(),
        }
    }
}

/// The full styling configuration threaded through every prompt strategy.
#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt: PromptTheme,
    pub inline: InlineTheme,
    pub menu: MenuTheme,
    pub summary: SummaryTheme,
    pub error: ErrorTheme,
    pub default_style: Style,
    pub input_prefix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            prompt: PromptTheme::default(),
            inline: InlineTheme::default(),
            menu: MenuTheme::default(),
            summary: SummaryTheme::default(),
            error: ErrorTheme::default(),
            default_style: Style::new().dim(),
            input_prefix: "›".into(),
        }
    }
}

impl Theme {
    /// A theme with no attributes at all, for tests and dumb terminals.
    pub fn plain() -> Self {
        Self {
            prompt: PromptTheme {
                prefix: "? ".into(),
                prefix_style: Style::new(),
                text_style: Style::new(),
                help_style: Style::new(),
            },
            inline: InlineTheme {
                selected_icon: "*".into(),
                unselected_icon: " ".into(),
                separator: " / ".into(),
                selected_style: Style::new(),
                unselected_style: Style::new(),
            },
            menu: MenuTheme {
                caret_icon: "> ".into(),
                caret_style: Style::new(),
                bullet_selected_icon: "[x] ".into(),
                bullet_unselected_icon: "[ ] ".into(),
                bullet_selected_style: Style::new(),
                bullet_unselected_style: Style::new(),
                text_selected_style: Style::new(),
                text_unselected_style: Style::new(),
                instruction_single: String::new(),
                instruction_multi: String::new(),
                instruction_style: Style::new(),
            },
            summary: SummaryTheme {
                prefix: "  -> ".into(),
                selected_style: Style::new(),
                dim_style: Style::new(),
            },
            error: ErrorTheme {
                label: "Error:".into(),
                style: Style::new(),
            },
            default_style: Style::new(),
            input_prefix: ">".into(),
        }
    }
}
