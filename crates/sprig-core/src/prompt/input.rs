//! Terminal I/O seam for the prompt engine
//!
//! Every strategy renders through a single `PromptIo` handle created once per
//! run. The real implementation wraps `console::Term`; tests substitute a
//! scripted handle that feeds synthetic key and line events and records what
//! would have been drawn.

use crate::error::PromptError;
use console::{Key, Term};
use std::io::{self, IsTerminal};

/// True only when both stdin and stdout are attached to an interactive
/// terminal. Evaluated fresh on every call; all strategies branch on this
/// single source of truth.
pub fn supports_live_interaction() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Rendering and input handle threaded through every prompt strategy.
pub trait PromptIo {
    /// Whether full-screen keyboard-driven rendering is available.
    fn live(&self) -> bool;

    /// Block for the next key event (live mode only).
    fn read_key(&mut self) -> io::Result<Key>;

    /// Read one line of buffered input.
    fn read_line(&mut self) -> io::Result<String>;

    /// Read one line with an editable pre-filled initial value.
    fn read_line_initial(&mut self, initial: &str) -> io::Result<String>;

    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Write without a trailing newline (input prefixes).
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn clear_last_lines(&mut self, n: usize) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;
}

/// Map a key read to the engine's error model. Ctrl-C surfaces from
/// `console` as an interrupted read.
pub(crate) fn next_key(io: &mut dyn PromptIo) -> Result<Key, PromptError> {
    match io.read_key() {
        Ok(key) => Ok(key),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(PromptError::Aborted),
        Err(err) => Err(err.into()),
    }
}

/// Real terminal handle over stdout.
pub struct TermIo {
    term: Term,
}

impl TermIo {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermIo {
    fn default() -> Self {
        Self::stdout()
    }
}

impl PromptIo for TermIo {
    fn live(&self) -> bool {
        supports_live_interaction()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.term.read_key()
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.term.read_line()
    }

    fn read_line_initial(&mut self, initial: &str) -> io::Result<String> {
        self.term.read_line_initial_text(initial)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    fn clear_last_lines(&mut self, n: usize) -> io::Result<()> {
        self.term.clear_last_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.term.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.term.show_cursor()
    }
}

/// Scripted handle for tests: a fixed key/line script in, a transcript of
/// rendered lines out. Read lines are echoed into the transcript the way a
/// terminal would echo typed input, so `clear_last_lines` stays symmetric
/// with the real implementation.
#[cfg(test)]
pub(crate) struct ScriptedIo {
    live: bool,
    keys: std::collections::VecDeque<Key>,
    lines: std::collections::VecDeque<String>,
    partial: String,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedIo {
    /// Live-mode script driven by key events.
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            live: true,
            keys: keys.into_iter().collect(),
            lines: std::collections::VecDeque::new(),
            partial: String::new(),
            transcript: Vec::new(),
        }
    }

    /// Fallback-mode script driven by whole input lines.
    pub fn lines(lines: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            live: false,
            keys: std::collections::VecDeque::new(),
            lines: lines.into_iter().map(str::to_string).collect(),
            partial: String::new(),
            transcript: Vec::new(),
        }
    }

    /// Live-mode script that also answers line reads (free-text prompts).
    pub fn live_lines(lines: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            live: true,
            ..Self::lines(lines)
        }
    }

    pub fn rendered(&self) -> String {
        self.transcript.join("\n")
    }
}

#[cfg(test)]
impl PromptIo for ScriptedIo {
    fn live(&self) -> bool {
        self.live
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }

    fn read_line(&mut self) -> io::Result<String> {
        let line = self
            .lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "line script exhausted"))?;
        let echoed = format!("{}{}", std::mem::take(&mut self.partial), line);
        self.transcript.push(echoed);
        Ok(line)
    }

    fn read_line_initial(&mut self, _initial: &str) -> io::Result<String> {
        self.read_line()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let full = format!("{}{}", std::mem::take(&mut self.partial), line);
        self.transcript.push(full);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.partial.push_str(text);
        Ok(())
    }

    fn clear_last_lines(&mut self, n: usize) -> io::Result<()> {
        for _ in 0..n {
            self.transcript.pop();
        }
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        Ok(())
    }
}
