//! # Dialogs
//!
//! The page's blocking browser dialogs behind a trait, so commands can ask
//! the user without knowing who answers.
//!
//! ```text
//!   delete_product ──► dialogs.confirm("Are you sure ...?") ──► true / false
//!   rename_category ─► dialogs.prompt("Edit category:", "Grains") ─► Some / None
//!   submit_product ──► dialogs.alert("Product added successfully.")
//! ```
//!
//! [`TerminalDialogs`] answers from a terminal (or any line reader);
//! [`ScriptedDialogs`] answers from a prepared script.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Blocking user dialogs.
pub trait Dialogs {
    /// Shows a message. Returns when dismissed.
    fn alert(&mut self, message: &str);

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Asks for text, pre-filled with `default`. `None` when dismissed.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
}

/// Dialogs answered from a prepared script.
///
/// Confirms and prompts pop their answers in order. An exhausted script
/// answers like a dismissed dialog: `false` / `None`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDialogs {
    confirms: VecDeque<bool>,
    prompts: VecDeque<Option<String>>,
    alerts: Vec<String>,
    questions: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer to the next `confirm`.
    pub fn answer_confirm(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queues the answer to the next `prompt`.
    pub fn answer_prompt(mut self, answer: Option<&str>) -> Self {
        self.prompts.push_back(answer.map(str::to_string));
        self
    }

    /// Messages shown through `alert`, in order.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Messages of every `confirm` and `prompt` asked, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&mut self, message: &str) {
        debug!(text = %message, "alert");
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        let answer = self.confirms.pop_front().unwrap_or(false);
        debug!(text = %message, answer, "confirm");
        answer
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        self.questions.push(message.to_string());
        let answer = self.prompts.pop_front().flatten();
        debug!(text = %message, default = %default, answered = answer.is_some(), "prompt");
        answer
    }
}

/// Dialogs on a line-oriented terminal.
///
/// ```text
///   alert   "Product added successfully."
///   confirm "Are you sure you want to delete this product? [y/N] "  y⏎ → true
///   prompt  "Edit category: [Grains] "                               ⏎ → "Grains"
/// ```
/// End of input dismisses: `confirm` answers `false`, `prompt` answers `None`.
/// An empty prompt answer keeps the pre-filled value.
#[derive(Debug)]
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalDialogs { input, output }
    }

    /// Prints `prompt` and reads one line without its line ending.
    /// `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prints `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Releases the reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        self.read_line(question).unwrap_or_else(|e| {
            warn!(error = %e, "Terminal unavailable, treating dialog as dismissed");
            None
        })
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn alert(&mut self, message: &str) {
        debug!(text = %message, "alert");
        if let Err(e) = self.say(message) {
            warn!(error = %e, "Failed to show alert");
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        let answer = self
            .ask(&format!("{} [y/N] ", message))
            .map(|line| matches!(line.trim(), "y" | "Y" | "yes" | "Yes" | "YES"))
            .unwrap_or(false);
        debug!(text = %message, answer, "confirm");
        answer
    }

    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self
            .ask(&format!("{} [{}] ", message, default))
            .map(|line| if line.is_empty() { default.to_string() } else { line });
        debug!(text = %message, answered = answer.is_some(), "prompt");
        answer
    }
}
