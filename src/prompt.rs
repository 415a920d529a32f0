// Operator input.
//
// Every question the tool asks goes through a `Prompter`, so the
// re-prompting loops can be driven from a terminal, a pipe or a script.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::{LibraryError, Result};

pub trait Prompter {
    /// Show a line to the operator.
    fn say(&mut self, message: &str);

    /// Ask a question and return the trimmed answer. An empty answer is a
    /// valid answer; callers decide whether to ask again.
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Talks to whoever is on the other end of stdin.
///
/// On a terminal the question is rendered with `dialoguer`. When stdin is a
/// pipe, answers are read one line at a time so sessions can be scripted.
/// Everything the operator sees goes to stderr; stdout is kept for results.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        if self.interactive {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(answer.trim().to_string());
        }

        let mut stderr = io::stderr();
        write!(stderr, "{prompt}: ")?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(LibraryError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

/// Answers from a fixed queue and remembers everything it was told. Once
/// the queue runs dry every question fails with
/// [`LibraryError::InputClosed`].
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Messages and questions in the order they were shown.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or(LibraryError::InputClosed)
    }
}
