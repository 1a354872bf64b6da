// src/ports/confirm.rs
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Blocking yes/no question put to the user.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Answers every prompt with "yes" (`--yes` on the command line).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm(&mut self, message: &str) -> bool {
        debug!(message, "Confirmation assumed");
        true
    }
}

/// Asks on a terminal: the question goes to `output`, one line is read from `input`.
///
/// Only `y` or `yes` (any case) count as consent; anything else, including a
/// read failure or end of input, declines.
pub struct LinePrompt<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> LinePrompt<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<I: BufRead, O: Write> ConfirmPrompt for LinePrompt<I, O> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{} [y/N] ", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                debug!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}
