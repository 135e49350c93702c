//! Line-based terminal surface
//!
//! Generic over the reader and writer so the menu can be driven from a
//! script in tests and from stdin/stdout in the binary.

use anyhow::{Context, Result};
use std::fmt;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use crate::validate;

/// Input ended while a prompt was waiting for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("input closed")
    }
}

impl std::error::Error for InputClosed {}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to terminal")?;
        Ok(())
    }

    /// Print a prompt and read one line, without the trailing newline.
    ///
    /// Fails with [`InputClosed`] at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).context("Failed to write to terminal")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Err(InputClosed.into());
        }

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Ask until a non-blank answer is given; returns it trimmed.
    pub fn required(&mut self, prompt: &str) -> Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            match validate::non_empty(&answer) {
                Some(value) => return Ok(value.to_string()),
                None => self.say("This field is required. Please enter a value.")?,
            }
        }
    }

    /// Ask once; blank answers are accepted as an empty string.
    pub fn optional(&mut self, prompt: &str) -> Result<String> {
        Ok(self.ask(prompt)?.trim().to_string())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
