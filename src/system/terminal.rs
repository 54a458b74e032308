// src/system/terminal.rs

//! The launcher's only window onto the user.
//!
//! Everything the session prints or asks goes through [`Terminal`], so the state
//! machine can be driven by a real console, piped input, or a script in tests.

use crate::system::transcript::Transcript;
use colored::{Color, Colorize};
use dialoguer::{Input, theme::ColorfulTheme};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Failures while reading input.
#[derive(Error, Debug)]
pub enum TerminalError {
    /// Reading stdin failed.
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),
    /// The interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// How a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Default text.
    Plain,
    /// Section titles.
    Heading,
    /// Completed actions.
    Success,
    /// Non-fatal problems.
    Warning,
    /// Failures.
    Error,
    /// Secondary details.
    Dim,
    /// An environment-specific color taken from its `Color` hint.
    Accent(Color),
}

/// Line-oriented input and styled output.
pub trait Terminal {
    /// Asks for one line. `Ok(None)` means input is exhausted (EOF).
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError>;

    /// Prints one line.
    fn say(&mut self, tone: Tone, text: &str);

    /// Starts a new transcript file, closing the previous one.
    fn start_transcript(&mut self) {}

    /// Closes the transcript, if any.
    fn close(&mut self) {}
}

/// The real console: `dialoguer` prompts when a user is attached, plain stdin otherwise.
#[derive(Debug)]
pub struct ConsoleTerminal {
    transcript: Option<Transcript>,
    interactive: bool,
}

impl ConsoleTerminal {
    /// Wraps stdin/stdout, copying output to `transcript` when given.
    pub fn new(transcript: Option<Transcript>) -> Self {
        Self {
            transcript,
            interactive: dialoguer::console::user_attended(),
        }
    }

    fn record(&mut self, text: &str) {
        if let Some(transcript) = &mut self.transcript {
            transcript.record(text);
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
        let line = if self.interactive {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            Some(input)
        } else {
            print!("{}: ", prompt);
            io::stdout().flush()?;
            let mut buffer = String::new();
            if io::stdin().lock().read_line(&mut buffer)? == 0 {
                None
            } else {
                Some(buffer.trim_end_matches(['\r', '\n']).to_string())
            }
        };

        if let Some(answer) = &line {
            self.record(&format!("{}: {}", prompt, answer));
        }
        Ok(line)
    }

    fn say(&mut self, tone: Tone, text: &str) {
        let styled = match tone {
            Tone::Plain => text.normal(),
            Tone::Heading => text.yellow().bold(),
            Tone::Success => text.green(),
            Tone::Warning => text.yellow(),
            Tone::Error => text.red().bold(),
            Tone::Dim => text.dimmed(),
            Tone::Accent(color) => text.color(color),
        };
        println!("{}", styled);
        self.record(text);
    }

    fn start_transcript(&mut self) {
        if let Some(transcript) = &mut self.transcript {
            transcript.rotate();
        }
    }

    fn close(&mut self) {
        if let Some(transcript) = self.transcript.take() {
            transcript.close();
        }
    }
}
