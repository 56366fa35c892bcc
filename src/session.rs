//! Interactive validation session.
//!
//! A [`Session`] reads card numbers line by line, validates each one and
//! reports the issuing bank. It has two states: it starts in
//! [`SessionState::Reading`] and moves to [`SessionState::Terminated`] on an
//! empty line or at end of input. Every other outcome (bad format, including
//! bytes that are not UTF-8, failed checksum, unknown bank) is reported and
//! the session keeps reading.
//!
//! # Example
//!
//! ```
//! use bank_card_validator::directory::BankDirectory;
//! use bank_card_validator::session::Session;
//!
//! let directory = BankDirectory::parse("TestBank,453200,453299\n").unwrap();
//! let input = "4532015112830366\n1234567890123456\n\n";
//! let mut output = Vec::new();
//!
//! let stats = Session::new(&directory).run(input.as_bytes(), &mut output).unwrap();
//! assert_eq!(stats.identified, 1);
//! assert_eq!(stats.checksum_errors, 1);
//!
//! let printed = String::from_utf8(output).unwrap();
//! assert!(printed.contains("Bank: TestBank"));
//! ```

use crate::card::CardDigits;
use crate::directory::{BankLookup, UNKNOWN_BANK};
use crate::error::ValidationError;
use crate::mask::mask_input;
use crate::validate::check;
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// How session results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Prompts and human-readable messages.
    #[default]
    Text,
    /// One JSON object per line, no prompts.
    Json,
}

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next line.
    Reading,
    /// Finished; further lines are ignored.
    Terminated,
}

/// A card number that passed validation, with its issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// The 6-digit BIN.
    pub bin: u32,
    /// Issuing bank, or [`crate::directory::UNKNOWN_BANK`].
    pub bank: String,
    /// The card number with only BIN and last four digits visible.
    pub masked: String,
}

/// Result of processing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session ended.
    Terminated,
    /// The line failed format or checksum validation.
    Rejected(ValidationError),
    /// The card number is valid and was looked up.
    Identified(Identification),
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Non-empty lines processed.
    pub processed: usize,
    /// Lines that passed validation.
    pub identified: usize,
    /// Valid lines whose BIN matched no range.
    pub unknown_bank: usize,
    /// Lines rejected for length or characters.
    pub format_errors: usize,
    /// Lines rejected by the Luhn check.
    pub checksum_errors: usize,
}

/// Interactive validation loop over a read-only bank directory.
#[derive(Debug)]
pub struct Session<'d, D: BankLookup + ?Sized> {
    directory: &'d D,
    format: OutputFormat,
    state: SessionState,
    stats: SessionStats,
}

impl<'d, D: BankLookup + ?Sized> Session<'d, D> {
    /// Creates a session in the `Reading` state with text output.
    pub fn new(directory: &'d D) -> Self {
        Self {
            directory,
            format: OutputFormat::Text,
            state: SessionState::Reading,
            stats: SessionStats::default(),
        }
    }

    /// Sets the output format used by [`Session::run`].
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Counters so far.
    #[inline]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Processes one input line.
    ///
    /// An empty line (after trimming) terminates the session. Once
    /// terminated, every call returns [`Outcome::Terminated`] without
    /// looking at the line.
    pub fn process_line(&mut self, line: &str) -> Outcome {
        if self.state == SessionState::Terminated {
            return Outcome::Terminated;
        }

        let input = line.trim();
        if input.is_empty() {
            self.state = SessionState::Terminated;
            return Outcome::Terminated;
        }

        self.stats.processed += 1;
        match check(input) {
            Ok(card) => Outcome::Identified(self.identify(&card)),
            Err(error) => {
                if error.is_format_error() {
                    self.stats.format_errors += 1;
                } else {
                    self.stats.checksum_errors += 1;
                }
                tracing::debug!(input = %mask_input(input), %error, "card number rejected");
                Outcome::Rejected(error)
            }
        }
    }

    fn identify(&mut self, card: &CardDigits) -> Identification {
        let bin = card.bin();
        let bank = match self.directory.find(bin) {
            Some(range) => range.name().to_string(),
            None => {
                self.stats.unknown_bank += 1;
                UNKNOWN_BANK.to_string()
            }
        };
        self.stats.identified += 1;

        tracing::debug!(bin, card = %card, bank = %bank, "card number identified");
        Identification {
            bin,
            bank,
            masked: card.masked_with_bin(),
        }
    }

    /// Runs the loop until the session terminates.
    ///
    /// End of input ends the session like an empty line does, and so does a
    /// failed read. A line that is not valid UTF-8 is decoded lossily and
    /// rejected as a format error. Only write errors are returned.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> io::Result<SessionStats> {
        if self.format == OutputFormat::Text {
            writeln!(output, "Card validation. Enter an empty line to finish.")?;
        }

        let mut line = Vec::new();
        while self.state == SessionState::Reading {
            if self.format == OutputFormat::Text {
                write!(output, "Enter card number: ")?;
                output.flush()?;
            }

            line.clear();
            let outcome = match input.read_until(b'\n', &mut line) {
                Ok(0) => {
                    tracing::debug!("end of input");
                    self.terminate()
                }
                Ok(_) => self.process_line(&String::from_utf8_lossy(&line)),
                Err(error) => {
                    tracing::warn!(%error, "cannot read input line; ending session");
                    self.terminate()
                }
            };

            self.render(&outcome, &mut output)?;
        }

        output.flush()?;
        tracing::info!(
            processed = self.stats.processed,
            identified = self.stats.identified,
            format_errors = self.stats.format_errors,
            checksum_errors = self.stats.checksum_errors,
            "session finished"
        );
        Ok(self.stats)
    }

    fn terminate(&mut self) -> Outcome {
        self.state = SessionState::Terminated;
        Outcome::Terminated
    }

    fn render<W: Write>(&self, outcome: &Outcome, output: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => render_text(outcome, output),
            OutputFormat::Json => {
                serde_json::to_writer(&mut *output, &JsonRecord::new(outcome, &self.stats))?;
                writeln!(output)
            }
        }
    }
}

fn render_text<W: Write>(outcome: &Outcome, output: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::Terminated => writeln!(output, "Session finished."),
        Outcome::Rejected(error) if error.is_format_error() => {
            writeln!(output, "Format error: {}", error)
        }
        Outcome::Rejected(error) => writeln!(output, "Invalid card number: {}", error),
        Outcome::Identified(found) => {
            writeln!(output, "Card {} is valid.", found.masked)?;
            writeln!(output, "Bank: {}", found.bank)
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonRecord<'a> {
    Identified {
        bin: String,
        bank: &'a str,
        card: &'a str,
    },
    FormatError {
        error: String,
    },
    ChecksumError {
        error: String,
    },
    Finished {
        #[serde(flatten)]
        stats: &'a SessionStats,
    },
}

impl<'a> JsonRecord<'a> {
    fn new(outcome: &'a Outcome, stats: &'a SessionStats) -> Self {
        match outcome {
            Outcome::Terminated => Self::Finished { stats },
            Outcome::Rejected(error) if error.is_format_error() => Self::FormatError {
                error: error.to_string(),
            },
            Outcome::Rejected(error) => Self::ChecksumError {
                error: error.to_string(),
            },
            Outcome::Identified(found) => Self::Identified {
                bin: format!("{:06}", found.bin),
                bank: &found.bank,
                card: &found.masked,
            },
        }
    }
}
