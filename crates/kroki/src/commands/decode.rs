//! `kroki decode` command implementation.

use std::io::{self, Read, Write};

use clap::Args;
use kroki_formats::STDIO;

use crate::error::CliError;
use crate::input;

/// Arguments for the decode command.
#[derive(Args)]
pub(crate) struct DecodeArgs {
    /// Encoded payload or diagram URL, or `-` to read from standard input.
    input: String,
}

impl DecodeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        self.run(io::stdin().lock(), &mut io::stdout().lock())
    }

    fn run(&self, stdin: impl Read, stdout: &mut impl Write) -> Result<(), CliError> {
        let encoded = if self.input == STDIO {
            input::read_source(STDIO, stdin)?
        } else {
            self.input.clone()
        };

        // Payloads pasted from mail or terminals are often wrapped across lines.
        let compact: String = encoded.split_ascii_whitespace().collect();
        let source = kroki_payload::decode(&compact)?;
        writeln!(stdout, "{source}")?;
        Ok(())
    }
}
