//! `kroki encode` command implementation.

use std::io::{self, Read, Write};

use clap::Args;

use crate::error::CliError;
use crate::input;

/// Arguments for the encode command.
#[derive(Args)]
pub(crate) struct EncodeArgs {
    /// Diagram source file, or `-` to read from standard input.
    input: String,
}

impl EncodeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        self.run(io::stdin().lock(), &mut io::stdout().lock())
    }

    fn run(&self, stdin: impl Read, stdout: &mut impl Write) -> Result<(), CliError> {
        let source = input::read_source(&self.input, stdin)?;
        let payload = kroki_payload::encode(&source)?;
        writeln!(stdout, "{payload}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const GOLDEN_PAYLOAD: &str = "eNpKyUwvSizIUHBXqPZIzcnJ17ULzy_KSakFBAAA__9sQAjG";

    fn encode(input: &str, stdin: &[u8]) -> Result<String, CliError> {
        let args = EncodeArgs {
            input: input.to_owned(),
        };
        let mut stdout = Vec::new();
        args.run(stdin, &mut stdout)?;
        Ok(String::from_utf8(stdout).unwrap())
    }

    #[test]
    fn test_encode_stdin() {
        let output = encode("-", b"digraph G {Hello->World}").unwrap();
        assert_eq!(output, format!("{GOLDEN_PAYLOAD}\n"));
    }

    #[test]
    fn test_encode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.dot");
        std::fs::write(&path, "digraph G {Hello->World}").unwrap();

        let output = encode(path.to_str().unwrap(), b"").unwrap();
        assert_eq!(output, format!("{GOLDEN_PAYLOAD}\n"));
    }

    #[test]
    fn test_encode_missing_file() {
        let err = encode("/nonexistent/hello.dot", b"").unwrap_err();
        assert!(matches!(err, CliError::ReadInput { .. }), "got {err:?}");
    }
}
