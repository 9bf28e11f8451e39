//! Reading diagram sources from files or standard input.

use std::io::Read;
use std::path::Path;

use kroki_formats::STDIO;

use crate::error::CliError;

/// Read the whole source named by `path`, taking `-` to mean `stdin`.
pub(crate) fn read_source(path: &str, mut stdin: impl Read) -> Result<String, CliError> {
    let read_error = |source| CliError::ReadInput {
        path: Path::new(path).to_path_buf(),
        source,
    };

    if path == STDIO {
        let mut source = String::new();
        stdin.read_to_string(&mut source).map_err(read_error)?;
        return Ok(source);
    }

    std::fs::read_to_string(path).map_err(read_error)
}
