//! `kroki version` command implementation.

use std::io::Write;

use crate::error::CliError;

/// Print `<name> <version> <commit> [https://kroki.io]`.
pub(crate) fn execute(out: &mut impl Write, version: &str, commit: &str) -> Result<(), CliError> {
    writeln!(out, "kroki {version} {commit} [https://kroki.io]")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_version_line() {
        let mut out = Vec::new();
        execute(&mut out, "0.6.0", "abc1234").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "kroki 0.6.0 abc1234 [https://kroki.io]\n"
        );
    }
}
