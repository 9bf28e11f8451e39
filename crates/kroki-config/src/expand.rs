//! `${VAR}` expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of `VAR` and fails if it is unset
//! - `${VAR:-default}` falls back to `default` when `VAR` is unset
//!
//! Bare `$VAR` is left untouched, also next to a `${VAR}` reference, so
//! endpoints containing `$` keep working.

use crate::ConfigError;

/// Expand `${VAR}` references in `value` from the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

/// Expand `${VAR}` references in `value`, resolving names with `lookup`.
///
/// Only `${...}` spans are handed to shellexpand; text outside them,
/// including bare `$name`, is copied through verbatim. `field` names the
/// configuration key in error messages.
pub(crate) fn expand_with(
    value: &str,
    field: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(&rest[start..end], field, &lookup)?);
        rest = &rest[end..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${VAR}` or `${VAR:-default}` reference.
fn expand_reference(
    reference: &str,
    field: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| {
        lookup(name)
            .map(Some)
            .ok_or_else(|| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.0),
    })
}

/// Variable referenced without a default and missing from the environment.
struct UnsetVar(String);
