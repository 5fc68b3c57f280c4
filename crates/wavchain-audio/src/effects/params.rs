//! Parameter token parsing shared by the transforms.

use tracing::warn;

use crate::error::{AudioError, AudioResult};

/// Parses a finite decimal number.
pub(crate) fn parse_number(transform: &str, what: &str, token: &str) -> AudioResult<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AudioError::invalid_param(
            transform,
            format!("{} must be a number, got '{}'", what, token),
        )),
    }
}

/// Parses a signed integer.
pub(crate) fn parse_integer(transform: &str, what: &str, token: &str) -> AudioResult<i64> {
    token.parse::<i64>().map_err(|_| {
        AudioError::invalid_param(
            transform,
            format!("{} must be an integer, got '{}'", what, token),
        )
    })
}

/// Fails unless at least `required` parameters are present.
pub(crate) fn require(
    transform: &str,
    params: &[String],
    required: usize,
    usage: &str,
) -> AudioResult<()> {
    if params.len() < required {
        return Err(AudioError::invalid_param(
            transform,
            format!(
                "expected at least {} parameter(s), got {}; usage: {}",
                required,
                params.len(),
                usage.lines().next().unwrap_or(transform)
            ),
        ));
    }
    Ok(())
}

/// Logs parameters beyond the ones the transform understands.
pub(crate) fn warn_surplus(transform: &str, params: &[String], accepted: usize) {
    if params.len() > accepted {
        warn!(
            transform,
            ignored = ?&params[accepted..],
            "ignoring surplus parameters"
        );
    }
}
