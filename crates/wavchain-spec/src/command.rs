//! Converter commands and parameter token classification.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Regex pattern for a stream reference token.
///
/// Pattern: `$` followed by one or more ASCII digits, nothing else.
const STREAM_REF_PATTERN: &str = r"^\$([0-9]+)$";

static STREAM_REF_REGEX: OnceLock<Regex> = OnceLock::new();

fn stream_ref_regex() -> &'static Regex {
    STREAM_REF_REGEX.get_or_init(|| Regex::new(STREAM_REF_PATTERN).expect("invalid regex pattern"))
}

/// One command taken verbatim from a configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    name: String,
    params: Vec<String>,
    line: usize,
}

impl ConverterCommand {
    /// Creates a command with the given name and parameters.
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
            line: 0,
        }
    }

    /// Records the 1-based configuration line this command came from.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Returns the transform name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw parameter tokens in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Returns the number of parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns the source line (0 when built programmatically).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Iterates over the stream references among the parameters.
    pub fn stream_refs(&self) -> impl Iterator<Item = StreamRef> + '_ {
        self.params.iter().filter_map(|p| StreamRef::parse(p))
    }
}

impl fmt::Display for ConverterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        Ok(())
    }
}

/// A `$n` token naming an input file by 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamRef(usize);

impl StreamRef {
    /// The main input (`$1`).
    pub const FIRST: StreamRef = StreamRef(1);

    /// Parses a stream reference token.
    ///
    /// Digit strings too large for `usize` saturate to `usize::MAX`, which is
    /// never a valid input index.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = stream_ref_regex().captures(token)?;
        let digits = caps.get(1)?.as_str();
        Some(Self(digits.parse().unwrap_or(usize::MAX)))
    }

    /// Returns true if `token` is a stream reference.
    pub fn is_stream_ref(token: &str) -> bool {
        stream_ref_regex().is_match(token)
    }

    /// Returns the 1-based input index.
    pub fn index(&self) -> usize {
        self.0
    }

    /// Returns the 0-based slot for an input list of `count` files, or `None`
    /// if the reference is out of range.
    pub fn resolve(&self, count: usize) -> Option<usize> {
        (1..=count).contains(&self.0).then(|| self.0 - 1)
    }
}

impl fmt::Display for StreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Returns true if `token` is a plain signed integer.
pub fn is_integer(token: &str) -> bool {
    token.parse::<i64>().is_ok()
}

/// Returns true if `token` is a finite decimal number.
pub fn is_number(token: &str) -> bool {
    token.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
