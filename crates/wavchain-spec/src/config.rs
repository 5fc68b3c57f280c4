//! Line-oriented configuration reader.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::command::ConverterCommand;
use crate::error::{ConfigError, SpecResult};

/// Reads and parses a configuration file.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// The ordered list of commands, or `ConfigError::Open` if the file cannot be read
pub fn parse_config(path: &Path) -> SpecResult<Vec<ConverterCommand>> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // Invalid UTF-8 sequences become U+FFFD.
    let text = String::from_utf8_lossy(&bytes);
    parse_config_str(&text, &path.display().to_string())
}

/// Parses configuration text.
///
/// No semantic validation of parameters happens here; each transform checks
/// its own parameters when the pipeline is built.
///
/// # Arguments
/// * `text` - Configuration text
/// * `origin` - Label used in error messages (usually the file name)
pub fn parse_config_str(text: &str, origin: &str) -> SpecResult<Vec<ConverterCommand>> {
    let mut commands = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace().map(str::to_string);
        let Some(name) = tokens.next() else {
            continue;
        };
        let command = ConverterCommand::new(name, tokens.collect()).at_line(idx + 1);
        debug!(origin, line = idx + 1, command = %command, "parsed config command");
        commands.push(command);
    }

    for command in &commands {
        if command.name().is_empty() {
            return Err(ConfigError::EmptyName {
                origin: origin.to_string(),
                line: command.line(),
            });
        }
    }

    debug!(origin, count = commands.len(), "configuration loaded");
    Ok(commands)
}
