//! wavchain configuration language.
//!
//! A configuration file describes an ordered chain of transforms, one per
//! line:
//!
//! ```text
//! # silence the intro
//! mute 0 10
//! volume 1.5
//! mix $2 5
//! ```
//!
//! Lines are trimmed; blank lines and lines starting with `#` are skipped.
//! The first whitespace-separated token names the transform, the remaining
//! tokens are kept verbatim as parameters. Tokens of the form `$<digits>` are
//! stream references naming an input file by 1-based position.
//!
//! # Example
//!
//! ```
//! use wavchain_spec::parse_config_str;
//!
//! let commands = parse_config_str("mute 0 1\nvolume 2.0\n", "inline").unwrap();
//! assert_eq!(commands.len(), 2);
//! assert_eq!(commands[0].name(), "mute");
//! assert_eq!(commands[1].params(), ["2.0"]);
//! ```

pub mod command;
pub mod config;
pub mod error;

pub use command::{is_integer, is_number, ConverterCommand, StreamRef};
pub use config::{parse_config, parse_config_str};
pub use error::{ConfigError, SpecResult};
