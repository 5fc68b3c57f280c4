//! Top-level error taxonomy and exit codes.

use thiserror::Error;
use wavchain_audio::AudioError;
use wavchain_spec::ConfigError;

/// Result type for pipeline operations.
pub type ProcessorResult<T> = Result<T, ProcessorError>;

/// Errors reported by the `wavchain` pipeline.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Missing or malformed arguments, or an out-of-range input index.
    #[error("{message}")]
    Argument {
        /// Error message.
        message: String,
    },

    /// Configuration file could not be read or is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// WAV, stream or transform failure.
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Failure categories, one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File cannot be opened, read or written.
    Io,
    /// WAV header outside the supported format.
    Format,
    /// Bad command line or input index.
    Argument,
    /// Configuration file missing or malformed.
    Config,
    /// A transform rejected its parameters or could not run.
    Parameter,
    /// Name not in the transform registry.
    UnknownTransform,
    /// Exhausted read or broken sink.
    Stream,
    /// Anything else.
    Other,
}

impl ErrorKind {
    /// Process exit code for this category.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Other => 1,
            ErrorKind::Io => 2,
            ErrorKind::Format => 3,
            ErrorKind::Argument => 4,
            ErrorKind::Config => 5,
            ErrorKind::Parameter | ErrorKind::UnknownTransform => 6,
            ErrorKind::Stream => 7,
        }
    }
}

impl ProcessorError {
    /// Creates an argument error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessorError::Argument { .. } => ErrorKind::Argument,
            ProcessorError::Config(_) => ErrorKind::Config,
            ProcessorError::Audio(err) => match err {
                AudioError::File { .. } | AudioError::Io(_) => ErrorKind::Io,
                AudioError::Format { .. } => ErrorKind::Format,
                AudioError::Stream { .. } => ErrorKind::Stream,
                AudioError::InvalidParameter { .. } | AudioError::Transform { .. } => {
                    ErrorKind::Parameter
                }
                AudioError::UnknownTransform { .. } => ErrorKind::UnknownTransform,
            },
        }
    }

    /// Returns the process exit code.
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            ProcessorError::Argument { .. } => "ARGUMENT_001",
            ProcessorError::Config(err) => err.code(),
            ProcessorError::Audio(err) => err.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn io_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "not found")
    }

    #[test]
    fn test_exit_codes() {
        let cases: Vec<(ProcessorError, u8)> = vec![
            (
                AudioError::File {
                    path: PathBuf::from("in.wav"),
                    source: io_error(),
                }
                .into(),
                2,
            ),
            (AudioError::Io(io_error()).into(), 2),
            (AudioError::format("stereo").into(), 3),
            (ProcessorError::argument("invalid file index: $3"), 4),
            (
                ConfigError::Open {
                    path: PathBuf::from("chain.txt"),
                    source: io_error(),
                }
                .into(),
                5,
            ),
            (AudioError::invalid_param("volume", "bad factor").into(), 6),
            (AudioError::transform("mix", "no stream attached").into(), 6),
            (
                AudioError::UnknownTransform {
                    name: "reverb".to_string(),
                }
                .into(),
                6,
            ),
            (AudioError::stream("no more samples").into(), 7),
        ];

        for (err, expected) in cases {
            assert_eq!(err.exit_code(), expected, "{}", err);
        }
        assert_eq!(ErrorKind::Other.exit_code(), 1);
    }

    #[test]
    fn test_transparent_messages() {
        let err: ProcessorError = AudioError::UnknownTransform {
            name: "reverb".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "unknown converter: reverb");
        assert_eq!(err.kind(), ErrorKind::UnknownTransform);
    }

    #[test]
    fn test_codes_delegate() {
        let err: ProcessorError = AudioError::format("stereo").into();
        assert_eq!(err.code(), AudioError::format("x").code());
        assert_eq!(ProcessorError::argument("x").code(), "ARGUMENT_001");
    }
}
