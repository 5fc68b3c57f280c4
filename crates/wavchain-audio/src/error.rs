//! Error types for the audio core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding, streaming or transforming audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// A file could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    File {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV header violates the supported format constraints.
    #[error("unsupported WAV format: {message}")]
    Format {
        /// Error message.
        message: String,
    },

    /// Sample stream misuse or failure (exhausted read, broken sink).
    #[error("audio stream error: {message}")]
    Stream {
        /// Error message.
        message: String,
    },

    /// Invalid transform parameter.
    #[error("invalid parameter for '{transform}': {message}")]
    InvalidParameter {
        /// Transform name.
        transform: String,
        /// Error message.
        message: String,
    },

    /// Transform cannot run in its current state.
    #[error("{transform}: {message}")]
    Transform {
        /// Transform name.
        transform: String,
        /// Error message.
        message: String,
    },

    /// No transform registered under the requested name.
    #[error("unknown converter: {name}")]
    UnknownTransform {
        /// Requested name.
        name: String,
    },
}

impl AudioError {
    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates a stream error.
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(transform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            transform: transform.into(),
            message: message.into(),
        }
    }

    /// Creates a transform state error.
    pub fn transform(transform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transform {
            transform: transform.into(),
            message: message.into(),
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::File { .. } => "AUDIO_001",
            AudioError::Io(_) => "AUDIO_002",
            AudioError::Format { .. } => "AUDIO_003",
            AudioError::Stream { .. } => "AUDIO_004",
            AudioError::InvalidParameter { .. } => "AUDIO_005",
            AudioError::Transform { .. } => "AUDIO_006",
            AudioError::UnknownTransform { .. } => "AUDIO_007",
        }
    }
}
