//! wavchain audio core.
//!
//! This crate implements the building blocks of the wavchain pipeline:
//!
//! - [`wav`] - Mono 16-bit PCM WAV header codec and file access
//! - [`stream`] - Readable and writable 16-bit sample streams
//! - [`effects`] - The [`Transform`] trait and the built-in transforms
//!   (`mute`, `volume`, `echo`, `mix`)
//! - [`registry`] - Name to constructor lookup used by configuration files
//!
//! # Example
//!
//! ```
//! use wavchain_audio::stream::{SampleReader, SampleSource, SampleWriter};
//! use wavchain_audio::{Transform, TransformRegistry};
//!
//! let registry = TransformRegistry::builtin();
//! let mut volume = registry.create("volume").unwrap();
//! volume.set_parameters(&["2.0".to_string()]).unwrap();
//!
//! let mut input = SampleReader::from_samples(&[1000, 10000, 25000]);
//! let mut output = SampleWriter::in_memory();
//! volume.process(&mut input, &mut output).unwrap();
//!
//! let mut doubled = SampleReader::from_buffer(output.into_inner());
//! assert_eq!(doubled.read_sample().unwrap(), 2000);
//! ```

pub mod effects;
pub mod error;
pub mod registry;
pub mod stream;
pub mod wav;

// Re-export main types at crate root
pub use effects::{clamp_i16, Transform};
pub use error::{AudioError, AudioResult};
pub use registry::{TransformInfo, TransformRegistry};
pub use stream::{SampleReader, SampleSink, SampleSource, SampleWriter, StreamInfo};
pub use wav::{WavHeader, WavInput, WavOutput, SUPPORTED_SAMPLE_RATE};
