//! Sample-by-sample transforms.
//!
//! Every transform validates its parameters eagerly in
//! [`Transform::set_parameters`] and then streams from an input
//! [`SampleSource`] to an output [`SampleSink`] in [`Transform::process`],
//! draining the input completely.

pub mod echo;
pub mod mix;
pub mod mute;
mod params;
pub mod volume;

pub use echo::Echo;
pub use mix::Mix;
pub use mute::Mute;
pub use volume::Volume;

use crate::error::{AudioError, AudioResult};
use crate::stream::{SampleSink, SampleSource};
use crate::wav::SUPPORTED_SAMPLE_RATE;

/// A named, parameterized sample transform.
pub trait Transform {
    /// Name used in configuration files.
    fn name(&self) -> &'static str;

    /// One-line description for help output.
    fn description(&self) -> &'static str;

    /// Parameter syntax for help output.
    fn usage(&self) -> &'static str;

    /// Validates and stores parameters (stream references already removed).
    fn set_parameters(&mut self, params: &[String]) -> AudioResult<()>;

    /// Whether the transform consumes a secondary stream.
    fn accepts_stream(&self) -> bool {
        false
    }

    /// Attaches a secondary stream.
    fn attach_stream(&mut self, _stream: Box<dyn SampleSource>) -> AudioResult<()> {
        Err(AudioError::transform(
            self.name(),
            "does not accept a secondary stream",
        ))
    }

    /// Streams every sample of `input` through the transform into `output`.
    fn process(
        &mut self,
        input: &mut dyn SampleSource,
        output: &mut dyn SampleSink,
    ) -> AudioResult<()>;
}

/// Narrows a 32-bit accumulator to a sample, saturating at the i16 range.
pub fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Converts a non-negative time in seconds to a sample index (floor).
pub fn seconds_to_samples(seconds: f64) -> u64 {
    (seconds * f64::from(SUPPORTED_SAMPLE_RATE)).floor() as u64
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::stream::{SampleReader, SampleWriter, StreamInfo};

    use super::Transform;

    /// Runs `transform` over `samples` and returns the output samples.
    pub fn run(transform: &mut dyn Transform, samples: &[i16]) -> Vec<i16> {
        let mut input = SampleReader::from_samples(samples);
        let mut output = SampleWriter::in_memory();
        transform.process(&mut input, &mut output).unwrap();
        assert!(!input.has_more(), "input must be drained");
        collect(output)
    }

    pub fn collect(output: SampleWriter<Vec<u8>>) -> Vec<i16> {
        output
            .into_inner()
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect()
    }

    pub fn params(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_i16() {
        assert_eq!(clamp_i16(0), 0);
        assert_eq!(clamp_i16(32767), 32767);
        assert_eq!(clamp_i16(32768), 32767);
        assert_eq!(clamp_i16(-32768), -32768);
        assert_eq!(clamp_i16(-40000), -32768);
        assert_eq!(clamp_i16(i32::MAX), 32767);
    }

    #[test]
    fn test_seconds_to_samples() {
        assert_eq!(seconds_to_samples(0.0), 0);
        assert_eq!(seconds_to_samples(1.0), 44100);
        assert_eq!(seconds_to_samples(0.5), 22050);
        assert_eq!(seconds_to_samples(2.00001), 88200);
    }
}
