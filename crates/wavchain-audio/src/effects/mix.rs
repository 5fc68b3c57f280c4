//! Average the main stream with a secondary stream.

use tracing::{debug, warn};

use super::params::{parse_number, warn_surplus};
use super::{clamp_i16, seconds_to_samples, Transform};
use crate::error::{AudioError, AudioResult};
use crate::stream::{SampleSink, SampleSource, StreamInfo};

const NAME: &str = "mix";

const USAGE: &str = "mix <$n> [insert]
  $n     - input file to mix in (1-based, e.g. $2)
  insert - where the second stream starts (seconds, default: 0)";

/// Mixes a secondary stream into the main one starting at `insert_seconds`.
///
/// Before the insertion point the main stream is copied unchanged; after it
/// each output sample is `(main + secondary) / 2` truncated toward zero. An
/// exhausted secondary stream contributes silence.
#[derive(Default)]
pub struct Mix {
    secondary: Option<Box<dyn SampleSource>>,
    insert_seconds: f64,
}

impl std::fmt::Debug for Mix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mix")
            .field("attached", &self.secondary.is_some())
            .field("insert_seconds", &self.insert_seconds)
            .finish()
    }
}

impl Mix {
    /// Creates a mix of `secondary` starting at `insert_seconds`.
    pub fn new(secondary: Box<dyn SampleSource>, insert_seconds: f64) -> AudioResult<Self> {
        let mut mix = Self {
            secondary: None,
            insert_seconds,
        };
        mix.validate()?;
        mix.attach_stream(secondary)?;
        Ok(mix)
    }

    fn validate(&self) -> AudioResult<()> {
        if self.insert_seconds < 0.0 {
            return Err(AudioError::invalid_param(
                NAME,
                "insert position cannot be negative",
            ));
        }
        Ok(())
    }
}

fn average(main: i16, secondary: i16) -> i16 {
    clamp_i16((i32::from(main) + i32::from(secondary)) / 2)
}

impl Transform for Mix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Mixes (combines) two audio streams by averaging their samples."
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn set_parameters(&mut self, params: &[String]) -> AudioResult<()> {
        warn_surplus(NAME, params, 1);
        self.insert_seconds = match params.first() {
            Some(token) => parse_number(NAME, "insert position", token)?,
            None => 0.0,
        };
        self.validate()
    }

    fn accepts_stream(&self) -> bool {
        true
    }

    fn attach_stream(&mut self, stream: Box<dyn SampleSource>) -> AudioResult<()> {
        if self.secondary.is_some() {
            warn!("mix: replacing previously attached stream");
        }
        self.secondary = Some(stream);
        Ok(())
    }

    fn process(
        &mut self,
        input: &mut dyn SampleSource,
        output: &mut dyn SampleSink,
    ) -> AudioResult<()> {
        let mut secondary = self
            .secondary
            .take()
            .ok_or_else(|| AudioError::transform(NAME, "additional stream is not set"))?;
        let insert = seconds_to_samples(self.insert_seconds);
        debug!(insert, "mix");

        let mut index: u64 = 0;
        while input.has_more() && index < insert {
            output.write_sample(input.read_sample()?)?;
            index += 1;
        }

        while input.has_more() {
            let main = input.read_sample()?;
            let other = if secondary.has_more() {
                secondary.read_sample()?
            } else {
                0
            };
            output.write_sample(average(main, other))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_util::{params, run};
    use crate::stream::SampleReader;
    use pretty_assertions::assert_eq;

    fn secondary(samples: &[i16]) -> Box<dyn SampleSource> {
        Box::new(SampleReader::from_samples(samples))
    }

    #[test]
    fn test_parameters() {
        let mut mix = Mix::default();
        assert!(mix.set_parameters(&[]).is_ok());
        assert!(mix.set_parameters(&params(&["5"])).is_ok());
        assert!(mix.set_parameters(&params(&["0.5"])).is_ok());
        assert!(matches!(
            mix.set_parameters(&params(&["-1"])).unwrap_err(),
            AudioError::InvalidParameter { .. }
        ));
        assert!(mix.set_parameters(&params(&["soon"])).is_err());
    }

    #[test]
    fn test_averages_streams() {
        let mut mix = Mix::new(secondary(&[2000, 2000]), 0.0).unwrap();
        assert_eq!(run(&mut mix, &[1000, 1000]), vec![1500, 1500]);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut mix = Mix::new(secondary(&[2, -2, i16::MIN]), 0.0).unwrap();
        assert_eq!(run(&mut mix, &[1, -1, i16::MIN]), vec![1, -1, i16::MIN]);
    }

    #[test]
    fn test_shorter_secondary_counts_as_silence() {
        let mut mix = Mix::new(secondary(&[100]), 0.0).unwrap();
        assert_eq!(run(&mut mix, &[300, 301, -301]), vec![200, 150, -150]);
    }

    #[test]
    fn test_longer_secondary_is_cut() {
        let mut mix = Mix::new(secondary(&[10, 10, 10, 10]), 0.0).unwrap();
        assert_eq!(run(&mut mix, &[30, 30]), vec![20, 20]);
    }

    #[test]
    fn test_insert_position() {
        let main = vec![1000i16; 44100 + 2];
        let mut mix = Mix::new(secondary(&[3000, 3000]), 1.0).unwrap();
        let out = run(&mut mix, &main);

        assert_eq!(out.len(), main.len());
        assert_eq!(out[44099], 1000);
        assert_eq!(out[44100], 2000);
        assert_eq!(out[44101], 2000);
    }

    #[test]
    fn test_insert_past_end_copies_main() {
        let mut mix = Mix::new(secondary(&[3000]), 10.0).unwrap();
        assert_eq!(run(&mut mix, &[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_stream_fails() {
        let mut mix = Mix::default();
        let mut input = SampleReader::from_samples(&[1, 2]);
        let mut output = crate::stream::SampleWriter::in_memory();
        let err = mix.process(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, AudioError::Transform { .. }));
    }
}
