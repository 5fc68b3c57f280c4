//! Silence a time interval.

use tracing::debug;

use super::params::{parse_number, require, warn_surplus};
use super::{seconds_to_samples, Transform};
use crate::error::{AudioError, AudioResult};
use crate::stream::{SampleSink, SampleSource, StreamInfo};

const NAME: &str = "mute";

const USAGE: &str = "mute <start> <end>
  start - start of the muted interval (seconds)
  end   - end of the muted interval (seconds, exclusive)";

/// Replaces samples in `[start, end)` with silence.
#[derive(Debug, Clone, Default)]
pub struct Mute {
    start_seconds: f64,
    end_seconds: f64,
}

impl Mute {
    /// Creates a mute over `[start_seconds, end_seconds)`.
    pub fn new(start_seconds: f64, end_seconds: f64) -> AudioResult<Self> {
        let mute = Self {
            start_seconds,
            end_seconds,
        };
        mute.validate()?;
        Ok(mute)
    }

    fn validate(&self) -> AudioResult<()> {
        if self.start_seconds < 0.0 {
            return Err(AudioError::invalid_param(NAME, "start time cannot be negative"));
        }
        if self.end_seconds < 0.0 {
            return Err(AudioError::invalid_param(NAME, "end time cannot be negative"));
        }
        if self.start_seconds > self.end_seconds {
            return Err(AudioError::invalid_param(
                NAME,
                "start time cannot be greater than end time",
            ));
        }
        Ok(())
    }
}

impl Transform for Mute {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Mutes (silences) the audio in a specified time interval."
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn set_parameters(&mut self, params: &[String]) -> AudioResult<()> {
        require(NAME, params, 2, USAGE)?;
        warn_surplus(NAME, params, 2);

        *self = Self::new(
            parse_number(NAME, "start time", &params[0])?,
            parse_number(NAME, "end time", &params[1])?,
        )?;
        Ok(())
    }

    fn process(
        &mut self,
        input: &mut dyn SampleSource,
        output: &mut dyn SampleSink,
    ) -> AudioResult<()> {
        let start = seconds_to_samples(self.start_seconds);
        let end = seconds_to_samples(self.end_seconds);
        debug!(start, end, "mute");

        let mut index: u64 = 0;
        while input.has_more() {
            let sample = input.read_sample()?;
            let muted = (start..end).contains(&index);
            output.write_sample(if muted { 0 } else { sample })?;
            index += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_util::{params, run};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parameters() {
        let mut mute = Mute::default();
        assert!(mute.set_parameters(&params(&["0", "10"])).is_ok());
        assert!(mute.set_parameters(&params(&["0.25", "0.5"])).is_ok());
        assert!(mute.set_parameters(&params(&["3", "3"])).is_ok());

        let bad_cases: [&[&str]; 6] = [
            &["20", "10"],
            &["-5", "10"],
            &["0", "-1"],
            &["a", "1"],
            &["1"],
            &[],
        ];
        for bad in bad_cases {
            let err = mute.set_parameters(&params(bad)).unwrap_err();
            assert!(
                matches!(err, AudioError::InvalidParameter { .. }),
                "{:?} -> {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_mutes_whole_clip() {
        let samples: Vec<i16> = (0..44100).map(|i| (i % 2000) as i16 - 1000).collect();
        let mut mute = Mute::new(0.0, 1.0).unwrap();
        let out = run(&mut mute, &samples);
        assert_eq!(out.len(), samples.len());
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_mutes_only_interval() {
        let samples = vec![500i16; 44100 * 3];
        let mut mute = Mute::new(1.0, 2.0).unwrap();
        let out = run(&mut mute, &samples);

        assert_eq!(out[44099], 500);
        assert_eq!(out[44100], 0);
        assert_eq!(out[88199], 0);
        assert_eq!(out[88200], 500);
        assert_eq!(out.iter().filter(|&&s| s == 0).count(), 44100);
    }

    #[test]
    fn test_empty_interval_is_identity() {
        let samples = vec![1i16, 2, 3];
        let mut mute = Mute::new(0.0, 0.0).unwrap();
        assert_eq!(run(&mut mute, &samples), samples);
    }
}
