//! Scale sample amplitude.

use tracing::debug;

use super::params::{parse_number, require, warn_surplus};
use super::{clamp_i16, seconds_to_samples, Transform};
use crate::error::{AudioError, AudioResult};
use crate::stream::{SampleSink, SampleSource, StreamInfo};

const NAME: &str = "volume";

const USAGE: &str = "volume <factor> [start] [end]
  factor - amplitude factor (0.5 = half, 1.0 = unchanged, 2.0 = double)
  start  - start of the affected interval (seconds, -1 = from the beginning)
  end    - end of the affected interval (seconds, -1 = to the end)";

/// Multiplies samples in an optional interval by a constant factor.
#[derive(Debug, Clone)]
pub struct Volume {
    factor: f64,
    start_seconds: Option<f64>,
    end_seconds: Option<f64>,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            factor: 1.0,
            start_seconds: None,
            end_seconds: None,
        }
    }
}

impl Volume {
    /// Creates a volume change over the whole stream.
    pub fn new(factor: f64) -> AudioResult<Self> {
        Self::with_range(factor, None, None)
    }

    /// Creates a volume change over `[start, end)`; `None` leaves a side open.
    pub fn with_range(
        factor: f64,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> AudioResult<Self> {
        let volume = Self {
            factor,
            start_seconds,
            end_seconds,
        };
        volume.validate()?;
        Ok(volume)
    }

    fn validate(&self) -> AudioResult<()> {
        if !self.factor.is_finite() || self.factor < 0.0 {
            return Err(AudioError::invalid_param(NAME, "volume factor cannot be negative"));
        }
        if let (Some(start), Some(end)) = (self.start_seconds, self.end_seconds) {
            if start > end {
                return Err(AudioError::invalid_param(
                    NAME,
                    "start time cannot be greater than end time",
                ));
            }
        }
        Ok(())
    }

    fn scale(&self, sample: i16) -> i16 {
        clamp_i16((f64::from(sample) * self.factor).round() as i32)
    }
}

/// Negative bounds mean "not given".
fn optional_bound(what: &str, token: Option<&String>) -> AudioResult<Option<f64>> {
    match token {
        Some(token) => {
            let value = parse_number(NAME, what, token)?;
            Ok((value >= 0.0).then_some(value))
        }
        None => Ok(None),
    }
}

impl Transform for Volume {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Changes the volume (amplitude) of the audio."
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn set_parameters(&mut self, params: &[String]) -> AudioResult<()> {
        require(NAME, params, 1, USAGE)?;
        warn_surplus(NAME, params, 3);

        *self = Self::with_range(
            parse_number(NAME, "volume factor", &params[0])?,
            optional_bound("start time", params.get(1))?,
            optional_bound("end time", params.get(2))?,
        )?;
        Ok(())
    }

    fn process(
        &mut self,
        input: &mut dyn SampleSource,
        output: &mut dyn SampleSink,
    ) -> AudioResult<()> {
        let start = self.start_seconds.map(seconds_to_samples).unwrap_or(0);
        let end = self.end_seconds.map(seconds_to_samples).unwrap_or(u64::MAX);
        debug!(factor = self.factor, start, end, "volume");

        let mut index: u64 = 0;
        while input.has_more() {
            let sample = input.read_sample()?;
            let scaled = if (start..end).contains(&index) {
                self.scale(sample)
            } else {
                sample
            };
            output.write_sample(scaled)?;
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
        let mut volume = Volume::default();
        assert!(volume.set_parameters(&params(&["0.5", "10", "20"])).is_ok());
        assert!(volume.set_parameters(&params(&["2"])).is_ok());
        assert!(volume.set_parameters(&params(&["2", "-1", "5"])).is_ok());
        assert!(volume.set_parameters(&params(&["0"])).is_ok());

        let bad_cases: [&[&str]; 4] = [&["-1.0"], &["1.0", "20", "10"], &[], &["loud"]];
        for bad in bad_cases {
            let err = volume.set_parameters(&params(bad)).unwrap_err();
            assert!(matches!(err, AudioError::InvalidParameter { .. }), "{:?}", bad);
        }
    }

    #[test]
    fn test_unit_factor_is_identity() {
        let samples: Vec<i16> = vec![i16::MIN, -12345, -1, 0, 1, 12345, i16::MAX];
        let mut volume = Volume::new(1.0).unwrap();
        assert_eq!(run(&mut volume, &samples), samples);
    }

    #[test]
    fn test_double_clamps() {
        let mut volume = Volume::new(2.0).unwrap();
        assert_eq!(run(&mut volume, &[1000, 10000, 25000]), vec![2000, 20000, 32767]);
        assert_eq!(run(&mut volume, &[-25000]), vec![-32768]);
    }

    #[test]
    fn test_rounds_to_nearest() {
        let mut volume = Volume::new(0.5).unwrap();
        assert_eq!(run(&mut volume, &[3, -3, 4]), vec![2, -2, 2]);
    }

    #[test]
    fn test_range_only() {
        let samples = vec![100i16; 44100 * 2];
        let mut volume = Volume::with_range(3.0, Some(1.0), None).unwrap();
        let out = run(&mut volume, &samples);
        assert_eq!(out[44099], 100);
        assert_eq!(out[44100], 300);
        assert_eq!(out[88199], 300);
    }

    #[test]
    fn test_negative_bounds_mean_whole_stream() {
        let mut volume = Volume::default();
        volume.set_parameters(&params(&["0", "-1", "-1"])).unwrap();
        assert_eq!(run(&mut volume, &[5, 6, 7]), vec![0, 0, 0]);
    }
}
