//! Decaying echo.

use tracing::debug;

use super::params::{parse_integer, parse_number, require, warn_surplus};
use super::{clamp_i16, Transform};
use crate::error::{AudioError, AudioResult};
use crate::stream::{SampleSink, SampleSource, StreamInfo};
use crate::wav::SUPPORTED_SAMPLE_RATE;

const NAME: &str = "echo";

const USAGE: &str = "echo <delay> [decay] [repeats]
  delay   - echo delay (milliseconds)
  decay   - amplitude factor per repeat (0.0-1.0, default: 0.6)
  repeats - number of echo repeats (default: 1)";

const DEFAULT_DECAY: f64 = 0.6;
const DEFAULT_REPEATS: u32 = 1;

/// Echo over a delay buffer sized to the input sample count.
///
/// Output sample `i` is the input sample plus `decay^r` times the buffer slot
/// at `i + r * delay` for each repeat `r`. A slot is filled with the raw input
/// sample only after its own output is produced, so lookups ahead of the
/// current index read silence. The output has exactly as many samples as the
/// input; lookups past the end of the buffer are skipped.
#[derive(Debug, Clone)]
pub struct Echo {
    delay_ms: u32,
    decay: f64,
    repeats: u32,
}

impl Default for Echo {
    fn default() -> Self {
        Self {
            delay_ms: 250,
            decay: DEFAULT_DECAY,
            repeats: DEFAULT_REPEATS,
        }
    }
}

impl Echo {
    /// Creates an echo with the given delay, decay and repeat count.
    pub fn new(delay_ms: u32, decay: f64, repeats: u32) -> AudioResult<Self> {
        let echo = Self {
            delay_ms,
            decay,
            repeats,
        };
        echo.validate()?;
        Ok(echo)
    }

    fn validate(&self) -> AudioResult<()> {
        if self.delay_ms == 0 {
            return Err(AudioError::invalid_param(NAME, "echo delay must be positive"));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(AudioError::invalid_param(
                NAME,
                format!("decay must be between 0.0 and 1.0, got {}", self.decay),
            ));
        }
        Ok(())
    }

    /// Delay in samples.
    pub fn delay_samples(&self) -> u64 {
        u64::from(self.delay_ms) * u64::from(SUPPORTED_SAMPLE_RATE) / 1000
    }

    /// Sums the input sample with the attenuated delay-buffer slots ahead of it.
    ///
    /// Slots at `index + r * delay` are looked up for `r = 1..=repeats`;
    /// lookups past the end of the buffer contribute nothing.
    fn echo_at(&self, history: &[i16], index: u64, sample: i16) -> i16 {
        let delay = self.delay_samples();
        let len = history.len() as u64;
        let mut acc = i32::from(sample);
        let mut gain = 1.0;

        for repeat in 1..=u64::from(self.repeats) {
            gain *= self.decay;
            let Some(pos) = repeat
                .checked_mul(delay)
                .and_then(|offset| index.checked_add(offset))
                .filter(|&pos| pos < len)
            else {
                break;
            };
            let echoed = history[pos as usize];
            acc = acc.saturating_add((f64::from(echoed) * gain) as i32);
        }

        clamp_i16(acc)
    }
}

impl Transform for Echo {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Adds an echo effect to the audio with repeating delayed copies."
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn set_parameters(&mut self, params: &[String]) -> AudioResult<()> {
        require(NAME, params, 1, USAGE)?;
        warn_surplus(NAME, params, 3);

        let delay_ms = parse_integer(NAME, "delay", &params[0])?;
        let delay_ms = u32::try_from(delay_ms)
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| AudioError::invalid_param(NAME, "echo delay must be positive"))?;

        let decay = match params.get(1) {
            Some(token) => parse_number(NAME, "decay", token)?,
            None => DEFAULT_DECAY,
        };

        let repeats = match params.get(2) {
            Some(token) => {
                let count = parse_integer(NAME, "repeat count", token)?;
                if count < 0 {
                    return Err(AudioError::invalid_param(
                        NAME,
                        "repeat count must be non-negative",
                    ));
                }
                u32::try_from(count).unwrap_or(u32::MAX)
            }
            None => DEFAULT_REPEATS,
        };

        *self = Self::new(delay_ms, decay, repeats)?;
        Ok(())
    }

    fn process(
        &mut self,
        input: &mut dyn SampleSource,
        output: &mut dyn SampleSink,
    ) -> AudioResult<()> {
        // Sized to the input; echoes never extend the clip.
        let mut history = vec![0i16; input.sample_count() as usize];
        debug!(
            delay_samples = self.delay_samples(),
            decay = self.decay,
            repeats = self.repeats,
            buffer = history.len(),
            "echo"
        );

        let mut index: u64 = 0;
        while input.has_more() {
            let sample = input.read_sample()?;
            output.write_sample(self.echo_at(&history, index, sample))?;
            if let Some(slot) = usize::try_from(index).ok().and_then(|i| history.get_mut(i)) {
                *slot = sample;
            }
            index += 1;
        }
        Ok(())
    }
}
