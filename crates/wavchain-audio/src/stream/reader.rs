//! Readable sample stream.

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{SampleSource, StreamInfo};
use crate::error::{AudioError, AudioResult};
use crate::wav::{BYTES_PER_SAMPLE, SUPPORTED_SAMPLE_RATE};

/// Reads little-endian 16-bit samples from a byte range of `R`.
#[derive(Debug)]
pub struct SampleReader<R> {
    source: R,
    start_offset: u64,
    total_samples: u32,
    index: u32,
}

impl<R: Read + Seek> SampleReader<R> {
    /// Creates a reader over `data_size` bytes starting at `start_offset`.
    ///
    /// The source is positioned at `start_offset` before the first read.
    pub fn new(mut source: R, data_size: u32, start_offset: u64) -> AudioResult<Self> {
        source
            .seek(SeekFrom::Start(start_offset))
            .map_err(|e| AudioError::stream(format!("cannot seek to sample data: {}", e)))?;
        Ok(Self {
            source,
            start_offset,
            total_samples: data_size / u32::from(BYTES_PER_SAMPLE),
            index: 0,
        })
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    fn read_raw(&mut self) -> AudioResult<i16> {
        self.source.read_i16::<LittleEndian>().map_err(|e| {
            AudioError::stream(format!("failed to read sample {}: {}", self.index, e))
        })
    }
}

impl SampleReader<Cursor<Vec<u8>>> {
    /// Wraps raw little-endian sample bytes held in memory.
    ///
    /// A trailing odd byte is not part of any sample.
    pub fn from_buffer(bytes: Vec<u8>) -> Self {
        let data_size = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        Self {
            source: Cursor::new(bytes),
            start_offset: 0,
            total_samples: data_size / u32::from(BYTES_PER_SAMPLE),
            index: 0,
        }
    }

    /// Builds an in-memory stream from decoded samples.
    pub fn from_samples(samples: &[i16]) -> Self {
        let bytes = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::from_buffer(bytes)
    }
}

impl<R: Read + Seek> StreamInfo for SampleReader<R> {
    fn sample_count(&self) -> u32 {
        self.total_samples
    }

    fn position(&self) -> u32 {
        self.index
    }

    fn has_more(&self) -> bool {
        self.index < self.total_samples
    }
}

impl<R: Read + Seek> SampleSource for SampleReader<R> {
    fn read_sample(&mut self) -> AudioResult<i16> {
        if !self.has_more() {
            return Err(AudioError::stream("no more samples to read"));
        }
        let sample = self.read_raw()?;
        self.index += 1;
        Ok(sample)
    }

    fn reset(&mut self) -> AudioResult<()> {
        self.source
            .seek(SeekFrom::Start(self.start_offset))
            .map_err(|e| AudioError::stream(format!("failed to reset stream position: {}", e)))?;
        self.index = 0;
        Ok(())
    }

    fn skip(&mut self, count: u32) -> AudioResult<u32> {
        let mut skipped = 0;
        while skipped < count && self.has_more() {
            self.read_raw()?;
            self.index += 1;
            skipped += 1;
        }
        Ok(skipped)
    }

    fn seek_to_second(&mut self, seconds: f64) -> AudioResult<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AudioError::stream(format!(
                "cannot seek to {} seconds",
                seconds
            )));
        }

        let target = (seconds * f64::from(SUPPORTED_SAMPLE_RATE)).floor();
        if target >= f64::from(self.total_samples) {
            self.index = self.total_samples;
            return Ok(());
        }

        let target = target as u32;
        let offset = self.start_offset + u64::from(target) * u64::from(BYTES_PER_SAMPLE);
        self.source
            .seek(SeekFrom::Start(offset))
            .map_err(|e| AudioError::stream(format!("failed to seek to position: {}", e)))?;
        self.index = target;
        Ok(())
    }
}
