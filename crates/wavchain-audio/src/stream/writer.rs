//! Writable sample stream.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{SampleSink, StreamInfo};
use crate::error::{AudioError, AudioResult};
use crate::wav::BYTES_PER_SAMPLE;

/// Appends little-endian 16-bit samples to `W`.
#[derive(Debug)]
pub struct SampleWriter<W> {
    sink: W,
    written: u32,
}

impl<W: Write> SampleWriter<W> {
    /// Creates a writer over `sink`.
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Number of samples written so far.
    pub fn written_samples(&self) -> u32 {
        self.written
    }

    /// Number of sample bytes written so far.
    pub fn written_bytes(&self) -> u64 {
        u64::from(self.written) * u64::from(BYTES_PER_SAMPLE)
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> AudioResult<()> {
        self.sink
            .flush()
            .map_err(|e| AudioError::stream(format!("failed to flush sample sink: {}", e)))
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl SampleWriter<Vec<u8>> {
    /// Creates a writer over a fresh in-memory buffer.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> StreamInfo for SampleWriter<W> {
    fn sample_count(&self) -> u32 {
        self.written
    }

    fn position(&self) -> u32 {
        self.written
    }

    fn has_more(&self) -> bool {
        true
    }
}

impl<W: Write> SampleSink for SampleWriter<W> {
    fn write_sample(&mut self, sample: i16) -> AudioResult<()> {
        if self.written == u32::MAX {
            return Err(AudioError::stream("sample count limit reached"));
        }
        self.sink
            .write_i16::<LittleEndian>(sample)
            .map_err(|e| AudioError::stream(format!("failed to write sample to stream: {}", e)))?;
        self.written += 1;
        Ok(())
    }
}
