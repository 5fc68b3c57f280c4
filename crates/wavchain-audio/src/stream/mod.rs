//! Sample streams over byte sources and sinks.
//!
//! Reading and writing are separate types: [`SampleReader`] walks a fixed
//! byte range of a seekable source, [`SampleWriter`] appends to an open-ended
//! sink. Both expose the query surface of [`StreamInfo`]. Transforms work
//! against the object-safe [`SampleSource`] and [`SampleSink`] traits so the
//! same code runs over files and in-memory buffers.

mod reader;
mod writer;


pub use reader::SampleReader;
pub use writer::SampleWriter;

use crate::error::AudioResult;
use crate::wav::SUPPORTED_SAMPLE_RATE;

/// Read-only queries shared by readable and writable streams.
pub trait StreamInfo {
    /// Total samples of a readable stream, or samples written so far.
    fn sample_count(&self) -> u32;

    /// Index of the next sample to be read or written.
    fn position(&self) -> u32;

    /// Whether another read (or write) is possible.
    fn has_more(&self) -> bool;

    /// Duration of `sample_count()` samples in seconds.
    fn duration(&self) -> f64 {
        f64::from(self.sample_count()) / f64::from(SUPPORTED_SAMPLE_RATE)
    }
}

/// A readable stream of 16-bit samples.
pub trait SampleSource: StreamInfo {
    /// Reads the next sample.
    ///
    /// Fails with `AudioError::Stream` when no samples remain or the source
    /// ends before two bytes are available.
    fn read_sample(&mut self) -> AudioResult<i16>;

    /// Rewinds to the first sample.
    fn reset(&mut self) -> AudioResult<()>;

    /// Reads and discards up to `count` samples, returning how many were skipped.
    fn skip(&mut self, count: u32) -> AudioResult<u32>;

    /// Moves to sample `floor(seconds * 44100)`, or to the end if that is past it.
    fn seek_to_second(&mut self, seconds: f64) -> AudioResult<()>;
}

/// A writable stream of 16-bit samples.
pub trait SampleSink: StreamInfo {
    /// Appends one sample.
    fn write_sample(&mut self, sample: i16) -> AudioResult<()>;
}
