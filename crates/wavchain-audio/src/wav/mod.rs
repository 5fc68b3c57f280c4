//! Mono 16-bit PCM WAV container codec.
//!
//! Only the canonical subset is accepted: PCM (format 1), one channel,
//! 44100 Hz, 16 bits per sample. Unknown chunks before `fmt ` and `data` are
//! skipped; extension bytes at the end of the `fmt ` chunk are ignored.

mod file;
mod format;
mod header;


// Re-export public API
pub use file::{FileSampleReader, FileSampleWriter, WavInput, WavOutput};
pub use format::{
    BYTES_PER_SAMPLE, CANONICAL_HEADER_SIZE, SUPPORTED_AUDIO_FORMAT, SUPPORTED_BITS_PER_SAMPLE,
    SUPPORTED_NUM_CHANNELS, SUPPORTED_SAMPLE_RATE,
};
pub use header::WavHeader;
