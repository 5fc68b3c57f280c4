//! Supported WAV format constants.

/// PCM audio format code.
pub const SUPPORTED_AUDIO_FORMAT: u16 = 1;

/// Mono.
pub const SUPPORTED_NUM_CHANNELS: u16 = 1;

/// Sample rate in Hz.
pub const SUPPORTED_SAMPLE_RATE: u32 = 44100;

/// Bits per sample.
pub const SUPPORTED_BITS_PER_SAMPLE: u16 = 16;

/// Bytes per mono 16-bit sample.
pub const BYTES_PER_SAMPLE: u16 = SUPPORTED_BITS_PER_SAMPLE / 8;

/// Size of a header with a 16-byte `fmt ` chunk and no extra chunks.
pub const CANONICAL_HEADER_SIZE: u64 = 44;

pub(crate) const RIFF_TAG: &[u8; 4] = b"RIFF";
pub(crate) const WAVE_TAG: &[u8; 4] = b"WAVE";
pub(crate) const FMT_TAG: &[u8; 4] = b"fmt ";
pub(crate) const DATA_TAG: &[u8; 4] = b"data";

/// Size of the fixed part of the `fmt ` chunk.
pub(crate) const FMT_CHUNK_SIZE: u32 = 16;

/// Bytes counted by the RIFF chunk size besides the sample data.
pub(crate) const RIFF_OVERHEAD: u32 = 36;
