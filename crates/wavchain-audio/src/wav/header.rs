//! WAV header parsing and serialization.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use tracing::debug;

use super::format::{
    BYTES_PER_SAMPLE, DATA_TAG, FMT_CHUNK_SIZE, FMT_TAG, RIFF_OVERHEAD, RIFF_TAG,
    SUPPORTED_AUDIO_FORMAT, SUPPORTED_BITS_PER_SAMPLE, SUPPORTED_NUM_CHANNELS,
    SUPPORTED_SAMPLE_RATE, WAVE_TAG,
};
use crate::error::{AudioError, AudioResult};

/// Parsed fields of a WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    chunk_size: u32,
    subchunk1_size: u32,
    audio_format: u16,
    num_channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    data_size: u32,
}

impl Default for WavHeader {
    fn default() -> Self {
        Self::with_data_size(0)
    }
}

impl WavHeader {
    /// Creates a header with the supported format constants.
    pub fn with_data_size(data_size: u32) -> Self {
        let block_align = SUPPORTED_NUM_CHANNELS * BYTES_PER_SAMPLE;
        Self {
            chunk_size: RIFF_OVERHEAD.saturating_add(data_size),
            subchunk1_size: FMT_CHUNK_SIZE,
            audio_format: SUPPORTED_AUDIO_FORMAT,
            num_channels: SUPPORTED_NUM_CHANNELS,
            sample_rate: SUPPORTED_SAMPLE_RATE,
            byte_rate: SUPPORTED_SAMPLE_RATE * u32::from(block_align),
            block_align,
            bits_per_sample: SUPPORTED_BITS_PER_SAMPLE,
            data_size,
        }
    }

    /// Reads and validates a header, leaving `reader` at the first sample byte.
    ///
    /// Chunks other than `fmt ` and `data` are skipped, as are extension
    /// bytes beyond the first 16 bytes of the `fmt ` chunk.
    ///
    /// # Errors
    /// * `AudioError::Io` if the input ends before the `data` chunk header
    /// * `AudioError::Format` if the container tags are wrong or the format is unsupported
    pub fn read<R: Read>(reader: &mut R) -> AudioResult<Self> {
        let riff = read_tag(reader)?;
        if &riff != RIFF_TAG {
            return Err(AudioError::format("missing RIFF container tag"));
        }
        let chunk_size = reader.read_u32::<LittleEndian>()?;
        let wave = read_tag(reader)?;
        if &wave != WAVE_TAG {
            return Err(AudioError::format("missing WAVE format tag"));
        }

        let subchunk1_size = seek_chunk(reader, FMT_TAG)?;
        if subchunk1_size < FMT_CHUNK_SIZE {
            return Err(AudioError::format(format!(
                "fmt chunk is {} bytes, expected at least {}",
                subchunk1_size, FMT_CHUNK_SIZE
            )));
        }
        let audio_format = reader.read_u16::<LittleEndian>()?;
        let num_channels = reader.read_u16::<LittleEndian>()?;
        let sample_rate = reader.read_u32::<LittleEndian>()?;
        let byte_rate = reader.read_u32::<LittleEndian>()?;
        let block_align = reader.read_u16::<LittleEndian>()?;
        let bits_per_sample = reader.read_u16::<LittleEndian>()?;
        skip_bytes(reader, subchunk1_size - FMT_CHUNK_SIZE)?;

        let data_size = seek_chunk(reader, DATA_TAG)?;

        let header = Self {
            chunk_size,
            subchunk1_size,
            audio_format,
            num_channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_size,
        };
        header.validate()?;
        debug!(data_size, "read WAV header");
        Ok(header)
    }

    /// Writes the canonical 44-byte header.
    ///
    /// Format fields are always the supported constants; only the data size
    /// is taken from `self`.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let canonical = Self::with_data_size(self.data_size);

        // RIFF header
        writer.write_all(RIFF_TAG)?;
        writer.write_u32::<LittleEndian>(canonical.chunk_size)?;
        writer.write_all(WAVE_TAG)?;

        // fmt chunk
        writer.write_all(FMT_TAG)?;
        writer.write_u32::<LittleEndian>(canonical.subchunk1_size)?;
        writer.write_u16::<LittleEndian>(canonical.audio_format)?;
        writer.write_u16::<LittleEndian>(canonical.num_channels)?;
        writer.write_u32::<LittleEndian>(canonical.sample_rate)?;
        writer.write_u32::<LittleEndian>(canonical.byte_rate)?;
        writer.write_u16::<LittleEndian>(canonical.block_align)?;
        writer.write_u16::<LittleEndian>(canonical.bits_per_sample)?;

        // data chunk
        writer.write_all(DATA_TAG)?;
        writer.write_u32::<LittleEndian>(canonical.data_size)?;

        Ok(())
    }

    /// Checks the four supported-format constraints.
    pub fn validate(&self) -> AudioResult<()> {
        if self.audio_format != SUPPORTED_AUDIO_FORMAT {
            return Err(AudioError::format(format!(
                "audio format {} is not supported; only PCM (format 1) is",
                self.audio_format
            )));
        }
        if self.num_channels != SUPPORTED_NUM_CHANNELS {
            return Err(AudioError::format(format!(
                "{} channels are not supported; only mono is",
                self.num_channels
            )));
        }
        if self.sample_rate != SUPPORTED_SAMPLE_RATE {
            return Err(AudioError::format(format!(
                "sample rate {} Hz is not supported; only {} Hz is",
                self.sample_rate, SUPPORTED_SAMPLE_RATE
            )));
        }
        if self.bits_per_sample != SUPPORTED_BITS_PER_SAMPLE {
            return Err(AudioError::format(format!(
                "{} bits per sample is not supported; only 16-bit is",
                self.bits_per_sample
            )));
        }
        Ok(())
    }

    /// Duration of the data chunk in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        f64::from(self.data_size) / (f64::from(self.sample_rate) * f64::from(self.block_align))
    }

    /// RIFF chunk size as declared.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Size of the `fmt ` chunk as declared.
    pub fn subchunk1_size(&self) -> u32 {
        self.subchunk1_size
    }

    /// Audio format code.
    pub fn audio_format(&self) -> u16 {
        self.audio_format
    }

    /// Number of channels.
    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Size of the sample data in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Number of samples in the data chunk.
    pub fn sample_count(&self) -> u32 {
        self.data_size / u32::from(BYTES_PER_SAMPLE)
    }
}

fn read_tag<R: Read>(reader: &mut R) -> io::Result<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag)?;
    Ok(tag)
}

/// Skips chunks until `wanted` is found and returns its declared size.
fn seek_chunk<R: Read>(reader: &mut R, wanted: &[u8; 4]) -> io::Result<u32> {
    loop {
        let tag = read_tag(reader)?;
        let size = reader.read_u32::<LittleEndian>()?;
        if &tag == wanted {
            return Ok(size);
        }
        debug!(
            chunk = %String::from_utf8_lossy(&tag),
            size,
            "skipping WAV chunk"
        );
        skip_bytes(reader, size)?;
    }
}

fn skip_bytes<R: Read>(reader: &mut R, count: u32) -> io::Result<()> {
    let wanted = u64::from(count);
    let skipped = io::copy(&mut reader.by_ref().take(wanted), &mut io::sink())?;
    if skipped < wanted {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("chunk truncated: expected {} bytes, found {}", wanted, skipped),
        ));
    }
    Ok(())
}
