//! WAV files on disk.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::format::{BYTES_PER_SAMPLE, RIFF_OVERHEAD};
use super::header::WavHeader;
use crate::error::{AudioError, AudioResult};
use crate::stream::SampleReader;
use crate::stream::SampleWriter;

/// Readable stream over an input file.
pub type FileSampleReader = SampleReader<BufReader<File>>;

/// Writable stream over an output file.
pub type FileSampleWriter = SampleWriter<BufWriter<File>>;

/// A validated input WAV file.
///
/// The header is read once; every call to [`WavInput::open_stream`] opens a
/// new file handle, so streams over the same file keep separate cursors.
#[derive(Debug, Clone)]
pub struct WavInput {
    path: PathBuf,
    header: WavHeader,
    data_offset: u64,
}

impl WavInput {
    /// Opens `path` and validates its header.
    pub fn open(path: impl AsRef<Path>) -> AudioResult<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(open_file(path)?);
        let header = WavHeader::read(&mut reader)?;
        let data_offset = reader.stream_position()?;

        info!(
            path = %path.display(),
            samples = header.sample_count(),
            duration = header.duration(),
            "opened input WAV"
        );

        Ok(Self {
            path: path.to_path_buf(),
            header,
            data_offset,
        })
    }

    /// Opens a fresh readable stream positioned at the first sample.
    pub fn open_stream(&self) -> AudioResult<FileSampleReader> {
        let reader = BufReader::new(open_file(&self.path)?);
        SampleReader::new(reader, self.header.data_size(), self.data_offset)
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed header.
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// Byte offset of the first sample.
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }
}

/// An output WAV file being written.
///
/// A provisional header with a data size of 0 is written on creation;
/// [`WavOutput::finalize`] rewrites it with the true size. An output that is
/// dropped without finalizing keeps the provisional header.
#[derive(Debug)]
pub struct WavOutput {
    path: PathBuf,
    stream: FileSampleWriter,
}

impl WavOutput {
    /// Creates (or truncates) `path` and writes a provisional header.
    pub fn create(path: impl AsRef<Path>) -> AudioResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| AudioError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        WavHeader::with_data_size(0).write(&mut writer)?;

        debug!(path = %path.display(), "created output WAV");
        Ok(Self {
            path: path.to_path_buf(),
            stream: SampleWriter::new(writer),
        })
    }

    /// Writable sample stream for the data chunk.
    pub fn stream(&mut self) -> &mut FileSampleWriter {
        &mut self.stream
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the header with the number of bytes written and flushes.
    pub fn finalize(self) -> AudioResult<WavHeader> {
        let data_size = self.stream.written_bytes();
        let data_size = u32::try_from(data_size)
            .ok()
            .filter(|size| size.checked_add(RIFF_OVERHEAD).is_some())
            .ok_or_else(|| data_size_overflow(data_size))?;

        let header = WavHeader::with_data_size(data_size);
        let mut writer = self.stream.into_inner();
        writer.seek(SeekFrom::Start(0))?;
        header.write(&mut writer)?;
        writer.flush()?;

        info!(
            path = %self.path.display(),
            samples = data_size / u32::from(BYTES_PER_SAMPLE),
            "finalized output WAV"
        );
        Ok(header)
    }
}

pub(super) fn data_size_overflow(data_size: u64) -> AudioError {
    AudioError::stream(format!(
        "{} bytes of sample data exceed the WAV size limit",
        data_size
    ))
}

fn open_file(path: &Path) -> AudioResult<File> {
    File::open(path).map_err(|source| AudioError::File {
        path: path.to_path_buf(),
        source,
    })
}
