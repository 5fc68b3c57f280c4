//! Pipeline orchestrator.
//!
//! A [`Pipeline`] is built by [`Pipeline::configure`], which parses the
//! configuration file, opens every input and checks every `$n` reference.
//! [`Pipeline::process`] then runs the command chain:
//!
//! 1. open a fresh stream over input #1;
//! 2. for each command, build the transform, attach any referenced input
//!    stream, run it into an in-memory buffer and re-read that buffer as the
//!    next stage's input;
//! 3. copy the final stream into the output file and finalize its header.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wavchain_audio::stream::{SampleReader, SampleSink, SampleSource, SampleWriter, StreamInfo};
use wavchain_audio::wav::{FileSampleReader, WavInput, WavOutput};
use wavchain_audio::{AudioResult, Transform, TransformRegistry};
use wavchain_spec::{parse_config, ConverterCommand, StreamRef};

use crate::error::{ProcessorError, ProcessorResult};
use crate::report::PipelineReport;

/// A configured chain of transforms over a set of input files.
pub struct Pipeline {
    registry: TransformRegistry,
    commands: Vec<ConverterCommand>,
    inputs: Vec<WavInput>,
    output: PathBuf,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("commands", &self.commands)
            .field("inputs", &self.inputs)
            .field("output", &self.output)
            .finish()
    }
}

impl Pipeline {
    /// Configures a pipeline with the built-in transforms.
    ///
    /// # Arguments
    /// * `config` - Configuration file, one command per line
    /// * `output` - Output WAV path (created by [`Pipeline::process`])
    /// * `inputs` - Input WAV paths; the first is the main stream
    ///
    /// # Errors
    /// * `ProcessorError::Config` if the configuration cannot be read
    /// * `ProcessorError::Audio` if an input cannot be opened or is unsupported
    /// * `ProcessorError::Argument` if there are no inputs or a `$n` is out of range
    pub fn configure<P: AsRef<Path>>(
        config: &Path,
        output: &Path,
        inputs: &[P],
    ) -> ProcessorResult<Self> {
        Self::with_registry(TransformRegistry::builtin(), config, output, inputs)
    }

    /// Configures a pipeline that resolves names through `registry`.
    pub fn with_registry<P: AsRef<Path>>(
        registry: TransformRegistry,
        config: &Path,
        output: &Path,
        inputs: &[P],
    ) -> ProcessorResult<Self> {
        let commands = parse_config(config)?;
        Self::from_commands(registry, commands, output, inputs)
    }

    /// Configures a pipeline from already-parsed commands.
    pub fn from_commands<P: AsRef<Path>>(
        registry: TransformRegistry,
        commands: Vec<ConverterCommand>,
        output: &Path,
        inputs: &[P],
    ) -> ProcessorResult<Self> {
        if inputs.is_empty() {
            return Err(ProcessorError::argument("no input files given"));
        }

        let inputs = inputs
            .iter()
            .map(|path| WavInput::open(path.as_ref()))
            .collect::<AudioResult<Vec<_>>>()?;

        for command in &commands {
            for stream_ref in command.stream_refs() {
                check_index(command, stream_ref, inputs.len())?;
            }
        }

        info!(
            commands = commands.len(),
            inputs = inputs.len(),
            output = %output.display(),
            "pipeline configured"
        );

        Ok(Self {
            registry,
            commands,
            inputs,
            output: output.to_path_buf(),
        })
    }

    /// Commands in execution order.
    pub fn commands(&self) -> &[ConverterCommand] {
        &self.commands
    }

    /// Opened input files.
    pub fn inputs(&self) -> &[WavInput] {
        &self.inputs
    }

    /// Output path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Runs the chain and writes the output file.
    ///
    /// Every call opens fresh streams and builds fresh transforms. If any
    /// stage fails the output file is not finalized; if the failure happens
    /// while writing it, the partial file is removed.
    pub fn process(&self) -> ProcessorResult<PipelineReport> {
        let mut current: Box<dyn SampleSource> = Box::new(self.open_stream(StreamRef::FIRST)?);
        let mut applied = Vec::with_capacity(self.commands.len());

        for command in &self.commands {
            let mut transform = self.registry.create(command.name())?;
            let params = self.bind_params(command, transform.as_mut())?;
            transform.set_parameters(&params)?;

            let mut buffer = SampleWriter::in_memory();
            transform.process(current.as_mut(), &mut buffer)?;
            debug!(
                command = %command,
                line = command.line(),
                samples_in = current.sample_count(),
                samples_out = buffer.written_samples(),
                "stage finished"
            );

            current = Box::new(SampleReader::from_buffer(buffer.into_inner()));
            applied.push(command.name().to_string());
        }

        if self.commands.is_empty() {
            // Input #1 may be the output path; drain it before the output is truncated.
            current = Box::new(buffer_stream(current.as_mut())?);
        }

        let (samples_written, pcm_hash) = self.write_output(current.as_mut())?;
        let duration_seconds = current.duration();

        Ok(PipelineReport {
            output: self.output.clone(),
            inputs: self.inputs.len(),
            commands: applied,
            samples_written,
            duration_seconds,
            pcm_hash,
        })
    }

    /// Splits stream references out of the parameters, attaching the last
    /// one to `transform` if it takes a secondary stream.
    fn bind_params(
        &self,
        command: &ConverterCommand,
        transform: &mut dyn Transform,
    ) -> ProcessorResult<Vec<String>> {
        let mut params = Vec::with_capacity(command.param_count());
        let mut attached = None;

        for token in command.params() {
            let Some(stream_ref) = StreamRef::parse(token) else {
                params.push(token.clone());
                continue;
            };
            check_index(command, stream_ref, self.inputs.len())?;
            if transform.accepts_stream() {
                attached = Some(stream_ref);
            } else {
                warn!(
                    command = command.name(),
                    line = command.line(),
                    reference = %stream_ref,
                    "dropping stream reference for transform without a secondary input"
                );
            }
        }

        if let Some(stream_ref) = attached {
            debug!(command = command.name(), reference = %stream_ref, "attaching stream");
            transform.attach_stream(Box::new(self.open_stream(stream_ref)?))?;
        }
        Ok(params)
    }

    fn open_stream(&self, stream_ref: StreamRef) -> ProcessorResult<FileSampleReader> {
        let slot = stream_ref.resolve(self.inputs.len()).ok_or_else(|| {
            ProcessorError::argument(format!("invalid file index: {}", stream_ref.index()))
        })?;
        Ok(self.inputs[slot].open_stream()?)
    }

    /// Copies `source` into the output file, returning the sample count and
    /// the BLAKE3 hash of the sample bytes.
    fn write_output(&self, source: &mut dyn SampleSource) -> ProcessorResult<(u32, String)> {
        let mut output = WavOutput::create(&self.output)?;
        let mut hasher = blake3::Hasher::new();

        let copied = copy_samples(source, output.stream(), &mut hasher);
        match copied.and_then(|()| output.finalize()) {
            Ok(header) => Ok((header.sample_count(), hasher.finalize().to_hex().to_string())),
            Err(err) => {
                if let Err(remove_err) = fs::remove_file(&self.output) {
                    warn!(
                        path = %self.output.display(),
                        error = %remove_err,
                        "failed to remove partial output"
                    );
                }
                Err(err.into())
            }
        }
    }
}

fn check_index(
    command: &ConverterCommand,
    stream_ref: StreamRef,
    count: usize,
) -> ProcessorResult<()> {
    if stream_ref.resolve(count).is_some() {
        return Ok(());
    }
    Err(ProcessorError::argument(format!(
        "line {}: invalid file index: {} ({} input file(s) given)",
        command.line(),
        stream_ref,
        count
    )))
}

fn buffer_stream(source: &mut dyn SampleSource) -> AudioResult<SampleReader<Cursor<Vec<u8>>>> {
    let mut buffer = SampleWriter::in_memory();
    while source.has_more() {
        buffer.write_sample(source.read_sample()?)?;
    }
    Ok(SampleReader::from_buffer(buffer.into_inner()))
}

fn copy_samples(
    source: &mut dyn SampleSource,
    sink: &mut dyn SampleSink,
    hasher: &mut blake3::Hasher,
) -> AudioResult<()> {
    while source.has_more() {
        let sample = source.read_sample()?;
        hasher.update(&sample.to_le_bytes());
        sink.write_sample(sample)?;
    }
    Ok(())
}
