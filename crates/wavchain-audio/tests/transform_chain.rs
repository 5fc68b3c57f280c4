//! Chains transforms over file-backed and in-memory streams.

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wavchain_audio::stream::{SampleReader, SampleSink, SampleSource, SampleWriter, StreamInfo};
use wavchain_audio::{Transform, TransformRegistry, WavInput, WavOutput};

fn params(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn drain(mut source: impl SampleSource) -> Vec<i16> {
    let mut out = Vec::new();
    while source.has_more() {
        out.push(source.read_sample().unwrap());
    }
    out
}

fn build(registry: &TransformRegistry, name: &str, tokens: &[&str]) -> Box<dyn Transform> {
    let mut transform = registry.create(name).unwrap();
    transform.set_parameters(&params(tokens)).unwrap();
    transform
}

#[test]
fn test_file_to_file_chain() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");

    let samples: Vec<i16> = (0..100).map(|i| i * 100).collect();
    let mut output = WavOutput::create(&input_path).unwrap();
    for &s in &samples {
        output.stream().write_sample(s).unwrap();
    }
    output.finalize().unwrap();

    let registry = TransformRegistry::builtin();
    let input = WavInput::open(&input_path).unwrap();
    let mut current = input.open_stream().unwrap();

    // Stage 1: volume into an in-memory buffer
    let mut volume = build(&registry, "volume", &["0.5"]);
    let mut buffer = SampleWriter::in_memory();
    volume.process(&mut current, &mut buffer).unwrap();
    assert_eq!(buffer.written_samples(), 100);

    // Stage 2: mix with a second, independent stream over the same file
    let mut staged = SampleReader::from_buffer(buffer.into_inner());
    let mut mix = build(&registry, "mix", &[]);
    mix.attach_stream(Box::new(input.open_stream().unwrap()))
        .unwrap();
    let mut output = WavOutput::create(&output_path).unwrap();
    mix.process(&mut staged, output.stream()).unwrap();
    let header = output.finalize().unwrap();
    assert_eq!(header.sample_count(), 100);

    let expected: Vec<i16> = samples
        .iter()
        .map(|&s| ((i32::from(s / 2) + i32::from(s)) / 2) as i16)
        .collect();
    let written = WavInput::open(&output_path).unwrap();
    assert_eq!(drain(written.open_stream().unwrap()), expected);
}

#[test]
fn test_mute_whole_clip_is_silent() {
    let registry = TransformRegistry::builtin();
    let samples = vec![12345i16; 44100];
    let mut input = SampleReader::from_samples(&samples);
    let duration = input.duration().to_string();

    let mut mute = build(&registry, "mute", &["0", &duration]);
    let mut output = SampleWriter::in_memory();
    mute.process(&mut input, &mut output).unwrap();

    let out = drain(SampleReader::from_buffer(output.into_inner()));
    assert_eq!(out, vec![0i16; 44100]);
}

#[test]
fn test_volume_one_is_identity() {
    let registry = TransformRegistry::builtin();
    let samples = [i16::MIN, -1, 0, 1, 12345, i16::MAX];
    let mut input = SampleReader::from_samples(&samples);

    let mut volume = build(&registry, "volume", &["1.0"]);
    let mut output = SampleWriter::in_memory();
    volume.process(&mut input, &mut output).unwrap();

    assert_eq!(drain(SampleReader::from_buffer(output.into_inner())), samples.to_vec());
}

#[test]
fn test_echo_keeps_length_and_signal() {
    let registry = TransformRegistry::builtin();
    let mut samples = vec![0i16; 200];
    samples[0] = 10000;
    samples[150] = -5000;
    let mut input = SampleReader::from_samples(&samples);

    let mut echo = build(&registry, "echo", &["1", "0.5", "3"]);
    let mut output = SampleWriter::in_memory();
    echo.process(&mut input, &mut output).unwrap();

    let out = drain(SampleReader::from_buffer(output.into_inner()));
    assert_eq!(out.len(), 200);
    assert_eq!(out, samples);
}
