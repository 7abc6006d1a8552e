use std::fs;
use std::path::{Path, PathBuf};

use rnnoise_filter::audio_pipeline::BitDepth;
use rnnoise_filter::batch::BatchProcessor;
use rnnoise_filter::config::BatchConfig;
use rnnoise_filter::wav::{self, WavError};
use rnnoise_filter::{FilterPipeline, MockDenoiser};

fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_fixture(path: &Path, sample_rate: u32, channels: u16, bits: u16, seconds: f32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create fixture");
    let total = (sample_rate as f32 * seconds) as usize * usize::from(channels);
    let amplitude = ((1_i64 << (bits - 1)) / 4) as i32;
    for i in 0..total {
        let value = if (i / 64) % 2 == 0 { amplitude } else { -amplitude };
        match bits {
            16 => writer.write_sample(value as i16).expect("write sample"),
            _ => writer.write_sample(value).expect("write sample"),
        }
    }
    writer.finalize().expect("finalize fixture");
}

#[test]
fn read_wav_normalizes_samples() {
    let dir = temp_dir("rnf_wav_read");
    let path = dir.join("stereo.wav");
    write_fixture(&path, 16_000, 2, 24, 0.1);

    let buffer = wav::read_wav(&path).expect("read");
    assert_eq!(buffer.sample_rate, 16_000);
    assert_eq!(buffer.channels, 2);
    assert_eq!(buffer.bit_depth, BitDepth::TwentyFour);
    assert_eq!(buffer.samples.len(), 1_600 * 2);
    assert_eq!(buffer.samples[0], 0.25);
    assert_eq!(buffer.samples[64], -0.25);
}

#[test]
fn float_wav_is_rejected() {
    let dir = temp_dir("rnf_wav_float");
    let path = dir.join("float.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 48_000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create");
    writer.write_sample(0.5_f32).expect("write");
    writer.finalize().expect("finalize");

    let err = wav::read_wav(&path).unwrap_err();
    assert!(matches!(err, WavError::Format { .. }));
}

#[test]
fn filter_file_writes_mono_output_with_input_format() {
    let dir = temp_dir("rnf_wav_filter");
    let input = dir.join("in.wav");
    let output = dir.join("out.wav");
    write_fixture(&input, 16_000, 2, 16, 1.0);

    let mut pipeline = FilterPipeline::new(MockDenoiser::new());
    let result = wav::filter_file(&mut pipeline, &input, &output, 0.0).expect("filter file");
    assert_eq!(result.processed_frames, 100);

    let reader = hound::WavReader::open(&output).expect("open output");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len() as usize, result.denoised.samples.len());
}

#[test]
fn fully_gated_file_produces_empty_wav() {
    let dir = temp_dir("rnf_wav_empty");
    let input = dir.join("in.wav");
    let output = dir.join("out.wav");
    write_fixture(&input, 48_000, 1, 16, 0.5);

    let mut pipeline = FilterPipeline::new(MockDenoiser::scripted([0.1_f32]));
    wav::filter_file(&mut pipeline, &input, &output, 0.5).expect("filter file");

    let buffer = wav::read_wav(&output).expect("read output");
    assert!(buffer.samples.is_empty());
    assert_eq!(buffer.sample_rate, 48_000);
}

#[test]
fn batch_continues_past_corrupt_files() {
    let input_dir = temp_dir("rnf_batch_in");
    fs::create_dir_all(input_dir.join("nested")).expect("create nested");
    write_fixture(&input_dir.join("a.wav"), 16_000, 1, 16, 0.2);
    write_fixture(&input_dir.join("nested").join("b.WAV"), 8_000, 2, 24, 0.2);
    fs::write(input_dir.join("broken.wav"), b"not a wav file").expect("write corrupt");
    fs::write(input_dir.join("notes.txt"), b"ignored").expect("write txt");

    let processor = BatchProcessor::new(BatchConfig::default().batch);
    let output_dir = processor.default_output_dir(&input_dir);
    let mut pipeline = FilterPipeline::new(MockDenoiser::new());
    let summary = processor
        .run(&mut pipeline, &input_dir, &output_dir, 0.0)
        .expect("batch run");

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.processed.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("broken.wav"));
    assert!(output_dir.join("a.wav").is_file());
    assert!(output_dir.join("nested").join("b.WAV").is_file());
    assert!(!output_dir.join("notes.txt").exists());
}

#[test]
fn default_output_dir_appends_suffix() {
    let processor = BatchProcessor::new(BatchConfig::default().batch);
    assert_eq!(
        processor.default_output_dir(Path::new("/data/recordings")),
        PathBuf::from("/data/recordings_denoised")
    );
}

#[test]
fn nested_output_dir_is_not_rescanned() {
    let input_dir = temp_dir("rnf_batch_nested_out");
    write_fixture(&input_dir.join("a.wav"), 16_000, 1, 16, 0.1);
    let output_dir = input_dir.join("out");

    let processor = BatchProcessor::new(BatchConfig::default().batch);
    let mut pipeline = FilterPipeline::new(MockDenoiser::new());
    processor
        .run(&mut pipeline, &input_dir, &output_dir, 0.0)
        .expect("first run");

    let inputs = processor
        .collect_inputs(&input_dir, &output_dir)
        .expect("collect");
    assert_eq!(inputs, vec![input_dir.join("a.wav")]);
}

#[test]
fn output_dir_is_matched_after_normalization() {
    let input_dir = temp_dir("rnf_batch_alias_out");
    fs::create_dir_all(input_dir.join("sub")).expect("create sub");
    write_fixture(&input_dir.join("a.wav"), 16_000, 1, 16, 0.1);
    // 同じ場所を別表記で指定
    let output_dir = input_dir.join("sub").join("..").join("out");

    let processor = BatchProcessor::new(BatchConfig::default().batch);
    let mut pipeline = FilterPipeline::new(MockDenoiser::new());
    let summary = processor
        .run(&mut pipeline, &input_dir, &output_dir, 0.0)
        .expect("first run");
    assert_eq!(summary.processed.len(), 1);
    assert!(input_dir.join("out").join("a.wav").is_file());

    let inputs = processor
        .collect_inputs(&input_dir, &output_dir)
        .expect("collect");
    assert_eq!(inputs, vec![input_dir.join("a.wav")]);
}
