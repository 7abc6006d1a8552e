use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rnnoise_filter::audio_pipeline::{FrameReconstructor, FRAME_SIZE, INFERENCE_SAMPLE_RATE};
use rnnoise_filter::batch::BatchProcessor;
use rnnoise_filter::cli::{Cli, Commands};
use rnnoise_filter::config::{ConfigError, ConfigSet};
use rnnoise_filter::{perf, wav};
use rnnoise_filter::{FilterError, FilterPipeline, RnnoiseDenoiser, StreamOutput};

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config_dir.as_deref())?;
    let thresholds = &config.filter.thresholds;

    match cli.command {
        Commands::Denoise {
            input,
            output,
            threshold,
        } => denoise(&input, &output, threshold.unwrap_or(thresholds.denoise)),
        Commands::Analyze { input, threshold } => {
            analyze(&input, threshold.unwrap_or(thresholds.analyze))
        }
        Commands::Stream {
            frames,
            chunk,
            threshold,
        } => stream_demo(
            frames.unwrap_or(config.batch.stream_demo.frames),
            chunk,
            threshold.unwrap_or(thresholds.stream),
        ),
        Commands::Batch {
            input_dir,
            output_dir,
            threshold,
        } => batch(
            &config,
            &input_dir,
            output_dir,
            threshold.unwrap_or(thresholds.batch),
        ),
        Commands::Test {
            audio,
            batch_size,
            runs,
        } => perf_test(&audio, batch_size, runs),
    }
}

fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

fn load_config(dir: Option<&Path>) -> Result<ConfigSet> {
    let loaded = match dir {
        Some(dir) => ConfigSet::load_from_dir(dir),
        None => ConfigSet::load_from_env(),
    };

    match loaded {
        Ok(config) => {
            info!(root = ?config.root(), "configuration loaded");
            Ok(config)
        }
        Err(ConfigError::MissingRoot(root)) if dir.is_none() => {
            warn!(root = ?root, "configuration directory not found, using built-in defaults");
            Ok(ConfigSet::default())
        }
        Err(err) => Err(err).context("failed to load configuration"),
    }
}

fn new_pipeline() -> Result<FilterPipeline<RnnoiseDenoiser>> {
    let denoiser = RnnoiseDenoiser::new().context("failed to create RNNoise state")?;
    Ok(FilterPipeline::new(denoiser))
}

fn denoise(input: &Path, output: &Path, threshold: f32) -> Result<()> {
    let mut pipeline = new_pipeline()?;
    let started = Instant::now();
    let result = wav::filter_file(&mut pipeline, input, output, threshold)
        .with_context(|| format!("failed to denoise {}", input.display()))?;
    let elapsed = started.elapsed().as_secs_f64();

    let stats = result.statistics(threshold);
    let duration = result.processed_frames as f64 * FRAME_SIZE as f64
        / f64::from(INFERENCE_SAMPLE_RATE);
    let rtf = if duration > 0.0 { elapsed / duration } else { 0.0 };

    println!("Denoised: {} -> {}", input.display(), output.display());
    println!("Frames:         {}", result.processed_frames);
    println!("Duration:       {:.2}s (processed in {:.3}s, RTF {:.3})", duration, elapsed, rtf);
    println!(
        "Voice frames:   {} ({:.1}%, threshold {:.2})",
        stats.voice_frames,
        stats.voice_ratio() * 100.0,
        threshold
    );
    println!("Average prob:   {:.3}", stats.average_voice_prob);
    println!(
        "Output:         {} samples @ {} Hz",
        result.denoised.samples.len(),
        result.denoised.sample_rate
    );

    if threshold > 0.0 && result.denoised.is_empty() {
        warn!(threshold, "no frame reached the threshold, output is empty");
    }
    Ok(())
}

fn analyze(input: &Path, threshold: f32) -> Result<()> {
    let audio = wav::read_wav(input)?;
    println!(
        "Input: {} ({} Hz, {} ch, {} bit, {:.2}s)",
        input.display(),
        audio.sample_rate,
        audio.channels,
        audio.bit_depth.bits(),
        audio.duration_secs()
    );

    let mut pipeline = new_pipeline()?;
    let stats = pipeline
        .analyze(audio, threshold)
        .with_context(|| format!("failed to analyze {}", input.display()))?;

    println!("Total frames:   {}", stats.total_frames);
    println!(
        "Voice frames:   {} ({:.1}%)",
        stats.voice_frames,
        stats.voice_ratio() * 100.0
    );
    println!(
        "Noise frames:   {} ({:.1}%)",
        stats.noise_frames,
        stats.noise_ratio() * 100.0
    );
    println!("Average prob:   {:.3}", stats.average_voice_prob);
    println!("Max prob:       {:.3}", stats.max_voice_prob);
    println!("Min prob:       {:.3}", stats.min_voice_prob);
    Ok(())
}

/// 合成信号を任意長チャンクで流し、揃ったフレームから順に判定するデモ
fn stream_demo(frames: usize, chunk: usize, threshold: f32) -> Result<()> {
    if chunk == 0 {
        bail!("chunk size must be at least 1");
    }
    let mut pipeline = new_pipeline()?;
    let mut reconstructor = FrameReconstructor::new();
    println!(
        "Streaming {} frames ({} samples @ {} Hz) in {}-sample chunks, threshold {:.2}",
        frames, FRAME_SIZE, INFERENCE_SAMPLE_RATE, chunk, threshold
    );

    let signal = synthetic_signal(frames);
    let mut report = StreamReport::default();
    for piece in signal.chunks(chunk) {
        for result in pipeline.push_chunk(&mut reconstructor, piece, threshold) {
            report.record(result);
        }
    }
    if let Some(result) = pipeline.flush_stream(&mut reconstructor, threshold) {
        report.record(result);
    }

    println!("Kept {}/{} frames", report.kept, report.index);
    Ok(())
}

#[derive(Default)]
struct StreamReport {
    index: usize,
    kept: usize,
}

impl StreamReport {
    fn record(&mut self, result: Result<StreamOutput, FilterError>) {
        match result {
            Ok(output) => {
                if output.keep {
                    self.kept += 1;
                }
                println!(
                    "Frame {:>3}: prob {:.3} -> {}",
                    self.index,
                    output.voice_probability,
                    if output.keep { "keep" } else { "drop" }
                );
            }
            Err(err) => {
                error!(frame = self.index, error = %err, "frame failed, skipping");
            }
        }
        self.index += 1;
    }
}

/// 奇数フレームに0.5のオフセットを乗せたノコギリ波
fn synthetic_signal(frames: usize) -> Vec<f32> {
    (0..frames * FRAME_SIZE)
        .map(|n| {
            let offset = 0.5 * ((n / FRAME_SIZE) % 2) as f32;
            let j = n % FRAME_SIZE;
            offset + 0.1 * ((j % 100) as f32 / 100.0 - 0.5)
        })
        .collect()
}

fn perf_test(audio: &Path, batch_size: usize, runs: usize) -> Result<()> {
    let data = std::fs::read(audio)
        .with_context(|| format!("failed to read {}", audio.display()))?;
    println!("Audio:      {}", audio.display());
    println!("Batch size: {}", batch_size);
    println!("Runs:       {}", runs);
    println!("---");

    let mut total = 0.0_f64;
    let mut succeeded = 0usize;
    for run in 1..=runs {
        let started = Instant::now();
        let outcome = new_pipeline()
            .and_then(|mut pipeline| Ok(perf::run_once(&mut pipeline, &data, batch_size)?));
        match outcome {
            Ok(_) => {
                let elapsed = started.elapsed().as_secs_f64();
                total += elapsed;
                succeeded += 1;
                println!("Run {run}: {elapsed:.4}s");
            }
            Err(err) => error!(run, error = %err, "run failed"),
        }
    }

    if succeeded == 0 {
        bail!("no run completed");
    }
    let average = total / succeeded as f64;
    println!("---");
    println!("Total:      {:.4}s", total);
    println!("Average:    {:.4}s", average);
    println!("Runs/sec:   {:.2}", 1.0 / average);
    Ok(())
}

fn batch(
    config: &ConfigSet,
    input_dir: &Path,
    output_dir: Option<PathBuf>,
    threshold: f32,
) -> Result<()> {
    let processor = BatchProcessor::new(config.batch.batch.clone());
    let output_dir = output_dir.unwrap_or_else(|| processor.default_output_dir(input_dir));

    let mut pipeline = new_pipeline()?;
    let summary = processor
        .run(&mut pipeline, input_dir, &output_dir, threshold)
        .with_context(|| format!("batch processing failed for {}", input_dir.display()))?;

    println!(
        "Batch complete: {}/{} files -> {}",
        summary.processed.len(),
        summary.total(),
        output_dir.display()
    );
    for (path, message) in &summary.failed {
        println!("  failed: {} ({})", path.display(), message);
    }
    Ok(())
}
