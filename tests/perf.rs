use rnnoise_filter::audio_pipeline::codec::encode;
use rnnoise_filter::denoiser::DenoiserError;
use rnnoise_filter::perf::{self, PerfError, CHUNK_BYTES, WAV_HEADER_BYTES};
use rnnoise_filter::{FilterError, FilterPipeline, MockDenoiser};

/// ヘッダ相当の44バイト + 8kHz・16ビットPCM
fn fake_wav(samples: usize) -> Vec<u8> {
    let mut data = vec![0_u8; WAV_HEADER_BYTES];
    data.extend(encode(&vec![0.25_f32; samples], 16).expect("encode"));
    data
}

#[test]
fn chunks_skip_header_and_keep_short_tail() {
    let data = fake_wav(1_000);
    let chunks = perf::pcm_chunks(&data).expect("chunks");

    // 2000バイト = 640 * 3 + 80
    assert_eq!(chunks.len(), 4);
    assert!(chunks[..3].iter().all(|c| c.len() == CHUNK_BYTES));
    assert_eq!(chunks[3].len(), 80);
}

#[test]
fn too_small_input_is_rejected() {
    assert_eq!(
        perf::pcm_chunks(&[0; 10]),
        Err(PerfError::TooSmall { len: 10 })
    );
}

#[test]
fn run_once_filters_every_batch() {
    // 16000サンプル = 32000バイト = 50チャンク
    let data = fake_wav(16_000);
    let mut pipeline = FilterPipeline::new(MockDenoiser::new());

    assert_eq!(perf::run_once(&mut pipeline, &data, 1).expect("run"), 50);
    assert_eq!(perf::run_once(&mut pipeline, &data, 4).expect("run"), 13);
    assert!(pipeline.denoiser().calls() > 0);
}

#[test]
fn zero_batch_size_is_rejected() {
    let mut pipeline = FilterPipeline::new(MockDenoiser::new());
    assert_eq!(
        perf::run_once(&mut pipeline, &fake_wav(100), 0),
        Err(PerfError::InvalidBatchSize)
    );
}

#[test]
fn backend_failure_reports_batch_index() {
    let data = fake_wav(8_000);
    let mut pipeline = FilterPipeline::new(MockDenoiser::new().failing_on(1));
    let err = perf::run_once(&mut pipeline, &data, 10).unwrap_err();

    assert!(matches!(
        err,
        PerfError::Filter {
            batch: 0,
            source: FilterError::Denoiser(DenoiserError::Processing { .. }),
        }
    ));
}
