use rnnoise_filter::audio_pipeline::framer::frame_count;
use rnnoise_filter::audio_pipeline::{
    segment, BitDepth, FormatError, Frame, FrameReconstructor, SampleBuffer, FRAME_SIZE,
    INFERENCE_SAMPLE_RATE,
};

fn buffer_48k(len: usize) -> SampleBuffer {
    let samples = (0..len).map(|i| 0.1 + (i % 7) as f32 * 0.01).collect();
    SampleBuffer::mono(samples, INFERENCE_SAMPLE_RATE, BitDepth::Sixteen)
}

#[test]
fn segment_produces_ceil_frame_count() {
    for len in [0, 1, 479, 480, 481, 960, 4_801] {
        let frames = segment(&buffer_48k(len)).expect("segment");
        assert_eq!(frames.len(), frame_count(len), "len = {len}");
        assert!(frames.iter().all(|frame| frame.len() == FRAME_SIZE));
    }
}

#[test]
fn last_frame_is_zero_padded() {
    let buffer = buffer_48k(FRAME_SIZE + 5);
    let frames = segment(&buffer).expect("segment");

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].as_slice(), &buffer.samples[..FRAME_SIZE]);
    assert_eq!(&frames[1].as_slice()[..5], &buffer.samples[FRAME_SIZE..]);
    assert!(frames[1].as_slice()[5..].iter().all(|&s| s == 0.0));
}

#[test]
fn segment_requires_inference_rate() {
    let buffer = SampleBuffer::mono(vec![0.0; 960], 16_000, BitDepth::Sixteen);
    assert_eq!(
        segment(&buffer),
        Err(FormatError::UnexpectedSampleRate {
            expected: INFERENCE_SAMPLE_RATE,
            actual: 16_000,
        })
    );
}

#[test]
fn silent_frame_has_zero_rms() {
    let frame = Frame::silent();
    assert_eq!(frame.rms(), 0.0);
    assert_eq!(frame.into_vec(), vec![0.0; FRAME_SIZE]);
}

#[test]
fn reconstructor_emits_full_frames_only() {
    let mut reconstructor = FrameReconstructor::new();

    assert!(reconstructor.push(&[0.25; 300]).is_empty());
    assert_eq!(reconstructor.pending(), 300);

    let frames = reconstructor.push(&[0.5; 300]);
    assert_eq!(frames.len(), 1);
    assert_eq!(reconstructor.pending(), 120);
    assert_eq!(frames[0].as_slice()[299], 0.25);
    assert_eq!(frames[0].as_slice()[300], 0.5);

    let frames = reconstructor.push(&[0.5; 1_000]);
    assert_eq!(frames.len(), 2);
    assert_eq!(reconstructor.pending(), 160);
}

#[test]
fn reconstructor_flush_pads_remainder() {
    let mut reconstructor = FrameReconstructor::new();
    reconstructor.push(&[0.75; 10]);

    let last = reconstructor.flush().expect("pending samples");
    assert_eq!(&last.as_slice()[..10], &[0.75; 10]);
    assert!(last.as_slice()[10..].iter().all(|&s| s == 0.0));
    assert_eq!(reconstructor.pending(), 0);
    assert!(reconstructor.flush().is_none());
}
