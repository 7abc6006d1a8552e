use rnnoise_filter::audio_pipeline::codec::{decode, encode};
use rnnoise_filter::audio_pipeline::{BitDepth, FormatError};

const DEPTHS: [BitDepth; 3] = [BitDepth::Sixteen, BitDepth::TwentyFour, BitDepth::ThirtyTwo];

#[test]
fn decodes_16bit_extremes() {
    let bytes = [0x00, 0x80, 0xFF, 0x7F, 0x00, 0x00];
    let samples = decode(&bytes, 16).expect("decode");

    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0], -1.0);
    assert_eq!(samples[1], 32767.0 / 32768.0);
    assert_eq!(samples[2], 0.0);
}

#[test]
fn decodes_24bit_negative_with_sign_extension() {
    // -1 と最小値
    let bytes = [0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80];
    let samples = decode(&bytes, 24).expect("decode");

    assert_eq!(samples, vec![-1.0 / 8_388_608.0, -1.0]);
}

#[test]
fn trailing_partial_sample_is_ignored() {
    let samples = decode(&[0x00, 0x40, 0x12], 16).expect("decode");
    assert_eq!(samples, vec![0.5]);

    let samples = decode(&[0x00, 0x00, 0x00, 0x40, 0x01], 32).expect("decode");
    assert_eq!(samples, vec![0.5]);
}

#[test]
fn empty_input_yields_empty_output() {
    for depth in DEPTHS {
        assert!(decode(&[], depth.bits()).expect("decode").is_empty());
        assert!(encode(&[], depth.bits()).expect("encode").is_empty());
    }
}

#[test]
fn unsupported_bit_depth_is_rejected() {
    assert_eq!(decode(&[0; 4], 8), Err(FormatError::UnsupportedBitDepth(8)));
    assert_eq!(encode(&[0.0], 12), Err(FormatError::UnsupportedBitDepth(12)));
}

#[test]
fn encode_clamps_out_of_range_samples() {
    let bytes = encode(&[2.0, -3.5, 1.0, -1.0], 16).expect("encode");
    assert_eq!(bytes, vec![0xFF, 0x7F, 0x01, 0x80, 0xFF, 0x7F, 0x01, 0x80]);
}

#[test]
fn encode_output_length_matches_bit_depth() {
    let samples = vec![0.25_f32; 7];
    for depth in DEPTHS {
        let bytes = encode(&samples, depth.bits()).expect("encode");
        assert_eq!(bytes.len(), samples.len() * depth.bytes_per_sample());
    }
}

#[test]
fn encode_24bit_truncates_toward_zero() {
    // 0.5 * 8388607 = 4194303.5 -> 4194303 (0x3FFFFF)
    let bytes = encode(&[0.5, -0.5], 24).expect("encode");
    assert_eq!(bytes, vec![0xFF, 0xFF, 0x3F, 0x01, 0x00, 0xC0]);
}

#[test]
fn round_trip_of_exact_values_stays_within_one_step() {
    for depth in DEPTHS {
        let samples = [-1.0_f32, -0.5, -0.25, 0.0, 0.25, 0.5, 1.0];
        let bytes = encode(&samples, depth.bits()).expect("encode");
        let decoded = decode(&bytes, depth.bits()).expect("decode");

        assert_eq!(decoded.len(), samples.len());
        let bound = 1.0 / depth.decode_scale() + 1e-12;
        for (original, restored) in samples.iter().zip(&decoded) {
            let error = f64::from((original - restored).abs());
            assert!(
                error <= bound,
                "{:?}: {} -> {} (error {})",
                depth,
                original,
                restored,
                error
            );
        }
    }
}

#[test]
fn round_trip_sweep_error_is_bounded() {
    // 切り捨てと非対称スケールの組み合わせでは誤差は 2/scale 未満
    for depth in [BitDepth::Sixteen, BitDepth::TwentyFour] {
        let samples: Vec<f32> = (-100..=100).map(|i| i as f32 / 100.0).collect();
        let bytes = encode(&samples, depth.bits()).expect("encode");
        let decoded = decode(&bytes, depth.bits()).expect("decode");

        let bound = 2.0 / depth.decode_scale();
        for (original, restored) in samples.iter().zip(&decoded) {
            assert!(f64::from((original - restored).abs()) < bound);
        }
    }
}

#[test]
fn round_trip_sweep_32bit_is_bounded_by_f32_precision() {
    let depth = BitDepth::ThirtyTwo;
    let samples: Vec<f32> = (-1000..=1000).map(|i| i as f32 / 1000.0).collect();
    let bytes = encode(&samples, depth.bits()).expect("encode");
    assert_eq!(bytes.len(), samples.len() * 4);
    let decoded = decode(&bytes, depth.bits()).expect("decode");

    // 整数化の誤差（< 2/2^31）に f32 への丸めが加わる
    let bound = 2.0 / depth.decode_scale() + f64::from(f32::EPSILON);
    for (original, restored) in samples.iter().zip(&decoded) {
        assert!(
            f64::from((original - restored).abs()) <= bound,
            "{} -> {}",
            original,
            restored
        );
    }
    assert_eq!(decoded[0], -1.0);
    assert_eq!(decoded[1000], 0.0);
    assert_eq!(decoded[2000], 1.0);
}
