//! PCMバイト列と正規化済みf32サンプルの相互変換
//!
//! 入力はリトルエンディアンの符号付き整数（16/24/32ビット、チャネルインターリーブ）。
//! デコードは 2^(n-1)、エンコードは 2^(n-1)-1 でスケーリングする。
use tracing::debug;

use super::error::FormatError;

/// 対応するビット深度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BitDepth {
    /// ビット数
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
            BitDepth::ThirtyTwo => 32,
        }
    }

    /// 1サンプルあたりのバイト数
    pub fn bytes_per_sample(self) -> usize {
        usize::from(self.bits() / 8)
    }

    /// 整数→f32 の除数
    pub fn decode_scale(self) -> f64 {
        match self {
            BitDepth::Sixteen => 32768.0,
            BitDepth::TwentyFour => 8388608.0,
            BitDepth::ThirtyTwo => 2147483648.0,
        }
    }

    /// f32→整数 の乗数
    pub fn encode_scale(self) -> f64 {
        match self {
            BitDepth::Sixteen => 32767.0,
            BitDepth::TwentyFour => 8388607.0,
            BitDepth::ThirtyTwo => 2147483647.0,
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = FormatError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            32 => Ok(BitDepth::ThirtyTwo),
            other => Err(FormatError::UnsupportedBitDepth(other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

/// PCMバイト列をf32サンプルへ変換
///
/// 末尾の端数バイト（1サンプルに満たない分）は無視する。
pub fn decode(bytes: &[u8], bit_depth: u16) -> Result<Vec<f32>, FormatError> {
    let depth = BitDepth::try_from(bit_depth)?;
    Ok(decode_with(bytes, depth))
}

/// ビット深度が確定している場合のデコード
pub fn decode_with(bytes: &[u8], depth: BitDepth) -> Vec<f32> {
    debug!(bytes = bytes.len(), bits = depth.bits(), "decode PCM");
    let samples: Vec<f32> = match depth {
        BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|b| normalize(i32::from(i16::from_le_bytes([b[0], b[1]])), depth))
            .collect(),
        BitDepth::TwentyFour => bytes
            .chunks_exact(3)
            .map(|b| normalize(read_i24(b[0], b[1], b[2]), depth))
            .collect(),
        BitDepth::ThirtyTwo => bytes
            .chunks_exact(4)
            .map(|b| normalize(i32::from_le_bytes([b[0], b[1], b[2], b[3]]), depth))
            .collect(),
    };
    debug!(samples = samples.len(), "decode PCM done");
    samples
}

/// f32サンプルをPCMバイト列へ変換（[-1.0, 1.0] にクランプ）
pub fn encode(samples: &[f32], bit_depth: u16) -> Result<Vec<u8>, FormatError> {
    let depth = BitDepth::try_from(bit_depth)?;
    Ok(encode_with(samples, depth))
}

/// ビット深度が確定している場合のエンコード
pub fn encode_with(samples: &[f32], depth: BitDepth) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * depth.bytes_per_sample());
    for &sample in samples {
        let value = quantize(sample, depth);
        match depth {
            BitDepth::Sixteen => out.extend_from_slice(&(value as i16).to_le_bytes()),
            // 下位バイトから3バイト
            BitDepth::TwentyFour => out.extend_from_slice(&value.to_le_bytes()[..3]),
            BitDepth::ThirtyTwo => out.extend_from_slice(&value.to_le_bytes()),
        }
    }
    out
}

/// 整数サンプルを正規化（`value / decode_scale`）
pub fn normalize(value: i32, depth: BitDepth) -> f32 {
    (f64::from(value) / depth.decode_scale()) as f32
}

/// 正規化サンプルをクランプして整数化（`clamp(x) * encode_scale`、0方向へ切り捨て）
pub fn quantize(sample: f32, depth: BitDepth) -> i32 {
    (f64::from(sample.clamp(-1.0, 1.0)) * depth.encode_scale()) as i32
}

/// 3バイトLEを符号拡張して i32 へ
fn read_i24(b0: u8, b1: u8, b2: u8) -> i32 {
    let sign = if b2 & 0x80 != 0 { 0xFF } else { 0x00 };
    i32::from_le_bytes([b0, b1, b2, sign])
}
