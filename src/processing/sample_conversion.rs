//! 音频样本归一化
//!
//! 将解码帧中 1/2/4/8 字节宽的整数或浮点样本转换为 [-1.0, 1.0] 区间的 f32。
//! 样本字节按本机字节序解释（与解码帧的生成方式一致）。

use crate::audio::format::{SampleEncoding, SampleFormat};
use crate::error::{AudioError, AudioResult};

/// 检查样本字节宽度（仅支持 1/2/4/8 字节）
#[inline]
pub fn check_sample_size(bytes_per_sample: usize) -> AudioResult<usize> {
    match bytes_per_sample {
        1 | 2 | 4 | 8 => Ok(bytes_per_sample),
        other => Err(AudioError::InvalidSampleSize(other)),
    }
}

/// 检查格式是否可归一化
///
/// 先检查字节宽度，再检查编码方式；非常规组合（如2字节浮点、
/// 多字节无符号整数）视为不支持的样本格式。
pub fn check_sample_format(format: &SampleFormat) -> AudioResult<()> {
    check_sample_size(format.bytes_per_sample)?;
    match (format.encoding, format.bytes_per_sample) {
        (SampleEncoding::Unsigned, 1)
        | (SampleEncoding::Signed, 2 | 4 | 8)
        | (SampleEncoding::Float, 4 | 8) => Ok(()),
        _ => Err(AudioError::InvalidSampleFormat(format.display_name())),
    }
}

/// 整数位宽对应的最大正值（2^(bits-1) - 1）
#[inline]
fn max_magnitude(bytes_per_sample: usize) -> f64 {
    ((1u64 << (bytes_per_sample * 8 - 1)) - 1) as f64
}

/// 将整数按位宽缩放到 [-1, 1]
///
/// 除数取最大正值，最小负值会略超出 -1，因此结果需要钳位。
#[inline]
fn scale_integer(value: i64, bytes_per_sample: usize) -> f32 {
    (value as f64 / max_magnitude(bytes_per_sample)).clamp(-1.0, 1.0) as f32
}

/// 转换单个样本
///
/// `bytes` 必须恰好是一个样本的字节（长度即样本宽度）。
pub fn normalize_sample(format: &SampleFormat, bytes: &[u8]) -> AudioResult<f32> {
    check_sample_format(format)?;
    if bytes.len() != format.bytes_per_sample {
        return Err(AudioError::InvalidSampleSize(bytes.len()));
    }
    Ok(normalize_checked(format, bytes))
}

/// 已完成格式与长度检查后的转换
///
/// 调用方必须先通过 `check_sample_format`。
#[inline]
pub(crate) fn normalize_checked(format: &SampleFormat, bytes: &[u8]) -> f32 {
    debug_assert!(
        check_sample_format(format).is_ok() && bytes.len() == format.bytes_per_sample,
        "normalize_checked called with unchecked format {}",
        format.display_name()
    );
    match (format.encoding, bytes) {
        // 8位样本总是无符号，以128为静音
        (SampleEncoding::Unsigned, [b]) => scale_integer(*b as i64 - 128, 1),
        (SampleEncoding::Signed, &[b0, b1]) => scale_integer(i16::from_ne_bytes([b0, b1]) as i64, 2),
        (SampleEncoding::Signed, &[b0, b1, b2, b3]) => {
            scale_integer(i32::from_ne_bytes([b0, b1, b2, b3]) as i64, 4)
        }
        (SampleEncoding::Signed, &[b0, b1, b2, b3, b4, b5, b6, b7]) => {
            scale_integer(i64::from_ne_bytes([b0, b1, b2, b3, b4, b5, b6, b7]), 8)
        }
        (SampleEncoding::Float, &[b0, b1, b2, b3]) => f32::from_ne_bytes([b0, b1, b2, b3]),
        (SampleEncoding::Float, &[b0, b1, b2, b3, b4, b5, b6, b7]) => {
            f64::from_ne_bytes([b0, b1, b2, b3, b4, b5, b6, b7]) as f32
        }
        // check_sample_format 已排除其他组合
        _ => 0.0,
    }
}

/// 转换一段连续样本（单个声道平面或完整交错缓冲区）
///
/// 输出追加到 `output`，返回转换的样本数。
pub fn normalize_buffer(format: &SampleFormat, bytes: &[u8], output: &mut Vec<f32>) -> AudioResult<usize> {
    check_sample_format(format)?;
    let width = format.bytes_per_sample;
    if bytes.len() % width != 0 {
        return Err(AudioError::ReceiveError(format!(
            "buffer length {} is not a multiple of sample size {width}",
            bytes.len()
        )));
    }

    let count = bytes.len() / width;
    output.reserve(count);
    output.extend(bytes.chunks_exact(width).map(|chunk| normalize_checked(format, chunk)));
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::SampleLayout;

    #[test]
    fn test_extremal_integers_map_to_unit() {
        let s16 = SampleFormat::S16;
        assert_eq!(normalize_sample(&s16, &i16::MAX.to_ne_bytes()).unwrap(), 1.0);
        assert_eq!(normalize_sample(&s16, &i16::MIN.to_ne_bytes()).unwrap(), -1.0);

        let s32 = SampleFormat::S32;
        assert_eq!(normalize_sample(&s32, &i32::MAX.to_ne_bytes()).unwrap(), 1.0);
        assert_eq!(normalize_sample(&s32, &i32::MIN.to_ne_bytes()).unwrap(), -1.0);

        let s64 = SampleFormat::S64;
        assert_eq!(normalize_sample(&s64, &i64::MAX.to_ne_bytes()).unwrap(), 1.0);
        assert_eq!(normalize_sample(&s64, &i64::MIN.to_ne_bytes()).unwrap(), -1.0);

        let u8f = SampleFormat::U8;
        assert_eq!(normalize_sample(&u8f, &[255]).unwrap(), 1.0);
        assert_eq!(normalize_sample(&u8f, &[0]).unwrap(), -1.0);
        assert_eq!(normalize_sample(&u8f, &[128]).unwrap(), 0.0);
    }

    #[test]
    fn test_mid_range_is_proportional() {
        let s16 = SampleFormat::S16;
        let half = normalize_sample(&s16, &16384i16.to_ne_bytes()).unwrap();
        assert!((half - 16384.0 / 32767.0).abs() < 1e-6);

        let quarter_neg = normalize_sample(&s16, &(-8192i16).to_ne_bytes()).unwrap();
        assert!((quarter_neg + 8192.0 / 32767.0).abs() < 1e-6);
    }

    #[test]
    fn test_float_passthrough_and_double_narrowing() {
        let flt = SampleFormat::FLT;
        assert_eq!(normalize_sample(&flt, &0.25f32.to_ne_bytes()).unwrap(), 0.25);

        let dbl = SampleFormat::DBL;
        let narrowed = normalize_sample(&dbl, &(-0.1f64).to_ne_bytes()).unwrap();
        assert_eq!(narrowed, -0.1f64 as f32);
    }

    #[test]
    fn test_invalid_sample_size() {
        let s24 = SampleFormat::new(SampleEncoding::Signed, 3, SampleLayout::Interleaved);
        assert!(matches!(
            normalize_sample(&s24, &[0, 0, 0]),
            Err(AudioError::InvalidSampleSize(3))
        ));
    }

    #[test]
    fn test_invalid_sample_format() {
        let half = SampleFormat::new(SampleEncoding::Float, 2, SampleLayout::Interleaved);
        let err = normalize_sample(&half, &[0, 0]).unwrap_err();
        assert_eq!(err.exit_code(), 9);

        let u16f = SampleFormat::new(SampleEncoding::Unsigned, 2, SampleLayout::Planar);
        assert!(matches!(
            check_sample_format(&u16f),
            Err(AudioError::InvalidSampleFormat(_))
        ));
    }

    #[test]
    fn test_normalize_buffer_rejects_partial_sample() {
        let mut out = Vec::new();
        let result = normalize_buffer(&SampleFormat::S16, &[0, 0, 0], &mut out);
        assert!(matches!(result, Err(AudioError::ReceiveError(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_normalize_buffer_appends() {
        let mut bytes = Vec::new();
        for v in [0i16, i16::MAX, i16::MIN] {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        let mut out = vec![0.5];
        let count = normalize_buffer(&SampleFormat::S16, &bytes, &mut out).unwrap();
        assert_eq!(count, 3);
        assert_eq!(out, vec![0.5, 0.0, 1.0, -1.0]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unchecked format")]
    fn test_unchecked_format_is_caught_in_debug_builds() {
        let half = SampleFormat::new(SampleEncoding::Float, 2, SampleLayout::Interleaved);
        let _ = normalize_checked(&half, &[0, 0]);
    }
}
