//! 声道样本分离
//!
//! 将解码帧按声道拆分为归一化的 f32 序列（按样本顺序）：
//! - 平面排布：声道 c 读取平面 c，第 s 个样本位于 `s * 宽度`
//! - 交错排布：所有声道位于平面 0，第 s 个样本位于 `(s * 声道数 + c) * 宽度`

use super::sample_conversion::{check_sample_format, normalize_buffer, normalize_checked};
use crate::audio::frame::RawFrame;
use crate::error::{AudioError, AudioResult};

#[cfg(debug_assertions)]
macro_rules! debug_separation {
    ($($arg:tt)*) => {
        eprintln!("[CHANNEL_DEBUG] {}", format_args!($($arg)*));
    };
}

#[cfg(not(debug_assertions))]
macro_rules! debug_separation {
    ($($arg:tt)*) => {};
}

/// 提取单个声道的样本（写入预分配缓冲区）
///
/// `output` 会先被清空，在循环中复用可避免每帧分配。
pub fn extract_channel_into(
    frame: &RawFrame,
    channel_idx: usize,
    output: &mut Vec<f32>,
) -> AudioResult<()> {
    output.clear();

    let channels = frame.channels();
    if channel_idx >= channels {
        return Err(AudioError::ReceiveError(format!(
            "channel {channel_idx} out of range (frame has {channels})"
        )));
    }

    let format = frame.format();
    if frame.is_planar() {
        // 每个声道的数据都在独立的缓冲区中
        normalize_buffer(format, &frame.planes()[channel_idx], output)?;
        return Ok(());
    }

    // 所有声道的数据在同一缓冲区中
    check_sample_format(format)?;
    let width = format.bytes_per_sample;
    output.reserve(frame.samples());
    output.extend(
        frame.planes()[0]
            .chunks_exact(width)
            .skip(channel_idx)
            .step_by(channels)
            .take(frame.samples())
            .map(|bytes| normalize_checked(format, bytes)),
    );
    Ok(())
}

/// 分离所有声道
pub fn separate_channels(frame: &RawFrame) -> AudioResult<Vec<Vec<f32>>> {
    debug_separation!(
        "separating {} channel(s) x {} sample(s), format={}",
        frame.channels(),
        frame.samples(),
        frame.format().display_name()
    );

    (0..frame.channels())
        .map(|c| {
            let mut samples = Vec::with_capacity(frame.samples());
            extract_channel_into(frame, c, &mut samples)?;
            Ok(samples)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::format::{SampleEncoding, SampleFormat, SampleLayout};

    fn s16_bytes(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[test]
    fn test_planar_and_interleaved_agree() {
        let left = [0i16, 16384, i16::MAX];
        let right = [-16384i16, i16::MIN, 0];

        let planar = RawFrame::from_planes(
            SampleFormat::S16.with_layout(SampleLayout::Planar),
            2,
            3,
            vec![s16_bytes(&left), s16_bytes(&right)],
        )
        .unwrap();

        let interleaved: Vec<i16> = left
            .iter()
            .zip(right.iter())
            .flat_map(|(l, r)| [*l, *r])
            .collect();
        let packed =
            RawFrame::from_planes(SampleFormat::S16, 2, 3, vec![s16_bytes(&interleaved)]).unwrap();

        let from_planar = separate_channels(&planar).unwrap();
        let from_packed = separate_channels(&packed).unwrap();
        assert_eq!(from_planar, from_packed);
        assert_eq!(from_planar[0][2], 1.0);
        assert_eq!(from_planar[1][1], -1.0);
    }

    #[test]
    fn test_extract_channel_clears_output() {
        let frame = RawFrame::from_planes(
            SampleFormat::FLT,
            1,
            2,
            vec![[0.5f32, -0.5].iter().flat_map(|v| v.to_ne_bytes()).collect()],
        )
        .unwrap();

        let mut out = vec![9.0; 8];
        extract_channel_into(&frame, 0, &mut out).unwrap();
        assert_eq!(out, vec![0.5, -0.5]);
    }

    #[test]
    fn test_channel_out_of_range() {
        let frame = RawFrame::from_planes(SampleFormat::U8, 1, 1, vec![vec![128]]).unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            extract_channel_into(&frame, 1, &mut out),
            Err(AudioError::ReceiveError(_))
        ));
    }

    #[test]
    fn test_unsupported_format_is_fatal() {
        let half = SampleFormat::new(SampleEncoding::Float, 2, SampleLayout::Interleaved);
        let frame = RawFrame::from_planes(half, 1, 2, vec![vec![0; 4]]).unwrap();
        let err = separate_channels(&frame).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleFormat(_)));
    }
}
