//! 单音频流解码会话
//!
//! 打开输入 → 选择第一个音频流 → 创建解码器 → 逐包解码 → 排空。
//! 所有容器解析与编解码工作都由 symphonia 完成，本模块只负责驱动流程
//! 并把解码结果协商为 `RawFrame`。

use super::error_handling::handle_symphonia_error;
use super::format::{SampleFormat, SampleLayout, StreamInfo};
use super::frame::RawFrame;
use super::stream::{DecodeInput, find_audio_stream, open_input};
use crate::error::{AudioError, AudioResult};
use symphonia::core::codecs::{CodecParameters, Decoder, DecoderOptions};
use symphonia::core::formats::FormatReader;

#[cfg(debug_assertions)]
macro_rules! debug_decoder {
    ($($arg:tt)*) => {
        eprintln!("[DECODER_DEBUG] {}", format_args!($($arg)*));
    };
}

#[cfg(not(debug_assertions))]
macro_rules! debug_decoder {
    ($($arg:tt)*) => {};
}

/// 解码选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// 解码帧的声道排布偏好（默认交错）
    pub layout: SampleLayout,
    /// 排空时校验解码结果（仅部分编解码器支持，如FLAC的MD5）
    pub verify: bool,
}

/// 单音频流解码器
pub struct AudioStreamDecoder {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    stream_info: StreamInfo,
    options: DecodeOptions,
    /// 第一帧解出后确认的实际样本格式
    confirmed_format: Option<SampleFormat>,
    packets_decoded: u64,
}

impl AudioStreamDecoder {
    /// 打开输入并初始化解码器
    pub fn open(input: DecodeInput, options: DecodeOptions) -> AudioResult<Self> {
        // 打开文件并读取容器头
        let reader = open_input(input)?;

        // 使用找到的第一个音频流
        let stream_index = find_audio_stream(reader.tracks())?;
        let track = &reader.tracks()[stream_index];
        let track_id = track.id;
        let params = track.codec_params.clone();

        // 查找对应的解码器
        let registry = symphonia::default::get_codecs();
        let descriptor = registry.get_codec(params.codec).ok_or_else(|| {
            AudioError::UnsupportedCodec(format!("no decoder registered for {:?}", params.codec))
        })?;

        let (sample_rate, channels) = Self::stream_geometry(&params)?;

        let decoder = registry
            .make(&params, &DecoderOptions { verify: options.verify })
            .map_err(|e| AudioError::DecoderInit(format!("{}: {e}", descriptor.short_name)))?;

        let predicted = SampleFormat::predict(&params, options.layout);
        let stream_info = StreamInfo {
            codec_name: descriptor.long_name.to_string(),
            stream_index,
            sample_format: predicted.display_name(),
            sample_rate,
            sample_size: predicted.bytes_per_sample,
            channels,
        };

        debug_decoder!(
            "opened stream #{stream_index} (track id {track_id}): {} {}Hz {}ch",
            descriptor.short_name,
            sample_rate,
            channels
        );

        Ok(Self {
            reader,
            decoder,
            track_id,
            stream_info,
            options,
            confirmed_format: None,
            packets_decoded: 0,
        })
    }

    /// 从编解码参数中取出采样率与声道数（输出文件需要在解码前创建）
    fn stream_geometry(params: &CodecParameters) -> AudioResult<(u32, usize)> {
        let sample_rate = params
            .sample_rate
            .filter(|&rate| rate > 0)
            .ok_or_else(|| AudioError::InvalidCodecParameters("missing sample rate".to_string()))?;
        let channels = params
            .channels
            .map(|ch| ch.count())
            .filter(|&count| count > 0)
            .ok_or_else(|| {
                AudioError::InvalidCodecParameters("missing channel layout".to_string())
            })?;
        Ok((sample_rate, channels))
    }

    /// 流信息（样本格式在第一帧解出后确认）
    pub fn stream_info(&self) -> &StreamInfo {
        &self.stream_info
    }

    /// 声道数
    pub fn channels(&self) -> usize {
        self.stream_info.channels
    }

    /// 已送入解码器的数据包数量
    pub fn packets_decoded(&self) -> u64 {
        self.packets_decoded
    }

    /// 解码下一帧
    ///
    /// 读取数据包、跳过其他流的包并送入解码器。返回 `Ok(None)` 表示流结束。
    pub fn next_frame(&mut self) -> AudioResult<Option<RawFrame>> {
        loop {
            let packet = match handle_symphonia_error!(
                packet: self.reader.next_packet(),
                self.decoder,
                AudioError::ReadError,
                "读取数据包失败 / failed to read packet"
            ) {
                Some(packet) => packet,
                None => continue,
            };

            // 数据包是否属于选中的流
            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(buffer) => Ok(RawFrame::from_symphonia(&buffer, self.options.layout)?),
                Err(e) => Err(e),
            };
            let frame = match handle_symphonia_error!(
                decode: decoded,
                self.decoder,
                AudioError::SendError,
                "解码数据包失败 / failed to decode packet"
            ) {
                Some(frame) => frame,
                None => continue,
            };
            self.packets_decoded += 1;

            self.check_frame(&frame)?;
            return Ok(Some(frame));
        }
    }

    /// 校验帧与已打开的输出一致，第一帧确认实际样本格式
    fn check_frame(&mut self, frame: &RawFrame) -> AudioResult<()> {
        check_frame_consistency(self.confirmed_format.as_ref(), self.stream_info.channels, frame)?;

        if self.confirmed_format.is_none() {
            let format = *frame.format();
            debug_decoder!("negotiated sample format: {}", format.display_name());
            self.stream_info.confirm_format(&format);
            self.confirmed_format = Some(format);
        }
        Ok(())
    }

    /// 排空解码器
    ///
    /// symphonia 解码器不缓存帧，排空即结束解码并取回校验结果。
    /// 启用校验且校验失败时视为致命错误。
    pub fn drain(&mut self) -> AudioResult<()> {
        let result = self.decoder.finalize();
        debug_decoder!(
            "drained after {} packet(s), verify_ok={:?}",
            self.packets_decoded,
            result.verify_ok
        );

        verification_outcome(result.verify_ok, self.options.verify)
    }
}

/// 帧与流的一致性检查
///
/// 声道数必须与打开输出时的声道数一致；已确认样本格式后，后续帧不得改变格式。
/// 不一致均为接收错误。
fn check_frame_consistency(
    confirmed: Option<&SampleFormat>,
    channels: usize,
    frame: &RawFrame,
) -> AudioResult<()> {
    if frame.channels() != channels {
        return Err(AudioError::ReceiveError(format!(
            "frame has {} channel(s), stream declared {channels}",
            frame.channels()
        )));
    }

    match confirmed {
        Some(format) if format != frame.format() => Err(AudioError::ReceiveError(format!(
            "sample format changed mid-stream: {} -> {}",
            format.display_name(),
            frame.format().display_name()
        ))),
        _ => Ok(()),
    }
}

/// 校验结果：仅在启用校验且校验失败时报错
fn verification_outcome(verify_ok: Option<bool>, verify: bool) -> AudioResult<()> {
    match verify_ok {
        Some(false) if verify => Err(AudioError::ReceiveError(
            "decoded audio failed verification".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s16_frame(channels: usize, samples: usize) -> RawFrame {
        RawFrame::from_planes(SampleFormat::S16, channels, samples, vec![vec![0; channels * samples * 2]])
            .unwrap()
    }

    #[test]
    fn test_first_frame_is_accepted() {
        assert!(check_frame_consistency(None, 2, &s16_frame(2, 4)).is_ok());
    }

    #[test]
    fn test_channel_mismatch_is_receive_error() {
        let err = check_frame_consistency(None, 2, &s16_frame(1, 4)).unwrap_err();
        assert!(matches!(err, AudioError::ReceiveError(_)));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_format_change_is_receive_error() {
        let float_frame = RawFrame::from_planes(SampleFormat::FLT, 2, 1, vec![vec![0; 8]]).unwrap();
        let err = check_frame_consistency(Some(&SampleFormat::S16), 2, &float_frame).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("s16 -> flt"));

        // 同一格式的后续帧正常通过
        assert!(check_frame_consistency(Some(&SampleFormat::S16), 2, &s16_frame(2, 3)).is_ok());
    }

    #[test]
    fn test_layout_change_counts_as_format_change() {
        let planar = SampleFormat::S16.with_layout(SampleLayout::Planar);
        let err = check_frame_consistency(Some(&planar), 2, &s16_frame(2, 1)).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_verification_only_fails_when_requested() {
        assert_eq!(
            verification_outcome(Some(false), true).unwrap_err().exit_code(),
            10
        );
        assert!(verification_outcome(Some(false), false).is_ok());
        assert!(verification_outcome(Some(true), true).is_ok());
        assert!(verification_outcome(None, true).is_ok());
    }
}
