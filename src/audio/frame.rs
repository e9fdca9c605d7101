//! 解码帧缓冲
//!
//! `RawFrame` 是一次解码产出的原始音频单元：按协商后的样本格式保存
//! 本机字节序的样本字节，可以是交错排布（单个平面）或平面排布（每声道一个平面）。
//! symphonia 输出的类型化缓冲区在这里协商为常规格式。

use super::format::{SampleFormat, SampleLayout};
use crate::error::{AudioError, AudioResult};
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::sample::Sample;

/// 解码帧
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    format: SampleFormat,
    channels: usize,
    samples: usize,
    planes: Vec<Vec<u8>>,
}

impl RawFrame {
    /// 从已排布好的字节平面构建帧，并校验几何形状
    ///
    /// - 交错排布：恰好1个平面，长度 = 样本数 × 声道数 × 宽度
    /// - 平面排布：平面数 = 声道数，每个平面长度 = 样本数 × 宽度
    pub fn from_planes(
        format: SampleFormat,
        channels: usize,
        samples: usize,
        planes: Vec<Vec<u8>>,
    ) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::ReceiveError("frame has no channels".to_string()));
        }

        let width = format.bytes_per_sample;
        let (expected_planes, expected_len) = match format.layout {
            SampleLayout::Interleaved => (1, samples * channels * width),
            SampleLayout::Planar => (channels, samples * width),
        };

        if planes.len() != expected_planes {
            return Err(AudioError::ReceiveError(format!(
                "expected {expected_planes} plane(s), got {}",
                planes.len()
            )));
        }
        if let Some((idx, plane)) = planes
            .iter()
            .enumerate()
            .find(|(_, p)| p.len() != expected_len)
        {
            return Err(AudioError::ReceiveError(format!(
                "plane {idx} holds {} bytes, expected {expected_len}",
                plane.len()
            )));
        }

        Ok(Self {
            format,
            channels,
            samples,
            planes,
        })
    }

    /// 将 symphonia 解码缓冲区协商为常规样本格式，按指定排布输出
    pub fn from_symphonia(buffer: &AudioBufferRef<'_>, layout: SampleLayout) -> AudioResult<Self> {
        match buffer {
            AudioBufferRef::U8(buf) => Self::collect(&**buf, SampleFormat::U8, layout, |s| [s]),
            AudioBufferRef::S8(buf) => {
                Self::collect(&**buf, SampleFormat::U8, layout, |s| [(s as u8) ^ 0x80])
            }
            AudioBufferRef::S16(buf) => {
                Self::collect(&**buf, SampleFormat::S16, layout, |s| s.to_ne_bytes())
            }
            AudioBufferRef::U16(buf) => Self::collect(&**buf, SampleFormat::S16, layout, |s| {
                ((s ^ 0x8000) as i16).to_ne_bytes()
            }),
            AudioBufferRef::S24(buf) => Self::collect(&**buf, SampleFormat::S32, layout, |s| {
                (s.inner() << 8).to_ne_bytes()
            }),
            AudioBufferRef::U24(buf) => Self::collect(&**buf, SampleFormat::S32, layout, |s| {
                ((s.inner() as i32 - 0x80_0000) << 8).to_ne_bytes()
            }),
            AudioBufferRef::S32(buf) => {
                Self::collect(&**buf, SampleFormat::S32, layout, |s| s.to_ne_bytes())
            }
            AudioBufferRef::U32(buf) => Self::collect(&**buf, SampleFormat::S32, layout, |s| {
                ((s ^ 0x8000_0000) as i32).to_ne_bytes()
            }),
            AudioBufferRef::F32(buf) => {
                Self::collect(&**buf, SampleFormat::FLT, layout, |s| s.to_ne_bytes())
            }
            AudioBufferRef::F64(buf) => {
                Self::collect(&**buf, SampleFormat::DBL, layout, |s| s.to_ne_bytes())
            }
        }
    }

    /// 按排布收集样本字节
    fn collect<S, const N: usize>(
        buf: &AudioBuffer<S>,
        format: SampleFormat,
        layout: SampleLayout,
        to_bytes: impl Fn(S) -> [u8; N],
    ) -> AudioResult<Self>
    where
        S: Sample,
    {
        let channels = buf.spec().channels.count();
        let samples = buf.frames();
        let format = format.with_layout(layout);

        let planes = match layout {
            SampleLayout::Interleaved => {
                let mut plane = Vec::with_capacity(samples * channels * N);
                for s in 0..samples {
                    for c in 0..channels {
                        plane.extend_from_slice(&to_bytes(buf.chan(c)[s]));
                    }
                }
                vec![plane]
            }
            SampleLayout::Planar => (0..channels)
                .map(|c| {
                    buf.chan(c)
                        .iter()
                        .flat_map(|&sample| to_bytes(sample))
                        .collect::<Vec<u8>>()
                })
                .collect(),
        };

        Self::from_planes(format, channels, samples, planes)
    }

    pub fn format(&self) -> &SampleFormat {
        &self.format
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 每声道样本数
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn planes(&self) -> &[Vec<u8>] {
        &self.planes
    }

    pub fn is_planar(&self) -> bool {
        self.format.is_planar()
    }
}
