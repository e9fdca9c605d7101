//! 音频格式信息模块
//!
//! 定义解码帧的样本格式、声道排布以及对外报告的流信息。

use serde::Serialize;
use symphonia::core::codecs::CodecParameters;
use symphonia::core::sample::SampleFormat as SymphoniaSampleFormat;

/// 样本数值编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleEncoding {
    /// 无符号整数（以中点为静音）
    Unsigned,
    /// 有符号整数
    Signed,
    /// IEEE 浮点
    Float,
}

/// 声道数据排布
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleLayout {
    /// 所有声道交错存放在同一缓冲区：[L0, R0, L1, R1, ...]
    #[default]
    Interleaved,
    /// 每个声道独占一个缓冲区
    Planar,
}

/// 解码帧的样本格式
///
/// 由编码方式、每样本字节数和排布组成。任意组合都可以表示
/// （解码器可能上报非常规格式），但只有常规组合拥有名称并能被归一化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleFormat {
    pub encoding: SampleEncoding,
    pub bytes_per_sample: usize,
    pub layout: SampleLayout,
}

impl SampleFormat {
    pub const U8: Self = Self::interleaved(SampleEncoding::Unsigned, 1);
    pub const S16: Self = Self::interleaved(SampleEncoding::Signed, 2);
    pub const S32: Self = Self::interleaved(SampleEncoding::Signed, 4);
    pub const S64: Self = Self::interleaved(SampleEncoding::Signed, 8);
    pub const FLT: Self = Self::interleaved(SampleEncoding::Float, 4);
    pub const DBL: Self = Self::interleaved(SampleEncoding::Float, 8);

    /// 创建任意样本格式
    pub const fn new(encoding: SampleEncoding, bytes_per_sample: usize, layout: SampleLayout) -> Self {
        Self {
            encoding,
            bytes_per_sample,
            layout,
        }
    }

    const fn interleaved(encoding: SampleEncoding, bytes_per_sample: usize) -> Self {
        Self::new(encoding, bytes_per_sample, SampleLayout::Interleaved)
    }

    /// 是否为平面排布
    #[inline]
    pub fn is_planar(&self) -> bool {
        self.layout == SampleLayout::Planar
    }

    /// 返回相同编码、指定排布的格式
    #[inline]
    pub fn with_layout(self, layout: SampleLayout) -> Self {
        Self { layout, ..self }
    }

    /// 常规格式的短名称（u8/s16/s32/s64/flt/dbl，平面排布追加 `p`）
    pub fn name(&self) -> Option<&'static str> {
        let planar = self.is_planar();
        let name = match (self.encoding, self.bytes_per_sample, planar) {
            (SampleEncoding::Unsigned, 1, false) => "u8",
            (SampleEncoding::Unsigned, 1, true) => "u8p",
            (SampleEncoding::Signed, 2, false) => "s16",
            (SampleEncoding::Signed, 2, true) => "s16p",
            (SampleEncoding::Signed, 4, false) => "s32",
            (SampleEncoding::Signed, 4, true) => "s32p",
            (SampleEncoding::Signed, 8, false) => "s64",
            (SampleEncoding::Signed, 8, true) => "s64p",
            (SampleEncoding::Float, 4, false) => "flt",
            (SampleEncoding::Float, 4, true) => "fltp",
            (SampleEncoding::Float, 8, false) => "dbl",
            (SampleEncoding::Float, 8, true) => "dblp",
            _ => return None,
        };
        Some(name)
    }

    /// 用于日志/状态记录的名称（非常规格式显示为描述串）
    pub fn display_name(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => format!(
                "{:?}{}{}",
                self.encoding,
                self.bytes_per_sample * 8,
                if self.is_planar() { "p" } else { "" }
            )
            .to_lowercase(),
        }
    }

    /// 根据编解码参数预测解码器输出格式（在解出第一帧之前使用）
    ///
    /// 预测规则与帧协商（见 `frame` 模块）保持一致：
    /// 24位整数左对齐为32位，无符号格式重新偏置为有符号格式。
    pub fn predict(params: &CodecParameters, layout: SampleLayout) -> Self {
        let base = match params.sample_format {
            Some(SymphoniaSampleFormat::U8) | Some(SymphoniaSampleFormat::S8) => Self::U8,
            Some(SymphoniaSampleFormat::U16) | Some(SymphoniaSampleFormat::S16) => Self::S16,
            Some(SymphoniaSampleFormat::U24)
            | Some(SymphoniaSampleFormat::S24)
            | Some(SymphoniaSampleFormat::U32)
            | Some(SymphoniaSampleFormat::S32) => Self::S32,
            Some(SymphoniaSampleFormat::F32) => Self::FLT,
            Some(SymphoniaSampleFormat::F64) => Self::DBL,
            // 未声明样本格式：按位深推断，有损编码默认输出浮点
            None => match params.bits_per_sample {
                Some(bits) if bits <= 8 => Self::U8,
                Some(bits) if bits <= 16 => Self::S16,
                Some(bits) if bits <= 32 => Self::S32,
                _ => Self::FLT,
            },
        };
        base.with_layout(layout)
    }
}

/// 选中音频流的信息（写入状态记录）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamInfo {
    /// 编解码器完整名称
    #[serde(rename = "Codec Name")]
    pub codec_name: String,
    /// 音频流在容器轨道列表中的位置
    #[serde(rename = "Stream Index")]
    pub stream_index: usize,
    /// 输出帧的样本格式名称
    #[serde(rename = "Sample Format")]
    pub sample_format: String,
    #[serde(rename = "Sample Rate")]
    pub sample_rate: u32,
    /// 解码帧每样本字节数（非输出文件的字节数，输出固定为4字节f32）
    #[serde(rename = "Sample Size")]
    pub sample_size: usize,
    #[serde(rename = "Channels")]
    pub channels: usize,
}

impl StreamInfo {
    /// 用实际解码出的帧格式更新流信息
    pub fn confirm_format(&mut self, format: &SampleFormat) {
        self.sample_format = format.display_name();
        self.sample_size = format.bytes_per_sample;
    }
}
