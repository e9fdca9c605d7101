//! PCM Channel Decoder
//!
//! 将媒体容器中的单个音频流解码为逐声道的原始 f32 PCM 文件，
//! 并向宿主交付结构化的状态记录。
//!
//! ## 核心流程
//! - 打开输入并探测容器（symphonia）
//! - 选择第一个音频流，创建解码器
//! - 逐包解码，样本归一化到 [-1.0, 1.0]
//! - 平面/交错帧按声道写入 `channel_<N>` 文件
//! - 排空解码器，写出状态记录（退出码、版本、流信息）

pub mod audio;
pub mod error;
pub mod processing;
pub mod tools;

// 重新导出核心类型
pub use audio::{AudioStreamDecoder, DecodeInput, DecodeOptions, RawFrame, SampleFormat, StreamInfo};
pub use error::{AudioError, AudioResult, ErrorCategory};
pub use tools::{StatusRecord, decode_to_channels, run_decode};
