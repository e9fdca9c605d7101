//! 音频解码模块
//!
//! 负责打开输入、选择第一个音频流并驱动 symphonia 解码。
//!
//! **使用 `AudioStreamDecoder`** - 单音频流解码会话

// 内部子模块（仅供decoder使用）
mod error_handling;

pub mod decoder;
pub mod format;
pub mod frame;
pub mod stream;

pub use decoder::{AudioStreamDecoder, DecodeOptions};
pub use format::{SampleEncoding, SampleFormat, SampleLayout, StreamInfo};
pub use frame::RawFrame;
pub use stream::{DecodeInput, find_audio_stream, is_audio_track, open_input};
