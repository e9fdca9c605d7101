//! 样本处理模块
//!
//! 解码帧的样本归一化与声道分离。

pub mod channel_separator;
pub mod sample_conversion;

pub use channel_separator::{extract_channel_into, separate_channels};
pub use sample_conversion::{check_sample_format, check_sample_size, normalize_buffer, normalize_sample};
