//! 工具模块集合
//!
//! 包含CLI、输出文件、状态记录、格式化等工具模块，支持main.rs的流程控制。

pub mod channel_files;
pub mod cli;
pub mod constants;
pub mod formatter;
pub mod processor;
pub mod status;
pub mod utils;

// 重新导出主要的公共接口
pub use channel_files::{
    ChannelWriters, channel_file_path, load_channels, read_channel_file, remove_channel_files,
    take_channels,
};
pub use cli::{AppConfig, parse_args, show_startup_info, try_parse_args_from, usage_error};
pub use formatter::format_stream_table;
pub use processor::{
    DecodedAudio, decode_into_memory, decode_to_channels, process_audio_file, report_failure,
    run_decode,
};
pub use status::{StatusRecord, write_status};
