//! 解码任务处理模块
//!
//! 串起一次完整的解码：打开 → 逐帧写出 → 排空 → 关闭，并把结果写入状态记录。

use super::channel_files::{ChannelWriters, remove_channel_files, take_channels};
use super::cli::AppConfig;
use super::formatter::format_stream_table;
use super::status::StatusRecord;
use super::utils::extract_filename_lossy;
use crate::audio::{AudioStreamDecoder, DecodeInput, DecodeOptions};
use crate::error::{AudioResult, ErrorCategory};
use std::path::Path;

/// 解码到逐声道文件
///
/// 成功返回每声道写出的样本数。流信息在解码器打开后立即写入 `status`，
/// 排空后再以确认过的样本格式覆盖一次。
pub fn decode_to_channels(
    input: DecodeInput,
    output_dir: &Path,
    options: DecodeOptions,
    status: &mut StatusRecord,
) -> AudioResult<u64> {
    let mut decoder = AudioStreamDecoder::open(input, options)?;
    status.set_stream(decoder.stream_info().clone());

    std::fs::create_dir_all(output_dir)?;
    let mut writers = ChannelWriters::create(output_dir, decoder.channels())?;

    // 每个数据包可能产生多帧，逐帧写出
    while let Some(frame) = decoder.next_frame()? {
        writers.write_frame(&frame)?;
    }

    decoder.drain()?;
    status.set_stream(decoder.stream_info().clone());

    writers.finish()
}

/// 执行一次解码并生成完整的状态记录（不会失败，错误体现在记录中）
pub fn run_decode(input: DecodeInput, output_dir: &Path, options: DecodeOptions) -> StatusRecord {
    let mut status = StatusRecord::new();
    match decode_to_channels(input, output_dir, options, &mut status) {
        Ok(frames) => status.finish_ok(frames),
        Err(error) => status.finish_err(&error),
    }
    status
}

/// 解码结果读回内存
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub status: StatusRecord,
    /// 每个声道的归一化样本
    pub channels: Vec<Vec<f32>>,
}

/// 解码后立即读回声道数据并删除中间文件
///
/// 宿主不需要落盘结果时使用；`work_dir` 用于存放中间声道文件。
/// 解码失败时返回的状态记录携带错误，声道数据为空。
pub fn decode_into_memory(
    input: DecodeInput,
    work_dir: &Path,
    options: DecodeOptions,
) -> AudioResult<DecodedAudio> {
    let status = run_decode(input, work_dir, options);
    let channel_count = status.stream.as_ref().map_or(0, |s| s.channels);

    // 读回失败时也要清理中间文件
    let channels = if status.is_success() {
        take_channels(work_dir, channel_count)?
    } else {
        remove_channel_files(work_dir, channel_count)?;
        Vec::new()
    };

    Ok(DecodedAudio { status, channels })
}

/// 处理命令行指定的输入文件
pub fn process_audio_file(config: &AppConfig) -> StatusRecord {
    if config.verbose {
        eprintln!(
            "[PROCESSING] 解码 / Decoding: {}",
            extract_filename_lossy(&config.input_path)
        );
    }

    let status = run_decode(
        DecodeInput::from_path(&config.input_path),
        &config.output_dir,
        config.decode_options(),
    );

    if config.verbose
        && let Some(info) = &status.stream
    {
        eprintln!("{}", format_stream_table(info, status.frames));
    }

    status
}

/// 打印失败原因与建议（标准错误输出）
pub fn report_failure(status: &StatusRecord) {
    let message = status.exit_message.as_deref().unwrap_or("unknown error");
    let detail = status.exit_detail.as_deref().unwrap_or(message);
    eprintln!(
        "[ERROR] 错误 / Error ({}): {detail}",
        status.process_exit_code()
    );
    if let Some(category) = status.exit_code.and_then(ErrorCategory::from_exit_code) {
        eprintln!(
            "[INFO] 类别 / Category: {} - 建议 / Suggestion: {}",
            category.display_name(),
            category.suggestion()
        );
    }
}
