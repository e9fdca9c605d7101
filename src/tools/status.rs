//! 状态记录
//!
//! 每次解码向宿主交付一份结构化状态：退出码与消息、解码/解封装库版本、
//! 所选音频流的元数据。版本信息最先填写，流信息在解码器打开后填写，
//! 因此失败的解码同样会带回已知的部分。

use super::constants::status::{SUCCESS_MESSAGE, SYMPHONIA_VERSION, TOOL_VERSION};
use super::utils::get_parent_dir;
use crate::audio::StreamInfo;
use crate::error::{AudioError, AudioResult, exit_codes};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// 交付给宿主的状态记录
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    #[serde(rename = "Exit Code", skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(rename = "Exit Message", skip_serializing_if = "Option::is_none")]
    pub exit_message: Option<String>,
    /// 错误细节（成功时省略）
    #[serde(rename = "Exit Detail", skip_serializing_if = "Option::is_none")]
    pub exit_detail: Option<String>,
    #[serde(rename = "Decoder Version")]
    pub decoder_version: String,
    #[serde(rename = "Demuxer Version")]
    pub demuxer_version: String,
    #[serde(rename = "Tool Version")]
    pub tool_version: String,
    #[serde(flatten)]
    pub stream: Option<StreamInfo>,
    /// 每个声道写出的样本数
    #[serde(rename = "Frames", skip_serializing_if = "Option::is_none")]
    pub frames: Option<u64>,
    #[serde(rename = "Finished At", skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Local>>,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRecord {
    /// 创建只含版本信息的记录
    pub fn new() -> Self {
        Self {
            exit_code: None,
            exit_message: None,
            exit_detail: None,
            decoder_version: SYMPHONIA_VERSION.to_string(),
            demuxer_version: SYMPHONIA_VERSION.to_string(),
            tool_version: TOOL_VERSION.to_string(),
            stream: None,
            frames: None,
            finished_at: None,
        }
    }

    /// 记录选中流的信息
    pub fn set_stream(&mut self, info: StreamInfo) {
        self.stream = Some(info);
    }

    /// 以成功结束
    pub fn finish_ok(&mut self, frames: u64) {
        self.exit_code = Some(exit_codes::SUCCESS);
        self.exit_message = Some(SUCCESS_MESSAGE.to_string());
        self.exit_detail = None;
        self.frames = Some(frames);
        self.finished_at = Some(Local::now());
    }

    /// 以致命错误结束
    pub fn finish_err(&mut self, error: &AudioError) {
        self.exit_code = Some(error.exit_code());
        self.exit_message = Some(error.exit_message().to_string());
        self.exit_detail = Some(error.to_string());
        self.finished_at = Some(Local::now());
    }

    /// 是否成功结束
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(exit_codes::SUCCESS)
    }

    /// 进程退出码（未结束的记录视为成功前中断，返回通用失败码）
    pub fn process_exit_code(&self) -> i32 {
        self.exit_code.unwrap_or(1)
    }

    /// 序列化为格式化的JSON
    pub fn to_json(&self) -> AudioResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AudioError::OutputError(std::io::Error::other(e)))
    }
}

/// 交付状态记录：写入指定文件，未指定时写到标准输出
pub fn write_status(record: &StatusRecord, destination: Option<&Path>) -> AudioResult<()> {
    let json = record.to_json()?;
    match destination {
        Some(path) => {
            std::fs::create_dir_all(get_parent_dir(path))?;
            std::fs::write(path, format!("{json}\n"))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{json}")?;
            handle.flush()?;
        }
    }
    Ok(())
}
