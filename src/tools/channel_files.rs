//! 逐声道输出文件
//!
//! 每个声道一个文件 `channel_<c>`，按样本顺序写入小端 f32。
//! 同时提供宿主侧的读回与清理函数。

use super::constants::output::{CHANNEL_FILE_PREFIX, OUTPUT_SAMPLE_BYTES};
use crate::audio::RawFrame;
use crate::error::{AudioError, AudioResult};
use crate::processing::extract_channel_into;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 声道文件路径
pub fn channel_file_path(dir: &Path, channel: usize) -> PathBuf {
    dir.join(format!("{CHANNEL_FILE_PREFIX}{channel}"))
}

/// 逐声道写入器
///
/// 解码开始前创建全部文件；出错时直接丢弃即可关闭所有句柄。
pub struct ChannelWriters {
    writers: Vec<BufWriter<File>>,
    paths: Vec<PathBuf>,
    samples_written: Vec<u64>,
    /// 复用的单声道转换缓冲区
    scratch: Vec<f32>,
}

impl ChannelWriters {
    /// 为每个声道创建输出文件（已存在的同名文件会被截断）
    pub fn create(dir: &Path, channels: usize) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::InvalidInput(
                "cannot create outputs for zero channels".to_string(),
            ));
        }

        let mut writers = Vec::with_capacity(channels);
        let mut paths = Vec::with_capacity(channels);
        for c in 0..channels {
            let path = channel_file_path(dir, c);
            let file = File::create(&path)?;
            writers.push(BufWriter::new(file));
            paths.push(path);
        }

        Ok(Self {
            writers,
            paths,
            samples_written: vec![0; channels],
            scratch: Vec::new(),
        })
    }

    pub fn channels(&self) -> usize {
        self.writers.len()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// 写入一帧：按声道拆分、归一化后追加到各自文件
    pub fn write_frame(&mut self, frame: &RawFrame) -> AudioResult<()> {
        if frame.channels() != self.writers.len() {
            return Err(AudioError::ReceiveError(format!(
                "frame has {} channel(s), {} output file(s) open",
                frame.channels(),
                self.writers.len()
            )));
        }

        for (c, writer) in self.writers.iter_mut().enumerate() {
            extract_channel_into(frame, c, &mut self.scratch)?;
            for sample in &self.scratch {
                writer.write_all(&sample.to_le_bytes())?;
            }
            self.samples_written[c] += self.scratch.len() as u64;
        }
        Ok(())
    }

    /// 刷新并关闭所有文件，返回每声道写出的样本数
    pub fn finish(self) -> AudioResult<u64> {
        for writer in self.writers {
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        }
        Ok(self.samples_written.into_iter().min().unwrap_or(0))
    }
}

/// 读回一个声道文件
pub fn read_channel_file(path: &Path) -> AudioResult<Vec<f32>> {
    let bytes = std::fs::read(path).map_err(|e| {
        AudioError::InvalidInput(format!("cannot read {}: {e}", path.display()))
    })?;
    if bytes.len() % OUTPUT_SAMPLE_BYTES != 0 {
        return Err(AudioError::InvalidInput(format!(
            "{} is truncated ({} bytes)",
            path.display(),
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(OUTPUT_SAMPLE_BYTES)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// 读回全部声道（宿主据此组装多声道缓冲区）
///
/// 帧数以声道0的文件大小为准，所有声道长度必须一致。
pub fn load_channels(dir: &Path, channels: usize) -> AudioResult<Vec<Vec<f32>>> {
    let data = (0..channels)
        .map(|c| read_channel_file(&channel_file_path(dir, c)))
        .collect::<AudioResult<Vec<_>>>()?;

    if let Some(first) = data.first()
        && let Some((c, other)) = data.iter().enumerate().find(|(_, d)| d.len() != first.len())
    {
        return Err(AudioError::InvalidInput(format!(
            "channel {c} holds {} samples, channel 0 holds {}",
            other.len(),
            first.len()
        )));
    }
    Ok(data)
}

/// 删除声道文件（不存在的文件忽略）
pub fn remove_channel_files(dir: &Path, channels: usize) -> AudioResult<()> {
    for c in 0..channels {
        match std::fs::remove_file(channel_file_path(dir, c)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// 读回全部声道后删除声道文件
///
/// 无论读回是否成功都会清理文件；清理失败仅在读回成功时上报。
pub fn take_channels(dir: &Path, channels: usize) -> AudioResult<Vec<Vec<f32>>> {
    let loaded = load_channels(dir, channels);
    let removed = remove_channel_files(dir, channels);
    let data = loaded?;
    removed?;
    Ok(data)
}
