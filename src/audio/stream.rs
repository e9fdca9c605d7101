//! 输入打开与音频流选择
//!
//! 输入可以是文件路径，也可以是宿主直接交给我们的内存字节。
//! 容器探测完全由 symphonia 完成。

use crate::error::{self, AudioError, AudioResult};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// 解码输入
#[derive(Debug, Clone)]
pub enum DecodeInput {
    /// 文件系统路径
    Path(PathBuf),
    /// 内存中的完整文件内容；`name` 仅用于推断扩展名提示
    Bytes { name: String, data: Vec<u8> },
}

impl DecodeInput {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        DecodeInput::Path(path.into())
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        DecodeInput::Bytes {
            name: name.into(),
            data,
        }
    }

    /// 用于日志显示的名称
    pub fn display_name(&self) -> String {
        match self {
            DecodeInput::Path(path) => path.display().to_string(),
            DecodeInput::Bytes { name, .. } => name.clone(),
        }
    }

    /// 扩展名提示（小写）
    pub fn extension_hint(&self) -> Option<String> {
        let ext = match self {
            DecodeInput::Path(path) => path.extension(),
            DecodeInput::Bytes { name, .. } => Path::new(name).extension(),
        };
        ext.map(|e| e.to_string_lossy().to_lowercase())
    }

    fn into_media_source(self) -> AudioResult<Box<dyn MediaSource>> {
        match self {
            DecodeInput::Path(path) => {
                let file = std::fs::File::open(&path)
                    .map_err(|e| error::open_error(&path.display().to_string(), e))?;
                Ok(Box::new(file))
            }
            DecodeInput::Bytes { data, .. } => Ok(Box::new(Cursor::new(data))),
        }
    }
}

/// 打开输入并读取容器头
///
/// 无法打开或无法识别的输入统一报告为打开失败。
pub fn open_input(input: DecodeInput) -> AudioResult<Box<dyn FormatReader>> {
    let mut hint = Hint::new();
    if let Some(ext) = input.extension_hint() {
        hint.with_extension(&ext);
    }

    let display = input.display_name();
    let source = input.into_media_source()?;
    let mss = MediaSourceStream::new(source, Default::default());

    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| error::open_error(&display, e))?;

    Ok(probed.format)
}

/// 判断轨道是否为音频轨道
#[inline]
pub fn is_audio_track(track: &Track) -> bool {
    track.codec_params.codec != CODEC_TYPE_NULL
}

/// 查找第一个音频流，返回其在轨道列表中的位置
///
/// 注意：文件中可能有多个音频流，只使用找到的第一个。
pub fn find_audio_stream(tracks: &[Track]) -> AudioResult<usize> {
    tracks
        .iter()
        .position(is_audio_track)
        .ok_or(AudioError::NoAudioStream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::codecs::{CODEC_TYPE_FLAC, CodecParameters};

    fn track(id: u32, params: CodecParameters) -> Track {
        Track::new(id, params)
    }

    #[test]
    fn test_no_tracks_means_no_audio_stream() {
        let result = find_audio_stream(&[]);
        assert!(matches!(result, Err(AudioError::NoAudioStream)));
    }

    #[test]
    fn test_non_audio_tracks_are_skipped() {
        let mut flac = CodecParameters::new();
        flac.for_codec(CODEC_TYPE_FLAC);

        let tracks = vec![
            track(7, CodecParameters::new()),
            track(8, flac.clone()),
            track(9, flac),
        ];
        assert_eq!(find_audio_stream(&tracks).unwrap(), 1);
    }

    #[test]
    fn test_only_null_codecs_yields_code_2() {
        let tracks = vec![track(1, CodecParameters::new())];
        let err = find_audio_stream(&tracks).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_extension_hint() {
        assert_eq!(
            DecodeInput::from_path("/tmp/Song.FLAC").extension_hint().as_deref(),
            Some("flac")
        );
        assert_eq!(
            DecodeInput::from_bytes("clip.mp3", Vec::new())
                .extension_hint()
                .as_deref(),
            Some("mp3")
        );
        assert_eq!(DecodeInput::from_bytes("blob", Vec::new()).extension_hint(), None);
    }

    #[test]
    fn test_open_missing_file_is_open_error() {
        let result = open_input(DecodeInput::from_path("/nonexistent/definitely_missing.wav"));
        assert!(matches!(result, Err(AudioError::OpenInput(_))));
    }

    #[test]
    fn test_open_garbage_bytes_is_open_error() {
        let result = open_input(DecodeInput::from_bytes("noise.bin", vec![0x42; 512]));
        assert!(matches!(result, Err(AudioError::OpenInput(_))));
    }
}
