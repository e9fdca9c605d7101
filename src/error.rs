//! 统一错误处理框架
//!
//! 解码流程中的所有失败都是致命的：每个错误变体携带固定的退出码与
//! 面向宿主的提示文本，由处理器统一写入状态记录后终止本次解码。

use std::fmt;
use std::io;

/// 解码流程相关的统一错误类型
#[derive(Debug)]
pub enum AudioError {
    /// 命令行/调用参数错误
    InvalidInput(String),

    /// 输入无法打开或无法识别容器格式
    OpenInput(String),

    /// 容器内没有任何音频流
    NoAudioStream,

    /// 找不到对应的解码器
    UnsupportedCodec(String),

    /// 编解码参数不完整（缺少采样率、声道数等）
    InvalidCodecParameters(String),

    /// 解码器初始化失败
    DecoderInit(String),

    /// 样本字节宽度不受支持（仅支持 1/2/4/8 字节）
    InvalidSampleSize(usize),

    /// 样本格式不受支持
    InvalidSampleFormat(String),

    /// 取出解码帧失败（帧数据与声明的格式不一致等）
    ReceiveError(String),

    /// 向解码器送包失败（损坏的数据包、解码器内部错误）
    SendError(String),

    /// 从容器读取数据包失败
    ReadError(String),

    /// 输出声道文件创建/写入失败
    OutputError(io::Error),
}

/// 退出码定义（与宿主约定，保持稳定）
pub mod exit_codes {
    /// 解码成功
    pub const SUCCESS: i32 = 0;
    pub const OPEN_INPUT: i32 = 1;
    pub const NO_AUDIO_STREAM: i32 = 2;
    pub const UNSUPPORTED_CODEC: i32 = 3;
    pub const INVALID_CODEC_PARAMETERS: i32 = 5;
    pub const DECODER_INIT: i32 = 6;
    pub const INVALID_SAMPLE_SIZE: i32 = 8;
    pub const INVALID_SAMPLE_FORMAT: i32 = 9;
    pub const RECEIVE_ERROR: i32 = 10;
    pub const SEND_ERROR: i32 = 11;
    pub const READ_ERROR: i32 = 12;
    pub const OUTPUT_ERROR: i32 = 13;
    /// 用法错误（参考 sysexits 的 EX_USAGE）
    pub const INVALID_INPUT: i32 = 64;
}

impl AudioError {
    /// 获取与宿主约定的退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            AudioError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            AudioError::OpenInput(_) => exit_codes::OPEN_INPUT,
            AudioError::NoAudioStream => exit_codes::NO_AUDIO_STREAM,
            AudioError::UnsupportedCodec(_) => exit_codes::UNSUPPORTED_CODEC,
            AudioError::InvalidCodecParameters(_) => exit_codes::INVALID_CODEC_PARAMETERS,
            AudioError::DecoderInit(_) => exit_codes::DECODER_INIT,
            AudioError::InvalidSampleSize(_) => exit_codes::INVALID_SAMPLE_SIZE,
            AudioError::InvalidSampleFormat(_) => exit_codes::INVALID_SAMPLE_FORMAT,
            AudioError::ReceiveError(_) => exit_codes::RECEIVE_ERROR,
            AudioError::SendError(_) => exit_codes::SEND_ERROR,
            AudioError::ReadError(_) => exit_codes::READ_ERROR,
            AudioError::OutputError(_) => exit_codes::OUTPUT_ERROR,
        }
    }

    /// 获取写入状态记录的固定提示文本（不含细节，便于宿主匹配）
    pub fn exit_message(&self) -> &'static str {
        match self {
            AudioError::InvalidInput(_) => "invalid input",
            AudioError::OpenInput(_) => "cannot open input file",
            AudioError::NoAudioStream => "none of the available streams are audio streams",
            AudioError::UnsupportedCodec(_) => "the codec is not supported",
            AudioError::InvalidCodecParameters(_) => "cannot set codec context parameters",
            AudioError::DecoderInit(_) => "cannot initialize the decoder",
            AudioError::InvalidSampleSize(_) => "invalid sample size",
            AudioError::InvalidSampleFormat(_) => "invalid sample format",
            AudioError::ReceiveError(_) => "receive error",
            AudioError::SendError(_) => "send error",
            AudioError::ReadError(_) => "read error",
            AudioError::OutputError(_) => "cannot write output file",
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.exit_message();
        match self {
            AudioError::NoAudioStream => write!(f, "{msg}"),
            AudioError::InvalidSampleSize(size) => write!(f, "{msg}: {size} bytes"),
            AudioError::OutputError(err) => write!(f, "{msg}: {err}"),
            AudioError::InvalidInput(detail)
            | AudioError::OpenInput(detail)
            | AudioError::UnsupportedCodec(detail)
            | AudioError::InvalidCodecParameters(detail)
            | AudioError::DecoderInit(detail)
            | AudioError::InvalidSampleFormat(detail)
            | AudioError::ReceiveError(detail)
            | AudioError::SendError(detail)
            | AudioError::ReadError(detail) => write!(f, "{msg}: {detail}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AudioError::OutputError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AudioError {
    fn from(err: io::Error) -> Self {
        AudioError::OutputError(err)
    }
}

/// 解码操作的标准Result类型
pub type AudioResult<T> = Result<T, AudioError>;

// ==================== 错误转换Helper函数 ====================
// 消除重复的 .map_err(|e| AudioError::XXX(format!(...))) 模式

/// 创建输入打开错误的helper函数
#[inline]
pub fn open_error<E: fmt::Display>(context: &str, err: E) -> AudioError {
    AudioError::OpenInput(format!("{context}: {err}"))
}

// ==================== 错误分类系统 ====================

/// 错误类别枚举（用于给出处理建议）
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ErrorCategory {
    /// 输入文件或参数问题
    Input,
    /// 容器/编解码器不受支持
    Format,
    /// 解码过程中的数据问题
    Decoding,
    /// 输出写入问题
    Io,
}

impl ErrorCategory {
    /// 从AudioError提取错误类别
    pub fn from_audio_error(e: &AudioError) -> Self {
        match e {
            AudioError::InvalidInput(_) | AudioError::OpenInput(_) => Self::Input,
            AudioError::NoAudioStream
            | AudioError::UnsupportedCodec(_)
            | AudioError::InvalidCodecParameters(_)
            | AudioError::DecoderInit(_) => Self::Format,
            AudioError::InvalidSampleSize(_)
            | AudioError::InvalidSampleFormat(_)
            | AudioError::ReceiveError(_)
            | AudioError::SendError(_)
            | AudioError::ReadError(_) => Self::Decoding,
            AudioError::OutputError(_) => Self::Io,
        }
    }

    /// 从退出码反推错误类别（成功或未知退出码返回None）
    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            exit_codes::INVALID_INPUT | exit_codes::OPEN_INPUT => Some(Self::Input),
            exit_codes::NO_AUDIO_STREAM
            | exit_codes::UNSUPPORTED_CODEC
            | exit_codes::INVALID_CODEC_PARAMETERS
            | exit_codes::DECODER_INIT => Some(Self::Format),
            exit_codes::INVALID_SAMPLE_SIZE
            | exit_codes::INVALID_SAMPLE_FORMAT
            | exit_codes::RECEIVE_ERROR
            | exit_codes::SEND_ERROR
            | exit_codes::READ_ERROR => Some(Self::Decoding),
            exit_codes::OUTPUT_ERROR => Some(Self::Io),
            _ => None,
        }
    }

    /// 获取错误类别的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Input => "输入错误",
            Self::Format => "格式错误",
            Self::Decoding => "解码错误",
            Self::Io => "I/O错误",
        }
    }

    /// 获取处理建议
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Input => {
                "检查文件路径是否正确，文件是否存在且可读 / Check if file path is correct, file exists and is readable"
            }
            Self::Format => {
                "确保输入文件包含受支持编码的音频流 / Ensure the input contains an audio stream in a supported codec"
            }
            Self::Decoding => {
                "文件可能损坏或使用不支持的样本格式 / File may be corrupted or use an unsupported sample format"
            }
            Self::Io => {
                "检查输出目录是否存在且可写 / Check that the output directory exists and is writable"
            }
        }
    }
}
