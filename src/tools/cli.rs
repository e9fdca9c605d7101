//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use crate::audio::{DecodeOptions, SampleLayout};
use crate::error::{AudioError, AudioResult};
use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 输入音频文件路径
    pub input_path: PathBuf,

    /// 声道文件输出目录（默认当前目录）
    pub output_dir: PathBuf,

    /// 以平面排布请求解码帧（默认交错）
    pub planar: bool,

    /// 排空时校验解码结果
    pub verify: bool,

    /// 状态记录输出文件（未指定时写到标准输出）
    pub status_path: Option<PathBuf>,

    /// 是否显示详细信息
    pub verbose: bool,
}

impl AppConfig {
    /// 创建默认配置
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: PathBuf::from("."),
            planar: false,
            verify: false,
            status_path: None,
            verbose: false,
        }
    }

    /// 转换为解码选项
    #[inline]
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            layout: if self.planar {
                SampleLayout::Planar
            } else {
                SampleLayout::Interleaved
            },
            verify: self.verify,
        }
    }
}

/// 构建命令行定义
pub fn build_command() -> Command {
    Command::new("pcm-channel-decoder")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("MacinMeter Team")
        .arg(
            Arg::new("INPUT")
                .help("输入音频文件 / Input media file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("声道文件输出目录 / Directory for channel_<N> files")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("planar")
                .long("planar")
                .help("以平面排布请求解码帧 / Request planar decoded frames")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .help("校验解码结果（如FLAC MD5） / Verify decoded audio when the codec supports it")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("状态记录写入文件 / Write the status record to FILE instead of stdout")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息 / Show detailed progress")
                .action(clap::ArgAction::SetTrue),
        )
}

/// 从解析结果创建配置
pub fn config_from_matches(matches: &ArgMatches) -> AppConfig {
    let input_path = matches
        .get_one::<String>("INPUT")
        .map(PathBuf::from)
        .unwrap_or_default();

    AppConfig {
        input_path,
        output_dir: matches
            .get_one::<String>("output-dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        planar: matches.get_flag("planar"),
        verify: matches.get_flag("verify"),
        status_path: matches.get_one::<String>("status").map(PathBuf::from),
        verbose: matches.get_flag("verbose"),
    }
}

/// 从给定参数解析配置
///
/// `--help`/`--version` 由 clap 直接输出并退出；其他解析失败转换为用法错误，
/// 由调用方写入状态记录（退出码64）。
pub fn try_parse_args_from<I, T>(args: I) -> AudioResult<AppConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match build_command().try_get_matches_from(args) {
        Ok(matches) => Ok(config_from_matches(&matches)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(usage_error(&e)),
    }
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AudioResult<AppConfig> {
    try_parse_args_from(std::env::args_os())
}

/// 将clap解析错误转换为用法错误（去掉用法提示，合并为单行）
pub fn usage_error(error: &clap::Error) -> AudioError {
    let rendered = error.to_string();
    let detail = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    AudioError::InvalidInput(detail)
}

/// 显示程序启动信息（标准错误输出，标准输出保留给状态记录）
pub fn show_startup_info(config: &AppConfig) {
    if config.verbose {
        eprintln!("[INFO] PCM Channel Decoder v{VERSION} 启动 / starting");
        eprintln!("[INFO] {DESCRIPTION}");
    }
}
