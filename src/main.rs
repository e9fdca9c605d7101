//! PCM Channel Decoder - 主程序入口
//!
//! 纯流程控制器：解析参数 → 解码 → 交付状态记录 → 以状态退出码退出。

use pcm_channel_decoder::AudioError;
use pcm_channel_decoder::tools::{self, StatusRecord};
use std::process;

/// 应用程序主逻辑，返回进程退出码
fn run() -> i32 {
    // 1. 解析命令行参数（用法错误同样以状态记录交付）
    let config = match tools::parse_args() {
        Ok(config) => config,
        Err(error) => return usage_failure(&error),
    };

    // 2. 显示启动信息
    tools::show_startup_info(&config);

    // 3. 解码
    let status: StatusRecord = tools::process_audio_file(&config);

    if !status.is_success() {
        tools::report_failure(&status);
    } else if config.verbose {
        eprintln!("[OK] 解码完成 / Decoding finished");
    }

    // 4. 交付状态记录
    if let Err(error) = tools::write_status(&status, config.status_path.as_deref()) {
        eprintln!("[ERROR] 无法写出状态记录 / Failed to write status record: {error}");
        if status.is_success() {
            return error.exit_code();
        }
    }

    status.process_exit_code()
}

/// 用法错误：状态记录写到标准输出，返回用法错误码
fn usage_failure(error: &AudioError) -> i32 {
    eprintln!("[ERROR] {error}");
    eprintln!("[INFO] 使用 --help 查看用法 / Run with --help for usage");

    let mut status = StatusRecord::new();
    status.finish_err(error);
    if let Err(write_error) = tools::write_status(&status, None) {
        eprintln!("[ERROR] 无法写出状态记录 / Failed to write status record: {write_error}");
    }
    status.process_exit_code()
}

fn main() {
    let code = run();
    if code != 0 {
        process::exit(code);
    }
}
