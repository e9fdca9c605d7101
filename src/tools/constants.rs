//! 常量和默认配置集中管理
//!
//! 将所有重要常量集中定义，避免"默认值漂移"和重复定义

/// 输出文件相关常量
pub mod output {
    /// 声道文件名前缀，完整文件名为 `channel_<声道序号>`
    pub const CHANNEL_FILE_PREFIX: &str = "channel_";

    /// 输出样本固定为 f32
    pub const OUTPUT_SAMPLE_BYTES: usize = 4;
}

/// 状态记录相关常量
pub mod status {
    /// 成功时的退出消息（宿主据此判断无错误信息）
    pub const SUCCESS_MESSAGE: &str = "NA";

    /// 解码/解封装库版本
    ///
    /// 与 Cargo.toml 中的 symphonia 版本要求保持一致
    pub const SYMPHONIA_VERSION: &str = "symphonia 0.5";

    /// 本工具版本
    pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
}
