//! 错误处理模块
//!
//! 提供统一的symphonia错误分类宏
//! 注意：此模块仅供decoder内部使用

/// 🔧 统一的symphonia错误处理宏
///
/// 将 symphonia 的错误模型映射到解码流程的三种结果：
/// - `Some(value)`：正常结果
/// - `None`：需要重置解码器后继续（链式流切换）
/// - 提前返回：其他错误按 `$wrap` 包装后返回
///
/// `packet:` 用于读取数据包，`UnexpectedEof` 表示流结束，提前返回 `Ok(None)`。
/// `decode:` 用于解码数据包，数据包内的 `UnexpectedEof` 说明包被截断，按错误处理。
macro_rules! handle_symphonia_error {
    (packet: $result:expr, $decoder:expr, $wrap:path, $context:expr) => {
        match $result {
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                return Ok(None); // 文件结束
            }
            other => handle_symphonia_error!(@common other, $decoder, $wrap, $context),
        }
    };
    (decode: $result:expr, $decoder:expr, $wrap:path, $context:expr) => {
        handle_symphonia_error!(@common $result, $decoder, $wrap, $context)
    };
    (@common $result:expr, $decoder:expr, $wrap:path, $context:expr) => {
        match $result {
            Ok(value) => Some(value),
            Err(symphonia::core::errors::Error::ResetRequired) => {
                $decoder.reset();
                None
            }
            Err(e) => return Err($wrap(format!("{}: {e}", $context))),
        }
    };
}

// 使宏在当前模块可见，但不对外暴露
pub(super) use handle_symphonia_error;
