//! 工具函数模块
//!
//! 提供文件路径处理等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 获取父目录，如果不存在则返回当前目录
    #[inline]
    pub fn get_parent_dir(path: &Path) -> &Path {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

// 重新导出为平级函数
pub use path::{extract_filename_lossy, get_parent_dir};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parent_dir_falls_back_to_current() {
        assert_eq!(get_parent_dir(Path::new("song.flac")), Path::new("."));
        assert_eq!(get_parent_dir(Path::new("/music/song.flac")), Path::new("/music"));
    }

    #[test]
    fn test_extract_filename_lossy() {
        assert_eq!(extract_filename_lossy(Path::new("/a/b/clip.ogg")), "clip.ogg");
        assert_eq!(extract_filename_lossy(Path::new("/")), "");
    }
}
