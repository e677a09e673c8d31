//! 临时音频文件守卫
//!
//! 合成管线的中间产物以临时文件形式存在，生命周期严格绑定到单次
//! 管线调用：创建 → 引擎写入 → 读取一次 → 删除。守卫在 Drop 中
//! 完成删除，覆盖成功、合成失败、转码失败等所有退出路径。

use std::io;
use std::path::{Path, PathBuf};

/// 作用域临时音频文件
///
/// 路径由平台临时文件设施生成，保证并发调用间不冲突。
/// 删除是尽力而为的：删除失败只记录日志，不掩盖原始错误。
#[derive(Debug)]
pub struct ScopedTempFile {
    path: PathBuf,
}

impl ScopedTempFile {
    /// 在指定目录下预留一个 `.mp3` 后缀的临时文件路径
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("parlo-")
            .suffix(".mp3")
            .tempfile_in(dir)?;

        // 解除 NamedTempFile 自身的删除职责，由本守卫统一负责
        let (_, path) = file.keep().map_err(|e| e.error)?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedTempFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove temp audio file"
                );
            }
        }
    }
}
