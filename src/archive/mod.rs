//! 提交文件归档
//!
//! 目录布局：`<root>/activity_<id>/<username>_<原文件名>`。
//! 文件先复制为同目录下的 `.partial` 临时文件，提交记录写入成功后再替换目标；
//! 同一学生对同一活动重复提交同名文件时覆盖旧文件。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::{Result, VClassError};

#[derive(Debug, Clone)]
pub struct FileArchive {
    root: PathBuf,
}

impl FileArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 确保归档根目录存在
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            VClassError::file_operation(format!(
                "创建归档目录失败 {}: {e}",
                self.root.display()
            ))
        })
    }

    /// 某个活动的归档目录
    pub fn activity_dir(&self, activity_id: i64) -> PathBuf {
        self.root.join(format!("activity_{activity_id}"))
    }

    /// 计算归档目标路径，不触碰文件系统
    pub fn destination_for(
        &self,
        activity_id: i64,
        username: &str,
        source: &Path,
    ) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                VClassError::file_operation(format!(
                    "源路径没有有效的文件名: {}",
                    source.display()
                ))
            })?;

        Ok(self
            .activity_dir(activity_id)
            .join(format!("{username}_{file_name}")))
    }

    /// 复制源文件到活动目录中的临时文件，目标文件保持不变
    ///
    /// 调用方在数据库提交成功后调用 [`FileArchive::commit`]，失败时调用
    /// [`FileArchive::abandon`]。
    pub fn stage(&self, activity_id: i64, username: &str, source: &Path) -> Result<StagedFile> {
        let destination = self.destination_for(activity_id, username, source)?;

        if !source.is_file() {
            return Err(VClassError::file_operation(format!(
                "源文件不存在或不是普通文件: {}",
                source.display()
            )));
        }

        let dir = self.activity_dir(activity_id);
        fs::create_dir_all(&dir).map_err(|e| {
            VClassError::file_operation(format!("创建活动目录失败 {}: {e}", dir.display()))
        })?;

        let mut partial = destination.clone().into_os_string();
        partial.push(PARTIAL_SUFFIX);
        let partial = PathBuf::from(partial);

        fs::copy(source, &partial).map_err(|e| {
            VClassError::file_operation(format!(
                "复制文件失败 {} -> {}: {e}",
                source.display(),
                partial.display()
            ))
        })?;

        debug!("Staged {} -> {}", source.display(), partial.display());
        Ok(StagedFile {
            partial,
            destination,
        })
    }

    /// 用临时文件替换目标文件（重复提交时覆盖），返回目标路径
    pub fn commit(&self, staged: StagedFile) -> Result<PathBuf> {
        fs::rename(&staged.partial, &staged.destination).map_err(|e| {
            VClassError::file_operation(format!(
                "替换归档文件失败 {} -> {}: {e}",
                staged.partial.display(),
                staged.destination.display()
            ))
        })?;
        debug!("Archived {}", staged.destination.display());
        Ok(staged.destination)
    }

    /// 丢弃临时文件，目标文件保持原样；失败只记录日志
    pub fn abandon(&self, staged: StagedFile) {
        if let Err(e) = fs::remove_file(&staged.partial) {
            warn!(
                "Failed to discard staged file {}: {}",
                staged.partial.display(),
                e
            );
        }
    }
}

/// 临时文件后缀
const PARTIAL_SUFFIX: &str = ".partial";

/// 已复制但尚未生效的归档文件
#[derive(Debug)]
pub struct StagedFile {
    partial: PathBuf,
    destination: PathBuf,
}

impl StagedFile {
    /// 提交生效后的最终路径
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
