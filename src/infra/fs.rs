//! # File System Operations Module / 文件系统操作模块
//!
//! Path expansion, benchmark directory listing and result file writing.
//!
//! 路径展开、基准测试目录列举以及结果文件写入。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `~` and environment variables in `raw`, then resolves it against `base`
/// when it is relative.
///
/// # Arguments
/// * `raw` - Path as written in the configuration or on the command line
/// * `base` - Directory that relative paths are resolved against
///
/// # Returns
/// The expanded path, or an error naming the undefined variable
pub fn expand_path(raw: &str, base: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}

/// Lists the entries of `dir` that are benchmarks: every sub-directory whose
/// name is not in `exclude` and does not start with a dot, sorted by name.
/// Plain files next to the benchmarks (scripts, makefiles) are skipped.
///
/// 列出 `dir` 中属于基准测试的条目：名称不在 `exclude` 中且不以点开头的子目录，按名称排序。
/// 与基准测试并列的普通文件（脚本、makefile）会被跳过。
pub fn list_benchmarks(dir: &Path, exclude: &[String]) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list benchmark directory: {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || exclude.iter().any(|e| e == &name) {
            continue;
        }
        // Follows symlinks, so a linked benchmark directory still counts.
        if !entry.path().is_dir() {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Writes `content` to `path`, creating parent directories as needed.
/// 将 `content` 写入 `path`，按需创建父目录。
pub fn write_result_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write result file: {}", path.display()))
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
