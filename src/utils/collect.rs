//! # 文件收集器
//!
//! 根据输入路径和模式收集待解析的输出文件列表。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - 目录输入按文件名模式过滤，可递归
//! - 带通配符的输入路径按 glob 展开
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 进行模式匹配

use crate::error::{PdtoolsError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 收集输入对应的文件列表（排序后返回）
///
/// `input` 为文件时忽略 `pattern`；为目录时按 `pattern` 过滤其中的文件；
/// 含 `*`/`?`/`[` 时视为 glob 模式直接展开。
pub fn collect_files(input: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let input_str = input.display().to_string();

    if input_str.contains('*') || input_str.contains('?') || input_str.contains('[') {
        return collect_glob(&input_str);
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(PdtoolsError::FileNotFound { path: input_str });
    }

    let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
        PdtoolsError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|name| glob_pattern.matches(name))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    if files.is_empty() {
        return Err(PdtoolsError::NoFilesFound {
            pattern: format!("{}/{}", input.display(), pattern),
        });
    }

    files.sort();
    Ok(files)
}

/// 按 glob 模式展开输入
fn collect_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| {
        PdtoolsError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|p| p.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        return Err(PdtoolsError::NoFilesFound {
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    Ok(files)
}
