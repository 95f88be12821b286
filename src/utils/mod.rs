//! # 工具函数模块
//!
//! 提供美化输出、进度条、文件收集等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, progress, collect

pub mod collect;
pub mod output;
pub mod progress;
