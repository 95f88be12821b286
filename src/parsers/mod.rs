//! # 解析器模块
//!
//! 提供 DFT 输出格式的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: pwscf_out

pub mod pwscf_out;

pub use pwscf_out::{parse_pwscf_content, parse_pwscf_file};
