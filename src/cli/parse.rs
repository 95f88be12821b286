//! # parse 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/parse.rs`

use clap::Args;
use std::path::PathBuf;

/// parse 子命令参数
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input: output file, directory of output files, or glob pattern
    pub input: PathBuf,

    /// Filename pattern for directory input
    #[arg(long, default_value = "*.out")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Target pressure of the vc-relax calculation (kBar)
    #[arg(short, long, default_value_t = 0.0)]
    pub pressure: f64,

    /// Write all parsed results to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}
