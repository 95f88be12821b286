//! # diagram 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/diagram.rs`

use clap::Args;
use std::path::PathBuf;

/// diagram 子命令参数
#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Input: output file, directory of output files, or glob pattern
    pub input: PathBuf,

    /// Filename pattern for directory input
    #[arg(long, default_value = "*.out")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Target pressure of the vc-relax calculation (kBar)
    #[arg(short, long)]
    pub pressure: f64,

    /// Terminal compositions of the phase diagram, e.g. 'Sc,H' or 'Fe,FeO3'
    #[arg(short, long)]
    pub terminals: String,

    /// Igor text file to write (overwritten on every call)
    #[arg(long, default_value = "phase_diagram.itx")]
    pub itx: PathBuf,

    /// Wave name prefix inside the Igor text file
    #[arg(long, default_value = "pd")]
    pub prefix: String,
}
