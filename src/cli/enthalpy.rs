//! # enthalpy 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/enthalpy.rs`

use clap::Args;
use std::path::PathBuf;

/// enthalpy 子命令参数
#[derive(Args, Debug)]
pub struct EnthalpyArgs {
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

    /// Igor text file to create or append to
    #[arg(long, default_value = "enthalpy.itx")]
    pub itx: PathBuf,
}
