//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `parse`: 解析 vc-relax 输出并列出能量/焓
//! - `enthalpy`: 向焓-压力序列 .itx 文件追加一个压力采样
//! - `diagram`: 导出二维相图 .itx 文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: parse, enthalpy, diagram

pub mod diagram;
pub mod enthalpy;
pub mod parse;

use clap::{Parser, Subcommand};

/// pdtools - PWSCF 相图与焓分析工具
#[derive(Parser)]
#[command(name = "pdtools")]
#[command(version)]
#[command(about = "Phase diagram and enthalpy analysis for PWSCF vc-relax calculations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse vc-relax output files and list composition, energy and enthalpy
    Parse(parse::ParseArgs),

    /// Append one pressure sample to an enthalpy-vs-pressure Igor text file
    Enthalpy(enthalpy::EnthalpyArgs),

    /// Export a two-component phase diagram as an Igor text file
    Diagram(diagram::DiagramArgs),
}
