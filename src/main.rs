//! # pdtools - PWSCF 相图与焓分析工具
//!
//! 解析 pw.x 变胞弛豫输出，构建二元相图，导出 Igor Pro 文本绘图脚本。
//!
//! ## 子命令
//! - `parse`    - 解析输出文件并列出组成、能量、焓
//! - `enthalpy` - 向焓-压力序列 .itx 追加一个压力采样
//! - `diagram`  - 导出二维相图 .itx
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/          (命令行参数定义)
//!   ├── commands/     (命令执行逻辑)
//!   │     ├── parsers/      (PWSCF 输出解析)
//!   │     ├── phasediagram/ (条目构建与凸包稳定性)
//!   │     ├── igor/         (Igor 文本导出)
//!   │     └── models/       (数据模型)
//!   ├── utils/        (工具函数)
//!   └── error.rs      (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod igor;
mod models;
mod parsers;
mod phasediagram;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
