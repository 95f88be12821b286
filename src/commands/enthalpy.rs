//! # enthalpy 子命令实现
//!
//! 完整流水线：解析输出 → 建相图 → 向焓-压力序列 .itx 追加一行。
//!
//! ## 依赖关系
//! - 使用 `cli/enthalpy.rs` 定义的参数
//! - 使用 `igor/enthalpy_series.rs`, `utils/output.rs`

use crate::cli::enthalpy::EnthalpyArgs;
use crate::commands::{build_diagram, load_results, print_diagram_table};
use crate::error::Result;
use crate::igor::append_enthalpy_series;
use crate::utils::output;

/// 执行 enthalpy 命令
pub fn execute(args: EnthalpyArgs) -> Result<()> {
    output::print_header("Enthalpy vs Pressure Series");

    let results = load_results(&args.input, &args.pattern, args.recursive, args.pressure)?;
    let pd = build_diagram(&results, &args.terminals)?;

    print_diagram_table(&pd);

    append_enthalpy_series(&pd, args.pressure, &args.itx)?;
    output::print_success(&format!(
        "Appended P = {} GPa sample to '{}'",
        args.pressure / 10.0,
        args.itx.display()
    ));

    Ok(())
}
