//! # diagram 子命令实现
//!
//! 完整流水线：解析输出 → 建相图 → 重建二维相图 .itx 文件。
//!
//! ## 依赖关系
//! - 使用 `cli/diagram.rs` 定义的参数
//! - 使用 `igor/diagram2d.rs`, `utils/output.rs`

use crate::cli::diagram::DiagramArgs;
use crate::commands::{build_diagram, load_results, print_diagram_table};
use crate::error::Result;
use crate::igor::write_diagram_2d;
use crate::phasediagram::PhaseDiagram;
use crate::utils::output;

/// 执行 diagram 命令
pub fn execute(args: DiagramArgs) -> Result<()> {
    output::print_header("2D Phase Diagram Export");

    let results = load_results(&args.input, &args.pattern, args.recursive, args.pressure)?;
    let pd = build_diagram(&results, &args.terminals)?;

    print_diagram_table(&pd);
    output::print_info(&format!(
        "{} stable / {} unstable entries",
        pd.stable_indices().len(),
        pd.unstable_indices().len()
    ));

    write_diagram_2d(&pd, &args.itx, &args.prefix)?;
    output::print_success(&format!("Phase diagram written to '{}'", args.itx.display()));

    Ok(())
}
