//! # parse 子命令实现
//!
//! 解析 vc-relax 输出文件，按焓排序输出终端表格，可选导出 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/parse.rs` 定义的参数
//! - 使用 `parsers/pwscf_out.rs`, `utils/output.rs`

use crate::cli::parse::ParseArgs;
use crate::commands::load_results;
use crate::error::{PdtoolsError, Result};
use crate::models::RelaxationResult;
use crate::utils::output;
use std::path::Path;
use tabled::{Table, Tabled};

/// 解析结果表行
#[derive(Debug, Clone, Tabled)]
struct ResultRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Structure")]
    structure: String,
    #[tabled(rename = "Composition")]
    composition: String,
    #[tabled(rename = "Volume (Å³)")]
    volume: String,
    #[tabled(rename = "H (eV/atom)")]
    enthalpy_per_atom: String,
}

/// 执行 parse 命令
pub fn execute(args: ParseArgs) -> Result<()> {
    output::print_header("Parsing PWSCF vc-relax Outputs");

    let mut results = load_results(&args.input, &args.pattern, args.recursive, args.pressure)?;

    // 按每原子焓排序
    results.sort_by(|a, b| {
        a.enthalpy_per_atom()
            .partial_cmp(&b.enthalpy_per_atom())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let rows: Vec<ResultRow> = results
        .iter()
        .enumerate()
        .map(|(i, r)| ResultRow {
            rank: i + 1,
            structure: r.name.clone(),
            composition: r.composition.formula(),
            volume: format!("{:.4}", r.volume),
            enthalpy_per_atom: format!("{:.6}", r.enthalpy_per_atom()),
        })
        .collect();

    println!("{}", Table::new(&rows));

    if let Some(ref csv_path) = args.output_csv {
        save_results_csv(&results, csv_path)?;
        output::print_success(&format!("Results saved to '{}'", csv_path.display()));
    }

    Ok(())
}

/// 保存结果到 CSV
fn save_results_csv(results: &[RelaxationResult], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(PdtoolsError::CsvError)?;

    wtr.write_record([
        "structure",
        "composition",
        "pressure_kbar",
        "volume_A3",
        "energy_eV",
        "enthalpy_eV",
    ])
    .map_err(PdtoolsError::CsvError)?;

    for r in results {
        wtr.write_record([
            r.name.clone(),
            r.composition.formula(),
            format!("{}", r.pressure_kbar),
            format!("{:.6}", r.volume),
            format!("{:.10}", r.energy_ev),
            format!("{:.10}", r.enthalpy_ev),
        ])
        .map_err(PdtoolsError::CsvError)?;
    }

    wtr.flush().map_err(|e| PdtoolsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
