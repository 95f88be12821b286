//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及共用的 解析 → 建条目 → 建相图 流水线。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `phasediagram/`, `igor/`, `utils/`
//! - 子模块: parse, enthalpy, diagram

pub mod diagram;
pub mod enthalpy;
pub mod parse;

use crate::cli::Commands;
use crate::error::{PdtoolsError, Result};
use crate::models::{Composition, RelaxationResult};
use crate::parsers::parse_pwscf_file;
use crate::phasediagram::{build_entries, BinaryPhaseDiagram, PhaseDiagram};
use crate::utils::{collect, output, progress};
use std::path::Path;
use tabled::{Table, Tabled};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Parse(args) => parse::execute(args),
        Commands::Enthalpy(args) => enthalpy::execute(args),
        Commands::Diagram(args) => diagram::execute(args),
    }
}

/// 收集并解析全部输出文件
///
/// 任一文件解析失败即整体失败，不做部分降级。
pub(crate) fn load_results(
    input: &Path,
    pattern: &str,
    recursive: bool,
    pressure_kbar: f64,
) -> Result<Vec<RelaxationResult>> {
    let files = collect::collect_files(input, pattern, recursive)?;
    output::print_info(&format!("Found {} output file(s)", files.len()));

    let pb = progress::create_progress_bar(files.len() as u64, "Parsing");
    let mut results = Vec::with_capacity(files.len());
    for file in &files {
        let result = parse_pwscf_file(file, pressure_kbar)?;
        pb.inc(1);
        results.push(result);
    }
    pb.finish_and_clear();

    for r in &results {
        output::print_info(&format!(
            "{}: composition = {}, E = {:.6} eV, H = {:.6} eV",
            r.name, r.composition, r.energy_ev, r.enthalpy_ev
        ));
    }

    Ok(results)
}

/// 解析 `--terminals` 参数：两个逗号分隔的化学式
pub(crate) fn parse_terminals(s: &str) -> Result<(Composition, Composition)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.len() != 2 {
        return Err(PdtoolsError::InvalidArgument(format!(
            "expected exactly two terminal compositions, got '{}'",
            s
        )));
    }
    Ok((
        Composition::from_formula(parts[0])?,
        Composition::from_formula(parts[1])?,
    ))
}

/// 由弛豫结果和端元构建二元相图
pub(crate) fn build_diagram(
    results: &[RelaxationResult],
    terminals: &str,
) -> Result<BinaryPhaseDiagram> {
    let (terminal_a, terminal_b) = parse_terminals(terminals)?;
    let entries = build_entries(results)?;
    BinaryPhaseDiagram::build(entries, &terminal_a, &terminal_b)
}

/// 相图条目诊断表行
#[derive(Debug, Clone, Tabled)]
struct EntryRow {
    #[tabled(rename = "Composition")]
    composition: String,
    #[tabled(rename = "x")]
    coordinate: String,
    #[tabled(rename = "Eform (eV/atom)")]
    eform: String,
    #[tabled(rename = "Eah (eV/atom)")]
    eah: String,
}

/// 打印每条目的生成焓与凸包上方焓
pub(crate) fn print_diagram_table(pd: &dyn PhaseDiagram) {
    let rows: Vec<EntryRow> = pd
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| EntryRow {
            composition: entry.composition.formula(),
            coordinate: format!("{:.4}", pd.coordinate(i)),
            eform: format!("{:.6}", pd.formation_energy_per_atom(i)),
            eah: format!("{:.6}", pd.energy_above_hull(i)),
        })
        .collect();

    println!("{}", Table::new(&rows));
}
