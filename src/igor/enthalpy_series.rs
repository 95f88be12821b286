//! # 焓-压力序列导出
//!
//! 向 Igor 文本文件 (.itx) 追加一行压力索引的 (生成焓, 凸包上方焓) 数据。
//! 文件不存在时先写入表头，表头的波形列在创建后固定不变。
//!
//! ## 依赖关系
//! - 被 `commands/enthalpy.rs` 调用
//! - 使用 `phasediagram/mod.rs` 的 `PhaseDiagram` 接口

use crate::error::{PdtoolsError, Result};
use crate::phasediagram::PhaseDiagram;
use std::fs;
use std::path::Path;

/// 向焓序列 .itx 文件追加一个压力采样行
///
/// 同一压力重复调用会追加多行（按到达顺序，不排序、不去重）。
pub fn append_enthalpy_series(
    pd: &dyn PhaseDiagram,
    pressure_kbar: f64,
    path: &Path,
) -> Result<()> {
    let pressure_gpa = pressure_kbar / 10.0;

    let complist: Vec<String> = pd
        .entries()
        .iter()
        .map(|e| e.composition.formula())
        .collect();
    let n = complist.len();
    let eform: Vec<String> = (0..n)
        .map(|i| pd.formation_energy_per_atom(i).to_string())
        .collect();
    let eah: Vec<String> = (0..n).map(|i| pd.energy_above_hull(i).to_string()).collect();

    if !path.exists() {
        write_header(&complist, path)?;
    }

    let content = fs::read_to_string(path).map_err(|e| PdtoolsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let insert_at = lines.iter().position(|l| l == "END").ok_or_else(|| {
        PdtoolsError::ParseError {
            format: "Igor text".to_string(),
            path: path.display().to_string(),
            reason: "missing END data marker".to_string(),
        }
    })?;

    // Eah 按 Eform 值的首个匹配配对；Eform 值重复的条目会共享第一个匹配的 Eah
    let mut row = pressure_gpa.to_string();
    for e in &eform {
        let idx = eform.iter().position(|v| v == e).unwrap_or(0);
        row.push_str(&format!(" {} {}", e, eah[idx]));
    }
    lines.insert(insert_at, row);

    fs::write(path, lines.join("\n") + "\n").map_err(|e| PdtoolsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 写入表头：波形声明、空数据块和两组显示脚本
///
/// 列顺序 = 相图条目顺序，此后不再改变。
fn write_header(complist: &[String], path: &Path) -> Result<()> {
    let first = complist.first().ok_or_else(|| {
        PdtoolsError::PhaseDiagramError("phase diagram has no entries to export".to_string())
    })?;

    let mut out = String::from("IGOR\n");

    let mut waveline = String::from("WAVES/D pressure");
    for comp in complist {
        waveline.push_str(&format!(" {}_Eform {}_Eah", comp, comp));
    }
    out.push_str(&waveline);
    out.push_str("\nBEGIN\nEND\n");

    for (suffix, label) in [
        ("Eform", "Formation Enthalpy (eV)"),
        ("Eah", "Enthalpy above convex hull (eV)"),
    ] {
        out.push_str(&format!("X Display {}_{} vs pressure\n", first, suffix));
        for comp in &complist[1..] {
            out.push_str(&format!("X AppendToGraph {}_{} vs pressure\n", comp, suffix));
        }
        out.push_str(
            "X ModifyGraph gfSize=18,marker=19,msize=3,lsize=1,gFont=\"Arial\",tick=2,mirror=1,btLen=8,zero(left)=3,ZisZ=1,standoff=0\n",
        );
        out.push_str("X Label bottom \"pressure (GPa)\"\n");
        out.push_str(&format!("X Label left \"{}\"\n", label));
    }

    fs::write(path, out).map_err(|e| PdtoolsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
