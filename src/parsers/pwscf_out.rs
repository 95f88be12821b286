//! # PWSCF vc-relax 输出解析器
//!
//! 解析 pw.x 变胞弛豫计算输出文件，提取组成、最终自洽能量和晶胞体积。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/composition.rs`, `models/relaxation.rs`

use crate::error::{PdtoolsError, Result};
use crate::models::{Composition, RelaxationResult};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 解析 PWSCF 输出文件
pub fn parse_pwscf_file(path: &Path, pressure_kbar: f64) -> Result<RelaxationResult> {
    let content = fs::read_to_string(path).map_err(|e| PdtoolsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    parse_pwscf_content(&content, pressure_kbar, name)
}

/// 解析 PWSCF 输出文本
pub fn parse_pwscf_content(
    content: &str,
    pressure_kbar: f64,
    name: &str,
) -> Result<RelaxationResult> {
    let lines: Vec<&str> = content.lines().collect();

    let composition = parse_composition(&lines, name)?;
    let volume = parse_final_volume(&lines, name)?;
    let energy_ry = parse_final_energy(&lines, name)?;

    Ok(RelaxationResult::from_scf(
        name,
        composition,
        energy_ry,
        volume,
        pressure_kbar,
    ))
}

/// 提取组成：第一个 "End final coordinates" 之前的最后一个 ATOMIC_POSITIONS 块
///
/// 原子行首 token 去掉尾部数字位号后计数（"Fe1" → "Fe"），保持首次出现顺序。
fn parse_composition(lines: &[&str], name: &str) -> Result<Composition> {
    let end_final = lines
        .iter()
        .position(|l| l.contains("End final coordinates"))
        .ok_or_else(|| parse_error(name, "missing 'End final coordinates' marker"))?;

    let block_start = lines[..end_final]
        .iter()
        .rposition(|l| l.contains("ATOMIC_POSITIONS"))
        .ok_or_else(|| {
            parse_error(name, "no ATOMIC_POSITIONS block before final coordinates")
        })?;

    let mut composition = Composition::new();
    for line in &lines[block_start + 1..end_final] {
        let symbol = match line.split_whitespace().next() {
            Some(tok) => strip_site_index(tok),
            None => continue,
        };
        if symbol.is_empty() {
            return Err(parse_error(
                name,
                &format!("bad atom symbol in ATOMIC_POSITIONS block: '{}'", line),
            ));
        }
        composition.add(symbol, 1.0);
    }

    if composition.is_empty() {
        return Err(PdtoolsError::InvalidComposition(format!(
            "empty ATOMIC_POSITIONS block in '{}'",
            name
        )));
    }

    Ok(composition)
}

/// 提取最终晶胞体积：最后一个 "Begin final coordinates" 的下一行
///
/// 该行须含 "<小数>  Ang"，如
/// "new unit-cell volume = 284.23236 a.u.^3 (  42.11907 Ang^3 )"。
fn parse_final_volume(lines: &[&str], name: &str) -> Result<f64> {
    let begin_final = lines
        .iter()
        .rposition(|l| l.contains("Begin final coordinates"))
        .ok_or_else(|| parse_error(name, "missing 'Begin final coordinates' marker"))?;

    let line = lines
        .get(begin_final + 1)
        .ok_or_else(|| parse_error(name, "file ends right after 'Begin final coordinates'"))?;

    let re = Regex::new(r"([0-9]+\.[0-9]+) +Ang").unwrap();
    let cap = re.captures(line).ok_or_else(|| {
        parse_error(
            name,
            &format!("no volume in line after final coordinates marker: '{}'", line),
        )
    })?;

    cap[1]
        .parse::<f64>()
        .map_err(|_| parse_error(name, &format!("bad volume value: '{}'", &cap[1])))
}

/// 提取最终自洽能量 (Ry)：最后一行含 "!" 的结果行中的第一个带符号小数
///
/// "!    total energy              =     -31.61068941 Ry"
fn parse_final_energy(lines: &[&str], name: &str) -> Result<f64> {
    let line = lines
        .iter()
        .rev()
        .find(|l| l.contains('!'))
        .ok_or_else(|| parse_error(name, "no '!' total energy line found"))?;

    let re = Regex::new(r"-?[0-9]+\.[0-9]+").unwrap();
    let m = re
        .find(line)
        .ok_or_else(|| parse_error(name, &format!("no energy value in line: '{}'", line)))?;

    m.as_str()
        .parse::<f64>()
        .map_err(|_| parse_error(name, &format!("bad energy value: '{}'", m.as_str())))
}

/// 去掉元素符号尾部的数字位号："Fe1" → "Fe"，"O12" → "O"
fn strip_site_index(token: &str) -> &str {
    token.trim_end_matches(|c: char| c.is_ascii_digit())
}

fn parse_error(name: &str, reason: &str) -> PdtoolsError {
    PdtoolsError::ParseError {
        format: "PWSCF output".to_string(),
        path: name.to_string(),
        reason: reason.to_string(),
    }
}
