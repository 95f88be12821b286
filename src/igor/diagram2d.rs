//! # 二维相图导出
//!
//! 将二元相图整体重建为 Igor 文本文件 (.itx)：稳定/不稳定条目数据块、
//! 组成标签块和绘图样式指令。
//!
//! ## 依赖关系
//! - 被 `commands/diagram.rs` 调用
//! - 使用 `phasediagram/mod.rs` 的 `PhaseDiagram` 接口

use crate::error::{PdtoolsError, Result};
use crate::phasediagram::PhaseDiagram;
use regex::Regex;
use std::fs;
use std::path::Path;

/// 写出二维相图 .itx 文件（每次整体覆盖）
///
/// 相图维数不为 2 时返回 DimensionError，不触碰目标文件。
pub fn write_diagram_2d(pd: &dyn PhaseDiagram, path: &Path, prefix: &str) -> Result<()> {
    if pd.dim() != 2 {
        return Err(PdtoolsError::DimensionError { found: pd.dim() });
    }

    let triples = |indices: Vec<usize>| -> Vec<(f64, f64, f64)> {
        let mut rows: Vec<(f64, f64, f64)> = indices
            .into_iter()
            .map(|i| {
                (
                    pd.coordinate(i),
                    pd.formation_energy_per_atom(i),
                    pd.energy_above_hull(i),
                )
            })
            .collect();
        rows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        rows
    };
    let stable = triples(pd.stable_indices());
    let unstable = triples(pd.unstable_indices());

    // 每个不同坐标一个约化化学式标签，同坐标后出现者覆盖先出现者
    let mut labels: Vec<(f64, String)> = Vec::new();
    for (i, entry) in pd.entries().iter().enumerate() {
        let x = pd.coordinate(i);
        let text = igor_subscript(&entry.composition.reduced_formula());
        match labels.iter_mut().find(|(lx, _)| (*lx - x).abs() < 1e-9) {
            Some((_, t)) => *t = text,
            None => labels.push((x, text)),
        }
    }
    labels.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut out = String::from("IGOR\n");

    for (group, rows) in [("st", &stable), ("unst", &unstable)] {
        out.push_str(&format!(
            "WAVES/D {p}_{g}_x {p}_{g}_Eform {p}_{g}_Eah\nBEGIN\n",
            p = prefix,
            g = group
        ));
        for (x, eform, eah) in rows {
            out.push_str(&format!("{} {} {}\n", x, eform, eah));
        }
        out.push_str("END\n");
    }

    out.push_str(&format!("WAVES/T {}_label\nBEGIN\n", prefix));
    for (_, text) in &labels {
        out.push_str(&format!("\"{}\"\n", text));
    }
    out.push_str("END\n");

    out.push_str(&format!("WAVES/D {}_labelpos\nBEGIN\n", prefix));
    for (x, _) in &labels {
        out.push_str(&format!("{}\n", x));
    }
    out.push_str("END\n");

    out.push_str(&format!("X Display {p}_st_Eform vs {p}_st_x\n", p = prefix));
    out.push_str(&format!(
        "X AppendToGraph {p}_unst_Eform vs {p}_unst_x\n",
        p = prefix
    ));
    out.push_str(
        "X ModifyGraph gfSize=18,marker=19,msize=3,lsize=1,gFont=\"Arial\",mode=4,tick=2,mirror=1,btLen=8,zero(left)=3,standoff=0,ZisZ=1\n",
    );
    out.push_str(&format!(
        "X ModifyGraph mode({p}_unst_Eform)=3,marker({p}_unst_Eform)=8,rgb({p}_unst_Eform)=(0,0,65535)\n",
        p = prefix
    ));
    out.push_str(&format!(
        "X Legend/C/N=text0 \"\\s({p}_st_Eform) stable\\r\\s({p}_unst_Eform) unstable\"\n",
        p = prefix
    ));
    out.push_str("X Label bottom \"\"\n");
    out.push_str("X Label left \"Formation Enthalpy (eV)\"\n");
    out.push_str(&format!(
        "X ModifyGraph tkLblRot(bottom)=90,userticks(bottom)={{{p}_labelpos,{p}_label}}\n",
        p = prefix
    ));

    fs::write(path, out).map_err(|e| PdtoolsError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 将化学式中的数字串包装为 Igor 下标标记："Fe2O3" → "Fe\B2\MO\B3\M"
fn igor_subscript(formula: &str) -> String {
    let re = Regex::new(r"([0-9]+)").unwrap();
    re.replace_all(formula, r"\B$1\M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Composition;
    use crate::phasediagram::{BinaryPhaseDiagram, PdEntry};
    use std::path::PathBuf;

    fn comp(pairs: &[(&str, f64)]) -> Composition {
        let mut c = Composition::new();
        for (el, n) in pairs {
            c.add(el, *n);
        }
        c
    }

    fn diagram() -> BinaryPhaseDiagram {
        let entries = vec![
            PdEntry::new(comp(&[("A", 1.0), ("B", 3.0)]), -7.8),
            PdEntry::new(comp(&[("B", 1.0)]), -2.0),
            PdEntry::new(comp(&[("A", 1.0)]), -1.0),
            PdEntry::new(comp(&[("A", 1.0), ("B", 1.0)]), -4.0),
        ];
        BinaryPhaseDiagram::build(entries, &comp(&[("A", 1.0)]), &comp(&[("B", 1.0)])).unwrap()
    }

    fn temp_itx(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pdtools_pd2d_{}_{}.itx", tag, std::process::id()))
    }

    /// 固定维数和数据的假相图，用于维数检查
    struct FixedDimPd {
        dim: usize,
        entries: Vec<PdEntry>,
    }

    impl PhaseDiagram for FixedDimPd {
        fn dim(&self) -> usize {
            self.dim
        }
        fn entries(&self) -> &[PdEntry] {
            &self.entries
        }
        fn formation_energy_per_atom(&self, _index: usize) -> f64 {
            0.0
        }
        fn energy_above_hull(&self, _index: usize) -> f64 {
            0.0
        }
        fn stable_indices(&self) -> Vec<usize> {
            (0..self.entries.len()).collect()
        }
        fn unstable_indices(&self) -> Vec<usize> {
            vec![]
        }
        fn coordinate(&self, _index: usize) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_dimension_error_writes_nothing() {
        let path = temp_itx("dim3");
        let _ = std::fs::remove_file(&path);

        let pd = FixedDimPd {
            dim: 3,
            entries: vec![PdEntry::new(comp(&[("A", 1.0)]), -1.0)],
        };
        let err = write_diagram_2d(&pd, &path, "pd").unwrap_err();
        assert!(matches!(err, PdtoolsError::DimensionError { found: 3 }));
        assert!(!path.exists());
    }

    #[test]
    fn test_stable_block_sorted_ascending() {
        let path = temp_itx("sorted");
        write_diagram_2d(&diagram(), &path, "ab").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let lines: Vec<&str> = content.lines().collect();
        let begin = lines
            .iter()
            .position(|l| l.starts_with("WAVES/D ab_st_x"))
            .unwrap()
            + 2;
        let end = lines[begin..].iter().position(|l| *l == "END").unwrap() + begin;

        let xs: Vec<f64> = lines[begin..end]
            .iter()
            .map(|l| l.split_whitespace().next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(xs.len(), 3);
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unstable_block_and_styling() {
        let path = temp_itx("unst");
        write_diagram_2d(&diagram(), &path, "ab").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.contains("WAVES/D ab_unst_x ab_unst_Eform ab_unst_Eah"));

        // AB3 是唯一的不稳定条目
        let lines: Vec<&str> = content.lines().collect();
        let begin = lines
            .iter()
            .position(|l| l.starts_with("WAVES/D ab_unst_x"))
            .unwrap()
            + 2;
        let row: Vec<f64> = lines[begin]
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert!((row[0] - 0.75).abs() < 1e-9);
        assert!((row[1] - (-0.2)).abs() < 1e-9);
        assert!((row[2] - 0.05).abs() < 1e-9);
        assert_eq!(lines[begin + 1], "END");

        assert!(content.contains("mode(ab_unst_Eform)=3"));
        assert!(content.contains("stable\\r\\s(ab_unst_Eform) unstable"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_labels_sorted_with_subscripts() {
        let path = temp_itx("labels");
        write_diagram_2d(&diagram(), &path, "ab").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let lines: Vec<&str> = content.lines().collect();
        let begin = lines
            .iter()
            .position(|l| l.starts_with("WAVES/T ab_label"))
            .unwrap()
            + 2;
        assert_eq!(lines[begin], "\"A\"");
        assert_eq!(lines[begin + 1], "\"AB\"");
        assert_eq!(lines[begin + 2], "\"AB\\B3\\M\"");
        assert_eq!(lines[begin + 3], "\"B\"");
        assert_eq!(lines[begin + 4], "END");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_overwrites_previous_file() {
        let path = temp_itx("overwrite");
        std::fs::write(&path, "stale content\n").unwrap();

        write_diagram_2d(&diagram(), &path, "ab").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("IGOR\n"));
        assert!(!content.contains("stale"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_igor_subscript_markup() {
        assert_eq!(igor_subscript("Fe2O3"), r"Fe\B2\MO\B3\M");
        assert_eq!(igor_subscript("NaCl"), "NaCl");
        assert_eq!(igor_subscript("ScH12"), r"ScH\B12\M");
    }
}
