//! # 二元体系相图
//!
//! 以两个端元组成为边界构建复合相图：每个条目分解为端元分数，
//! 生成焓取相对端元参考能量的差，稳定性由一维下凸包判定。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 实现 `phasediagram/mod.rs` 的 `PhaseDiagram` 接口

use crate::error::{PdtoolsError, Result};
use crate::models::Composition;
use crate::phasediagram::{PdEntry, PhaseDiagram};

/// 凸包判稳容差 (eV/atom)
const HULL_TOL: f64 = 1e-8;

/// 端元分解残差容差（每原子）
const DECOMP_TOL: f64 = 1e-6;

/// 二元复合相图
///
/// 条目顺序与构建时传入的顺序一致。
#[derive(Debug)]
pub struct BinaryPhaseDiagram {
    entries: Vec<PdEntry>,
    coords: Vec<f64>,
    eform: Vec<f64>,
    eah: Vec<f64>,
}

impl BinaryPhaseDiagram {
    /// 由条目列表和两个端元组成构建相图
    ///
    /// 端元组成按原子归一化。两个端元处都必须有参考条目，
    /// 条目组成必须落在端元张成的线段内。
    pub fn build(
        entries: Vec<PdEntry>,
        terminal_a: &Composition,
        terminal_b: &Composition,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(PdtoolsError::PhaseDiagramError(
                "cannot build a phase diagram from an empty entry list".to_string(),
            ));
        }

        // 端元按原子归一化后的元素并集
        let mut elements: Vec<&str> = terminal_a.elements();
        for el in terminal_b.elements() {
            if !elements.contains(&el) {
                elements.push(el);
            }
        }

        let na = terminal_a.num_atoms();
        let nb = terminal_b.num_atoms();
        if na <= 0.0 || nb <= 0.0 {
            return Err(PdtoolsError::InvalidComposition(
                "terminal composition is empty".to_string(),
            ));
        }
        let ta: Vec<f64> = elements.iter().map(|e| terminal_a.amount_of(e) / na).collect();
        let tb: Vec<f64> = elements.iter().map(|e| terminal_b.amount_of(e) / nb).collect();

        let coords: Vec<f64> = entries
            .iter()
            .map(|entry| terminal_fraction(entry, &elements, &ta, &tb))
            .collect::<Result<_>>()?;

        // 端元参考能量：各端元处每原子能量最低的条目
        let e_ref_a = reference_energy(&entries, &coords, 0.0).ok_or_else(|| {
            PdtoolsError::PhaseDiagramError(format!(
                "no reference entry at terminal composition {}",
                terminal_a
            ))
        })?;
        let e_ref_b = reference_energy(&entries, &coords, 1.0).ok_or_else(|| {
            PdtoolsError::PhaseDiagramError(format!(
                "no reference entry at terminal composition {}",
                terminal_b
            ))
        })?;

        let eform: Vec<f64> = entries
            .iter()
            .zip(coords.iter())
            .map(|(entry, &x)| {
                entry.energy_per_atom() - ((1.0 - x) * e_ref_a + x * e_ref_b)
            })
            .collect();

        let hull = lower_hull(&coords, &eform);
        let eah: Vec<f64> = coords
            .iter()
            .zip(eform.iter())
            .map(|(&x, &e)| (e - hull_energy(&hull, x)).max(0.0))
            .collect();

        Ok(BinaryPhaseDiagram {
            entries,
            coords,
            eform,
            eah,
        })
    }
}

impl PhaseDiagram for BinaryPhaseDiagram {
    fn dim(&self) -> usize {
        2
    }

    fn entries(&self) -> &[PdEntry] {
        &self.entries
    }

    fn formation_energy_per_atom(&self, index: usize) -> f64 {
        self.eform[index]
    }

    fn energy_above_hull(&self, index: usize) -> f64 {
        self.eah[index]
    }

    fn stable_indices(&self) -> Vec<usize> {
        (0..self.entries.len())
            .filter(|&i| self.eah[i] < HULL_TOL)
            .collect()
    }

    fn unstable_indices(&self) -> Vec<usize> {
        (0..self.entries.len())
            .filter(|&i| self.eah[i] >= HULL_TOL)
            .collect()
    }

    fn coordinate(&self, index: usize) -> f64 {
        self.coords[index]
    }
}

/// 将条目组成分解为端元线性组合，返回端元 B 的原子分数
///
/// comp = α·tA + β·tB（tA, tB 为归一化端元），x = β/(α+β)。
fn terminal_fraction(
    entry: &PdEntry,
    elements: &[&str],
    ta: &[f64],
    tb: &[f64],
) -> Result<f64> {
    for el in entry.composition.elements() {
        if !elements.contains(&el) {
            return Err(PdtoolsError::PhaseDiagramError(format!(
                "composition {} contains element '{}' outside the terminal space",
                entry.composition, el
            )));
        }
    }

    let n: Vec<f64> = elements
        .iter()
        .map(|e| entry.composition.amount_of(e))
        .collect();

    // 最小二乘法解 2×2 正规方程
    let s11: f64 = ta.iter().map(|v| v * v).sum();
    let s12: f64 = ta.iter().zip(tb.iter()).map(|(a, b)| a * b).sum();
    let s22: f64 = tb.iter().map(|v| v * v).sum();
    let b1: f64 = ta.iter().zip(n.iter()).map(|(a, v)| a * v).sum();
    let b2: f64 = tb.iter().zip(n.iter()).map(|(b, v)| b * v).sum();

    let det = s11 * s22 - s12 * s12;
    if det.abs() < 1e-12 {
        return Err(PdtoolsError::PhaseDiagramError(
            "terminal compositions are not independent".to_string(),
        ));
    }

    let alpha = (s22 * b1 - s12 * b2) / det;
    let beta = (s11 * b2 - s12 * b1) / det;

    let natoms = entry.composition.num_atoms();
    for (i, &amount) in n.iter().enumerate() {
        let fitted = alpha * ta[i] + beta * tb[i];
        if (fitted - amount).abs() > DECOMP_TOL * natoms.max(1.0) {
            return Err(PdtoolsError::PhaseDiagramError(format!(
                "composition {} lies outside the terminal simplex",
                entry.composition
            )));
        }
    }
    if alpha < -DECOMP_TOL || beta < -DECOMP_TOL || alpha + beta <= DECOMP_TOL {
        return Err(PdtoolsError::PhaseDiagramError(format!(
            "composition {} lies outside the terminal simplex",
            entry.composition
        )));
    }

    Ok(beta / (alpha + beta))
}

/// 指定端元坐标处每原子能量的最小值
fn reference_energy(entries: &[PdEntry], coords: &[f64], x: f64) -> Option<f64> {
    entries
        .iter()
        .zip(coords.iter())
        .filter(|&(_, &c)| (c - x).abs() < 1e-8)
        .map(|(e, _)| e.energy_per_atom())
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// (x, Eform) 点集的一维下凸包顶点，x 升序
fn lower_hull(coords: &[f64], eform: &[f64]) -> Vec<(f64, f64)> {
    // 相同 x 只保留能量最低的点
    let mut points: Vec<(f64, f64)> = Vec::new();
    let mut sorted: Vec<(f64, f64)> = coords.iter().cloned().zip(eform.iter().cloned()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    for (x, e) in sorted {
        match points.last_mut() {
            Some((px, pe)) if (*px - x).abs() < 1e-9 => {
                if e < *pe {
                    *pe = e;
                }
            }
            _ => points.push((x, e)),
        }
    }

    // Andrew 单调链下半部分
    let mut hull: Vec<(f64, f64)> = Vec::new();
    for p in points {
        while hull.len() >= 2 {
            let o = hull[hull.len() - 2];
            let a = hull[hull.len() - 1];
            let cross = (a.0 - o.0) * (p.1 - o.1) - (a.1 - o.1) * (p.0 - o.0);
            if cross <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(p);
    }
    hull
}

/// 下凸包在 x 处的线性插值
fn hull_energy(hull: &[(f64, f64)], x: f64) -> f64 {
    if hull.is_empty() {
        return 0.0;
    }
    if x <= hull[0].0 {
        return hull[0].1;
    }
    for w in hull.windows(2) {
        let (x0, e0) = w[0];
        let (x1, e1) = w[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return e0 + t * (e1 - e0);
        }
    }
    hull[hull.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(pairs: &[(&str, f64)]) -> Composition {
        let mut c = Composition::new();
        for (el, n) in pairs {
            c.add(el, *n);
        }
        c
    }

    fn sample_entries() -> Vec<PdEntry> {
        vec![
            PdEntry::new(comp(&[("A", 1.0)]), -1.0),
            PdEntry::new(comp(&[("B", 1.0)]), -2.0),
            PdEntry::new(comp(&[("A", 1.0), ("B", 1.0)]), -4.0),
            PdEntry::new(comp(&[("A", 1.0), ("B", 3.0)]), -7.8),
        ]
    }

    fn sample_diagram() -> BinaryPhaseDiagram {
        BinaryPhaseDiagram::build(sample_entries(), &comp(&[("A", 1.0)]), &comp(&[("B", 1.0)]))
            .unwrap()
    }

    #[test]
    fn test_coordinates() {
        let pd = sample_diagram();
        assert!((pd.coordinate(0) - 0.0).abs() < 1e-9);
        assert!((pd.coordinate(1) - 1.0).abs() < 1e-9);
        assert!((pd.coordinate(2) - 0.5).abs() < 1e-9);
        assert!((pd.coordinate(3) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_formation_energies() {
        let pd = sample_diagram();
        assert!(pd.formation_energy_per_atom(0).abs() < 1e-9);
        assert!(pd.formation_energy_per_atom(1).abs() < 1e-9);
        // AB: -2.0 eV/atom，参考 -1.5 eV/atom
        assert!((pd.formation_energy_per_atom(2) - (-0.5)).abs() < 1e-9);
        // AB3: -1.95 eV/atom，参考 -1.75 eV/atom
        assert!((pd.formation_energy_per_atom(3) - (-0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_stability_and_e_above_hull() {
        let pd = sample_diagram();
        assert_eq!(pd.stable_indices(), vec![0, 1, 2]);
        assert_eq!(pd.unstable_indices(), vec![3]);
        // 包络在 x=0.75 处为 -0.25 eV/atom
        assert!((pd.energy_above_hull(3) - 0.05).abs() < 1e-9);
        assert!(pd.energy_above_hull(2).abs() < 1e-12);
    }

    #[test]
    fn test_compound_terminals() {
        // 端元 Fe 和 FeO3，条目 Fe2O3 的坐标 = 4/5
        let entries = vec![
            PdEntry::new(comp(&[("Fe", 1.0)]), -8.0),
            PdEntry::new(comp(&[("Fe", 1.0), ("O", 3.0)]), -20.0),
            PdEntry::new(comp(&[("Fe", 2.0), ("O", 3.0)]), -24.0),
        ];
        let pd = BinaryPhaseDiagram::build(
            entries,
            &comp(&[("Fe", 1.0)]),
            &comp(&[("Fe", 1.0), ("O", 3.0)]),
        )
        .unwrap();
        assert!((pd.coordinate(2) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_empty_entries_rejected() {
        let err =
            BinaryPhaseDiagram::build(vec![], &comp(&[("A", 1.0)]), &comp(&[("B", 1.0)]))
                .unwrap_err();
        assert!(matches!(err, PdtoolsError::PhaseDiagramError(_)));
    }

    #[test]
    fn test_composition_outside_terminal_space() {
        let entries = vec![
            PdEntry::new(comp(&[("A", 1.0)]), -1.0),
            PdEntry::new(comp(&[("B", 1.0)]), -1.0),
            PdEntry::new(comp(&[("C", 1.0)]), -1.0),
        ];
        let err =
            BinaryPhaseDiagram::build(entries, &comp(&[("A", 1.0)]), &comp(&[("B", 1.0)]))
                .unwrap_err();
        assert!(err.to_string().contains("outside the terminal space"));
    }

    #[test]
    fn test_missing_terminal_reference() {
        let entries = vec![PdEntry::new(comp(&[("A", 1.0)]), -1.0)];
        let err =
            BinaryPhaseDiagram::build(entries, &comp(&[("A", 1.0)]), &comp(&[("B", 1.0)]))
                .unwrap_err();
        assert!(err.to_string().contains("no reference entry"));
    }
}
