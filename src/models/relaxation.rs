//! # 弛豫计算结果数据模型
//!
//! 存储 PWSCF vc-relax 输出的提取信息，负责 Ry → eV 与焓的单位换算。
//!
//! ## 依赖关系
//! - 被 `parsers/pwscf_out.rs`, `commands/` 使用
//! - 使用 `models/composition.rs`

use crate::models::Composition;
use serde::{Deserialize, Serialize};

/// 1 Ry = 13.605693123 eV
pub const RY_TO_EV: f64 = 13.605693123;

/// 1 Ry = 2.179872 × 10⁻¹⁸ J
pub const RY_TO_J: f64 = 2.179872;

/// 一次 vc-relax 计算的最终结果
///
/// 构造后不再修改。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaxationResult {
    /// 结构名称（通常取自输出文件名）
    pub name: String,

    /// 化学组成（首次出现顺序）
    pub composition: Composition,

    /// 最终自洽能量 (eV)
    pub energy_ev: f64,

    /// 最终晶胞体积 (Å³)
    pub volume: f64,

    /// 焓 H = E + PV (eV)
    pub enthalpy_ev: f64,

    /// 目标压力 (kBar)
    pub pressure_kbar: f64,
}

impl RelaxationResult {
    /// 由 Ry 单位的自洽结果构造，完成 PV 修正与 eV 换算
    ///
    /// H(Ry) = E(Ry) + P(GPa) × V(Å³) / (RY_TO_J × 10⁴)，P(GPa) = P(kBar)/10。
    pub fn from_scf(
        name: impl Into<String>,
        composition: Composition,
        energy_ry: f64,
        volume: f64,
        pressure_kbar: f64,
    ) -> Self {
        let pressure_gpa = pressure_kbar / 10.0;
        let enthalpy_ry = energy_ry + pressure_gpa * volume / (RY_TO_J * 10000.0);

        RelaxationResult {
            name: name.into(),
            composition,
            energy_ev: energy_ry * RY_TO_EV,
            volume,
            enthalpy_ev: enthalpy_ry * RY_TO_EV,
            pressure_kbar,
        }
    }

    /// 每原子焓 (eV)
    pub fn enthalpy_per_atom(&self) -> f64 {
        self.enthalpy_ev / self.composition.num_atoms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe2o3() -> Composition {
        let mut comp = Composition::new();
        comp.add("Fe", 2.0);
        comp.add("O", 3.0);
        comp
    }

    #[test]
    fn test_enthalpy_conversion_literal() {
        // E = -100 Ry, V = 50 Å³, P = 100 kBar:
        // PV 项 = 10 × 50 / 21798.72 = 0.0229368 Ry
        // H = -99.9770631 Ry = -1360.25724 eV
        let r = RelaxationResult::from_scf("x", fe2o3(), -100.0, 50.0, 100.0);
        assert!((r.enthalpy_ev - (-1360.25724)).abs() < 1e-4);
        assert!((r.energy_ev - (-1360.5693123)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_pressure_enthalpy_equals_energy() {
        let r = RelaxationResult::from_scf("x", fe2o3(), -31.5, 42.0, 0.0);
        assert!((r.enthalpy_ev - r.energy_ev).abs() < 1e-12);
    }

    #[test]
    fn test_enthalpy_per_atom() {
        let r = RelaxationResult::from_scf("x", fe2o3(), -10.0, 50.0, 0.0);
        assert!((r.enthalpy_per_atom() - (-10.0 * RY_TO_EV / 5.0)).abs() < 1e-9);
    }
}
