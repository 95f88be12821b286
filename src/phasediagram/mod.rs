//! # 相图模块
//!
//! 定义相图条目、相图查询能力接口，以及二元体系的具体实现。
//!
//! ## 依赖关系
//! - 被 `commands/`, `igor/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: binary

pub mod binary;

pub use binary::BinaryPhaseDiagram;

use crate::error::{PdtoolsError, Result};
use crate::models::{Composition, RelaxationResult};

/// 相图条目：组成 + 总能量（此处为焓，eV）
#[derive(Debug, Clone)]
pub struct PdEntry {
    pub composition: Composition,
    pub energy: f64,
}

impl PdEntry {
    pub fn new(composition: Composition, energy: f64) -> Self {
        PdEntry {
            composition,
            energy,
        }
    }

    /// 由弛豫结果构造，能量取焓
    pub fn from_result(result: &RelaxationResult) -> Result<Self> {
        if result.composition.is_empty() {
            return Err(PdtoolsError::InvalidComposition(format!(
                "'{}' has an empty composition",
                result.name
            )));
        }
        Ok(PdEntry::new(
            result.composition.clone(),
            result.enthalpy_ev,
        ))
    }

    /// 每原子能量 (eV)
    pub fn energy_per_atom(&self) -> f64 {
        self.energy / self.composition.num_atoms()
    }
}

/// 按输入顺序将弛豫结果映射为相图条目
pub fn build_entries(results: &[RelaxationResult]) -> Result<Vec<PdEntry>> {
    results.iter().map(PdEntry::from_result).collect()
}

/// 相图查询能力接口
///
/// 条目顺序在构建时固定，所有按索引的查询都基于该顺序。
/// 任何凸包/稳定性实现（如 [`BinaryPhaseDiagram`]）满足此接口即可被导出器使用。
pub trait PhaseDiagram {
    /// 组成空间维数（独立端元组成个数）
    fn dim(&self) -> usize;

    /// 全部条目（固定顺序）
    fn entries(&self) -> &[PdEntry];

    /// 每原子生成焓 (eV)
    fn formation_energy_per_atom(&self, index: usize) -> f64;

    /// 凸包上方焓 (eV)
    fn energy_above_hull(&self, index: usize) -> f64;

    /// 位于凸包上的条目索引
    fn stable_indices(&self) -> Vec<usize>;

    /// 严格位于凸包上方的条目索引
    fn unstable_indices(&self) -> Vec<usize>;

    /// 一维投影坐标（端元 2 的原子分数，[0, 1]）
    fn coordinate(&self, index: usize) -> f64;
}
