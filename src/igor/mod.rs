//! # Igor Pro 文本导出模块
//!
//! 生成 Igor Pro 文本格式 (.itx) 的绘图脚本文件。
//!
//! ## 子模块
//! - `enthalpy_series`: 焓-压力序列文件（增量追加）
//! - `diagram2d`: 二维相图文件（整体重建）
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `phasediagram/` 的 `PhaseDiagram` 接口

pub mod diagram2d;
pub mod enthalpy_series;

pub use diagram2d::write_diagram_2d;
pub use enthalpy_series::append_enthalpy_series;
