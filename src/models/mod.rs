//! # 数据模型模块
//!
//! 定义组成与弛豫计算结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `phasediagram/`, `commands/` 使用
//! - 子模块: composition, relaxation

pub mod composition;
pub mod relaxation;

pub use composition::Composition;
pub use relaxation::{RelaxationResult, RY_TO_EV, RY_TO_J};
