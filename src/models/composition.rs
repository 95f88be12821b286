//! # 组成数据模型
//!
//! 定义有序的化学组成表示：元素 → 原子数，保持首次出现顺序。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `phasediagram/`, `igor/` 使用
//! - 无外部模块依赖

use crate::error::{PdtoolsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 化学组成
///
/// 元素顺序 = 首次加入顺序（不按电负性或字母排序）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// (元素符号, 原子数) 列表
    items: Vec<(String, f64)>,
}

impl Composition {
    pub fn new() -> Self {
        Composition { items: Vec::new() }
    }

    /// 累加一个元素的原子数，首次出现的元素追加到末尾
    pub fn add(&mut self, element: &str, amount: f64) {
        for (el, n) in self.items.iter_mut() {
            if el == element {
                *n += amount;
                return;
            }
        }
        self.items.push((element.to_string(), amount));
    }

    /// 从化学式字符串解析，如 "Fe2O3"、"ScH6"、"H"
    pub fn from_formula(formula: &str) -> Result<Self> {
        let re = Regex::new(r"([A-Z][a-z]?)([0-9]*\.?[0-9]*)").unwrap();

        let mut comp = Composition::new();
        let mut consumed = 0;
        for cap in re.captures_iter(formula.trim()) {
            let m = cap.get(0).unwrap();
            if m.start() != consumed {
                break;
            }
            consumed = m.end();

            let amount = if cap[2].is_empty() {
                1.0
            } else {
                cap[2].parse::<f64>().map_err(|_| {
                    PdtoolsError::InvalidComposition(format!(
                        "bad amount '{}' in formula '{}'",
                        &cap[2], formula
                    ))
                })?
            };
            comp.add(&cap[1], amount);
        }

        if comp.is_empty() || consumed != formula.trim().len() {
            return Err(PdtoolsError::InvalidComposition(format!(
                "cannot parse formula '{}'",
                formula
            )));
        }

        Ok(comp)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 总原子数
    pub fn num_atoms(&self) -> f64 {
        self.items.iter().map(|(_, n)| n).sum()
    }

    /// 指定元素的原子数（不存在则为 0）
    pub fn amount_of(&self, element: &str) -> f64 {
        self.items
            .iter()
            .find(|(el, _)| el == element)
            .map(|(_, n)| *n)
            .unwrap_or(0.0)
    }

    /// 元素符号列表（首次出现顺序）
    pub fn elements(&self) -> Vec<&str> {
        self.items.iter().map(|(el, _)| el.as_str()).collect()
    }

    /// 波形名用化学式：原子数始终显式写出、无空格，如 "Fe2O3"、"Sc1H6"
    pub fn formula(&self) -> String {
        self.items
            .iter()
            .map(|(el, n)| format!("{}{}", el, format_amount(*n)))
            .collect::<Vec<_>>()
            .join("")
    }

    /// 约化化学式：整数原子数除以最大公约数，1 省略，如 "FeO3"
    ///
    /// 原子数非整数时退回 `formula()`。
    pub fn reduced_formula(&self) -> String {
        let counts: Vec<u64> = self
            .items
            .iter()
            .filter_map(|(_, n)| {
                let r = n.round();
                if (n - r).abs() < 1e-8 && r > 0.0 {
                    Some(r as u64)
                } else {
                    None
                }
            })
            .collect();

        if counts.len() != self.items.len() {
            return self.formula();
        }

        let g = counts.iter().fold(0u64, |acc, &c| gcd(acc, c)).max(1);

        self.items
            .iter()
            .zip(counts.iter())
            .map(|((el, _), &c)| {
                let c = c / g;
                if c == 1 {
                    el.clone()
                } else {
                    format!("{}{}", el, c)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

impl Default for Composition {
    fn default() -> Self {
        Composition::new()
    }
}

impl std::fmt::Display for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .items
            .iter()
            .map(|(el, n)| format!("{}{}", el, format_amount(*n)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// 整数原子数不带小数点输出
fn format_amount(n: f64) -> String {
    if (n - n.round()).abs() < 1e-8 {
        format!("{}", n.round() as i64)
    } else {
        format!("{}", n)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
