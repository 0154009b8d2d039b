//! # 跃迁数据模型
//!
//! ExoMol `.trans` 文件的内存表示。整表或分块 (chunk) 均使用 `TransitionTable`。
//!
//! ## 依赖关系
//! - 被 `parsers/transitions.rs` 构造
//! - 被 `spectra/join.rs` 使用

use serde::{Deserialize, Serialize};

/// 单条辐射跃迁
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// 上能级 ID
    pub upper: u64,
    /// 下能级 ID
    pub lower: u64,
    /// 爱因斯坦 A 系数 (s⁻¹)
    pub a_coefficient: f64,
}

impl Transition {
    pub fn new(upper: u64, lower: u64, a_coefficient: f64) -> Self {
        Transition {
            upper,
            lower,
            a_coefficient,
        }
    }
}

/// 跃迁表（保持文件行序）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    rows: Vec<Transition>,
}

impl TransitionTable {
    pub const COLUMNS: [&'static str; 3] = ["upper", "lower", "Afi"];

    pub fn new(rows: Vec<Transition>) -> Self {
        TransitionTable { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Transition] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition> {
        self.rows.iter()
    }

    /// 追加另一块（按块到达顺序）
    pub fn extend(&mut self, other: TransitionTable) {
        self.rows.extend(other.rows);
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        TransitionTable::new(iter.into_iter().collect())
    }
}
