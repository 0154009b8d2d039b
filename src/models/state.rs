//! # 量子态数据模型
//!
//! ExoMol `.states` 文件的内存表示。
//!
//! ## 依赖关系
//! - 被 `parsers/states.rs` 构造
//! - 被 `spectra/join.rs`、`spectra/partition.rs` 使用

use crate::error::{PicocrossError, Result};
use crate::units::{Quantity, WAVENUMBER};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 单个量子态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// 态 ID（连接键）
    pub id: u64,
    /// 能量 (cm⁻¹)
    pub energy: f64,
    /// 总简并度 g_total
    pub degeneracy: f64,
    /// 转动量子数 J（仅描述用，可为半整数）
    pub j: f64,
}

impl State {
    pub fn new(id: u64, energy: f64, degeneracy: f64, j: f64) -> Self {
        State {
            id,
            energy,
            degeneracy,
            j,
        }
    }
}

/// 量子态表，按 ID 建立哈希索引
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    states: Vec<State>,
    index: HashMap<u64, usize>,
}

impl StateTable {
    /// 列名，与 ExoMol 文件前四列对应
    pub const COLUMNS: [&'static str; 4] = ["ID", "Energy", "g_total", "J"];

    /// 由态列表创建，ID 必须唯一
    pub fn new(states: Vec<State>) -> Result<Self> {
        let mut index = HashMap::with_capacity(states.len());
        for (i, state) in states.iter().enumerate() {
            if index.insert(state.id, i).is_some() {
                return Err(PicocrossError::DuplicateStateId { id: state.id });
            }
        }
        Ok(StateTable { states, index })
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// 按 ID 查找
    pub fn get(&self, id: u64) -> Option<&State> {
        self.index.get(&id).map(|&i| &self.states[i])
    }

    /// 能量列 (cm⁻¹)
    pub fn energies(&self) -> Quantity {
        Quantity::from_vec(self.states.iter().map(|s| s.energy).collect(), WAVENUMBER)
    }

    /// 简并度列（无量纲）
    pub fn degeneracies(&self) -> Quantity {
        Quantity::from(
            self.states
                .iter()
                .map(|s| s.degeneracy)
                .collect::<Vec<f64>>(),
        )
    }

    /// 对整张表计算配分函数
    pub fn partition_function(&self, temperature: &Quantity) -> Result<Quantity> {
        crate::spectra::partition_function(&self.energies(), &self.degeneracies(), temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup() {
        let table = StateTable::new(vec![
            State::new(3, 10.0, 1.0, 0.0),
            State::new(1, 0.0, 1.0, 0.0),
        ])
        .unwrap();

        assert_eq!(table.get(1).map(|s| s.energy), Some(0.0));
        assert_eq!(table.get(3).map(|s| s.energy), Some(10.0));
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = StateTable::new(vec![
            State::new(1, 0.0, 1.0, 0.0),
            State::new(1, 5.0, 3.0, 1.0),
        ]);
        assert!(matches!(
            result,
            Err(PicocrossError::DuplicateStateId { id: 1 })
        ));
    }

    #[test]
    fn test_columns() {
        let table = StateTable::default();
        assert_eq!(table.columns(), &["ID", "Energy", "g_total", "J"]);
        assert!(table.is_empty());
    }
}
