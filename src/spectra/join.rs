//! # 态–跃迁连接
//!
//! 将跃迁表与态表做两次左连接（上能级、下能级），得到每条跃迁的
//! 跃迁波数、A 系数、下能级能量、上能级简并度。
//!
//! ## 缺失匹配
//! 跃迁引用的态不在态表中时，对应字段为 `None`，与真实的零能量区分开。
//! 调用方通过以下方式之一取得数值列：
//! - `into_quantities`: 严格模式，遇到缺失报 `MissingJoinMatch`
//! - `into_quantities_lossy`: 缺失字段写为 NaN
//! - `matched`: 丢弃缺失行
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/` 的 StateTable、TransitionTable

use crate::error::{PicocrossError, Result};
use crate::models::{StateTable, TransitionTable};
use crate::units::{Quantity, INVERSE_SECOND, WAVENUMBER};

/// 连接后的单条跃迁
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTransition {
    pub upper_id: u64,
    pub lower_id: u64,
    /// E_upper - E_lower (cm⁻¹)
    pub wavenumber: Option<f64>,
    /// A 系数 (s⁻¹)
    pub a_coefficient: f64,
    /// 下能级能量 (cm⁻¹)
    pub lower_energy: Option<f64>,
    /// 上能级简并度
    pub upper_degeneracy: Option<f64>,
}

impl JoinedTransition {
    /// 上下能级均已匹配
    pub fn is_matched(&self) -> bool {
        self.wavenumber.is_some() && self.lower_energy.is_some() && self.upper_degeneracy.is_some()
    }
}

/// 连接结果：每条源跃迁对应一条记录，保持源行序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedTransitions {
    rows: Vec<JoinedTransition>,
}

/// 完整的逐线物理量（均为等长一维序列）
#[derive(Debug, Clone)]
pub struct LineQuantities {
    pub upper_id: Vec<u64>,
    pub lower_id: Vec<u64>,
    /// 跃迁波数 (cm⁻¹)
    pub wavenumber: Quantity,
    /// A 系数 (s⁻¹)
    pub a_coefficient: Quantity,
    /// 下能级能量 (cm⁻¹)
    pub lower_energy: Quantity,
    /// 上能级简并度（无量纲）
    pub upper_degeneracy: Quantity,
}

impl LineQuantities {
    fn from_columns(
        upper_id: Vec<u64>,
        lower_id: Vec<u64>,
        wavenumber: Vec<f64>,
        a_coefficient: Vec<f64>,
        lower_energy: Vec<f64>,
        upper_degeneracy: Vec<f64>,
    ) -> Self {
        LineQuantities {
            upper_id,
            lower_id,
            wavenumber: Quantity::from_vec(wavenumber, WAVENUMBER),
            a_coefficient: Quantity::from_vec(a_coefficient, INVERSE_SECOND),
            lower_energy: Quantity::from_vec(lower_energy, WAVENUMBER),
            upper_degeneracy: Quantity::from(upper_degeneracy),
        }
    }

    pub fn len(&self) -> usize {
        self.upper_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper_id.is_empty()
    }

    /// 逐线积分强度
    pub fn intensity(&self, temperature: &Quantity, partition: &Quantity) -> Result<Quantity> {
        super::intensity(
            &self.wavenumber,
            &self.a_coefficient,
            &self.lower_energy,
            &self.upper_degeneracy,
            temperature,
            partition,
        )
    }

    /// 逐线多普勒半高半宽
    pub fn doppler_hwhm(&self, temperature: &Quantity, molecular_mass: &Quantity) -> Result<Quantity> {
        super::doppler_hwhm(&self.wavenumber, temperature, molecular_mass)
    }
}

impl JoinedTransitions {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[JoinedTransition] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JoinedTransition> {
        self.rows.iter()
    }

    /// 未匹配行数
    pub fn unmatched_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_matched()).count()
    }

    /// 四个并行列：(跃迁波数, A 系数, 下能级能量, 上能级简并度)
    #[allow(clippy::type_complexity)]
    pub fn columns(&self) -> (Vec<Option<f64>>, Vec<f64>, Vec<Option<f64>>, Vec<Option<f64>>) {
        let mut wavenumber = Vec::with_capacity(self.len());
        let mut a_coefficient = Vec::with_capacity(self.len());
        let mut lower_energy = Vec::with_capacity(self.len());
        let mut upper_degeneracy = Vec::with_capacity(self.len());

        for row in &self.rows {
            wavenumber.push(row.wavenumber);
            a_coefficient.push(row.a_coefficient);
            lower_energy.push(row.lower_energy);
            upper_degeneracy.push(row.upper_degeneracy);
        }

        (wavenumber, a_coefficient, lower_energy, upper_degeneracy)
    }

    /// 严格模式：任一行缺失即报错
    pub fn into_quantities(self) -> Result<LineQuantities> {
        if let Some((row, r)) = self.rows.iter().enumerate().find(|(_, r)| !r.is_matched()) {
            return Err(PicocrossError::MissingJoinMatch {
                row,
                upper_id: r.upper_id,
                lower_id: r.lower_id,
            });
        }
        Ok(self.into_quantities_lossy())
    }

    /// 缺失字段写为 NaN，行数与源跃迁表一致
    pub fn into_quantities_lossy(self) -> LineQuantities {
        collect_lines(self.rows.iter())
    }

    /// 丢弃缺失行，返回 (物理量, 丢弃行数)
    pub fn matched(self) -> (LineQuantities, usize) {
        let dropped = self.unmatched_count();
        (collect_lines(self.rows.iter().filter(|r| r.is_matched())), dropped)
    }
}

fn collect_lines<'a>(rows: impl Iterator<Item = &'a JoinedTransition>) -> LineQuantities {
    let mut upper_id = Vec::new();
    let mut lower_id = Vec::new();
    let mut wavenumber = Vec::new();
    let mut a_coefficient = Vec::new();
    let mut lower_energy = Vec::new();
    let mut upper_degeneracy = Vec::new();

    for row in rows {
        upper_id.push(row.upper_id);
        lower_id.push(row.lower_id);
        wavenumber.push(row.wavenumber.unwrap_or(f64::NAN));
        a_coefficient.push(row.a_coefficient);
        lower_energy.push(row.lower_energy.unwrap_or(f64::NAN));
        upper_degeneracy.push(row.upper_degeneracy.unwrap_or(f64::NAN));
    }

    LineQuantities::from_columns(
        upper_id,
        lower_id,
        wavenumber,
        a_coefficient,
        lower_energy,
        upper_degeneracy,
    )
}

/// 连接态表与跃迁表
///
/// 按 ID 哈希查找上、下能级；输出行数与顺序与 `transitions` 完全一致。
/// 分块输入时每块独立连接，由调用方按块顺序拼接。
pub fn combine_states_transitions(
    states: &StateTable,
    transitions: &TransitionTable,
) -> JoinedTransitions {
    let rows = transitions
        .iter()
        .map(|t| {
            let upper = states.get(t.upper);
            let lower = states.get(t.lower);

            JoinedTransition {
                upper_id: t.upper,
                lower_id: t.lower,
                wavenumber: upper.zip(lower).map(|(u, l)| u.energy - l.energy),
                a_coefficient: t.a_coefficient,
                lower_energy: lower.map(|l| l.energy),
                upper_degeneracy: upper.map(|u| u.degeneracy),
            }
        })
        .collect();

    JoinedTransitions { rows }
}
