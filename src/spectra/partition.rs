//! # 配分函数
//!
//! Q(T) = Σᵢ gᵢ exp(-c2 Eᵢ / T)，其中 c2 = h c / k_B，Eᵢ 以波数表示。
//!
//! ## 依赖关系
//! - 被 `models/state.rs`、`commands/` 调用
//! - 使用 `units/` 的 Quantity 与常数

use crate::error::{PicocrossError, Result};
use crate::units::constants::second_radiation_constant;
use crate::units::{Quantity, DIMENSIONLESS, KELVIN, WAVENUMBER};

/// 校验温度并换算为开尔文标量
///
/// 非正或非有限温度一律拒绝。
pub(crate) fn checked_temperature(temperature: &Quantity) -> Result<Quantity> {
    let kelvin = temperature.to(&KELVIN)?;

    let value = kelvin.as_scalar().ok_or_else(|| {
        PicocrossError::shape_mismatch("temperature (expected a scalar)", kelvin.shape(), &[])
    })?;

    if !(value.is_finite() && value > 0.0) {
        return Err(PicocrossError::InvalidPhysicalValue {
            quantity: "temperature".to_string(),
            value: temperature.to_string(),
        });
    }

    Ok(Quantity::scalar(value, KELVIN))
}

/// 计算配分函数
///
/// # Arguments
/// * `energy` - 能级能量，标量或序列，任意光谱类单位
/// * `degeneracy` - 简并度，与 `energy` 同形状（无量纲）
/// * `temperature` - 温度，必须 > 0
///
/// 返回无量纲标量。
pub fn partition_function(
    energy: &Quantity,
    degeneracy: &Quantity,
    temperature: &Quantity,
) -> Result<Quantity> {
    let temperature = checked_temperature(temperature)?;

    if !energy.is_scalar() && energy.len() != degeneracy.len() {
        return Err(PicocrossError::shape_mismatch(
            "partition function (energy vs degeneracy)",
            energy.shape(),
            degeneracy.shape(),
        ));
    }

    let energy = energy.to_spectral(&WAVENUMBER)?;
    let degeneracy = degeneracy.to(&DIMENSIONLESS)?;

    let exponent = second_radiation_constant()
        .try_mul(&energy)?
        .try_div(&temperature)?
        .scale(-1.0);

    let terms = degeneracy.try_mul(&exponent.exp()?)?;

    terms.sum().to(&DIMENSIONLESS)
}
