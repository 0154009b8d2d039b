//! # 多普勒线型
//!
//! ## 公式
//! ```text
//! α_D = sqrt(2 k_B T ln2 / m) · ν / c
//! f(ν̃) = sqrt(ln2 / π) / α_D · exp(-(ν̃ - ν)² ln2 / α_D²)
//! ```
//! `doppler_profile` 对 (跃迁 × 频点) 外积网格逐行并行求值。
//!
//! ## 依赖关系
//! - 被 `spectra/join.rs` 的 LineQuantities 与 `commands/` 调用
//! - 使用 `units/` 的 Quantity 与常数
//! - 使用 `ndarray` + `rayon` 按行并行

use crate::error::{PicocrossError, Result};
use crate::units::constants::{boltzmann, speed_of_light};
use crate::units::{Quantity, Unit, WAVENUMBER};

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use std::f64::consts::{LN_2, PI};

/// 多普勒半高半宽 (HWHM)
///
/// `transition` 可以是任意光谱类单位，内部统一为波数。
/// 温度与质量不做物理合理性检查。
pub fn doppler_hwhm(
    transition: &Quantity,
    temperature: &Quantity,
    molecular_mass: &Quantity,
) -> Result<Quantity> {
    let wavenumber = transition.to_spectral(&WAVENUMBER)?;

    let thermal_velocity = boltzmann()
        .scale(2.0 * LN_2)
        .try_mul(temperature)?
        .try_div(molecular_mass)?
        .sqrt()?;

    thermal_velocity
        .try_mul(&wavenumber)?
        .try_div(&speed_of_light())?
        .to(&WAVENUMBER)
}

/// 将线宽换算到网格单位
///
/// 波长与其它光谱量是倒数关系，线宽无法直接换算。
fn width_in(width: &Quantity, unit: &Unit) -> Result<Quantity> {
    let from = width.unit().dimension().spectral_family();
    let to = unit.dimension().spectral_family();

    match (from, to) {
        (Some(f), Some(t)) if width.unit().dimension() != unit.dimension() => {
            if f.is_linear() && t.is_linear() {
                width.to_spectral(unit)
            } else {
                Err(PicocrossError::unit_conversion(width.unit(), unit))
            }
        }
        _ => width.to(unit),
    }
}

fn flatten(q: &Quantity) -> Vec<f64> {
    q.value().iter().copied().collect()
}

/// 多普勒线型矩阵
///
/// # Arguments
/// * `bins` - 频率网格，长度 n_bins
/// * `transitions` - 跃迁中心，长度 n_transitions
/// * `doppler_hwhm` - 与 `transitions` 等长的半高半宽
///
/// 返回形状 (n_transitions, n_bins) 的矩阵，单位为网格单位的倒数。
pub fn doppler_profile(
    bins: &Quantity,
    transitions: &Quantity,
    doppler_hwhm: &Quantity,
) -> Result<Quantity> {
    let unit = *bins.unit();

    let grid = flatten(bins);
    let centres = flatten(&transitions.to_spectral(&unit)?);
    let widths = flatten(&width_in(doppler_hwhm, &unit)?);

    if centres.len() != widths.len() {
        return Err(PicocrossError::shape_mismatch(
            "doppler profile (transitions vs half-widths)",
            transitions.shape(),
            doppler_hwhm.shape(),
        ));
    }

    let norm = (LN_2 / PI).sqrt();
    let mut profile = Array2::<f64>::zeros((centres.len(), grid.len()));

    profile
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(centres.par_iter())
        .zip(widths.par_iter())
        .for_each(|((mut row, &centre), &alpha)| {
            let amplitude = norm / alpha;
            let inv_alpha2 = LN_2 / (alpha * alpha);
            for (cell, &bin) in row.iter_mut().zip(&grid) {
                let delta = bin - centre;
                *cell = amplitude * (-delta * delta * inv_alpha2).exp();
            }
        });

    Ok(Quantity::new(profile.into_dyn(), unit.powi(-1)))
}
