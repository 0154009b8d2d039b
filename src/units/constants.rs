//! # 物理常数
//!
//! CODATA 2018 精确 SI 数值。
//!
//! ## 依赖关系
//! - 被 `units/quantity.rs`（光谱换算）和 `spectra/` 使用

use crate::units::quantity::Quantity;
use crate::units::unit::{Dimension, Unit, KELVIN, METER, MOLE, SECOND};

/// 玻尔兹曼常数 k_B (J/K)
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// 普朗克常数 h (J s)
pub const PLANCK: f64 = 6.626_070_15e-34;

/// 真空光速 c (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// 阿伏伽德罗常数 N_A (1/mol)
pub const AVOGADRO: f64 = 6.022_140_76e23;

pub fn boltzmann() -> Quantity {
    Quantity::scalar(BOLTZMANN, Unit::new(1.0, Dimension::ENERGY) / KELVIN)
}

pub fn planck() -> Quantity {
    Quantity::scalar(PLANCK, Unit::new(1.0, Dimension::ENERGY) * SECOND)
}

pub fn speed_of_light() -> Quantity {
    Quantity::scalar(SPEED_OF_LIGHT, METER / SECOND)
}

pub fn avogadro() -> Quantity {
    Quantity::scalar(AVOGADRO, MOLE.powi(-1))
}

/// 第二辐射常数 c2 = h c / k_B (m K)
///
/// 由常数推导，E[cm⁻¹] * c2 / T 为无量纲指数。
pub fn second_radiation_constant() -> Quantity {
    let unit = *planck().unit() * *speed_of_light().unit() / *boltzmann().unit();
    Quantity::scalar(PLANCK * SPEED_OF_LIGHT / BOLTZMANN, unit)
}
