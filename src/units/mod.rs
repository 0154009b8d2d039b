//! # 物理量与单位模块
//!
//! 提供运行时单位标记的物理量类型，支持光谱等价换算。
//!
//! ## 子模块
//! - `unit`: 量纲与单位
//! - `quantity`: 带单位的数组
//! - `constants`: 物理常数
//!
//! ## 依赖关系
//! - 被 `models/`、`spectra/` 使用
//! - 使用 `ndarray` 存储数值

pub mod constants;
pub mod quantity;
pub mod unit;

pub use quantity::Quantity;
pub use unit::{
    Dimension, SpectralFamily, Unit, CENTIMETER, DALTON, DIMENSIONLESS, ERG, GRAM, HERTZ,
    INVERSE_METER, INVERSE_SECOND, JOULE, KELVIN, KILOGRAM, METER, MICROMETER, MOLE, NANOMETER,
    SECOND, WAVENUMBER,
};
