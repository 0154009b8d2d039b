//! # 带单位的物理量
//!
//! `Quantity` = `ndarray::ArrayD<f64>` 数值 + [`Unit`]。
//! 标量为 0 维数组，序列为 1 维数组，线型矩阵为 2 维数组。
//!
//! ## 运算规则
//! - 乘除：单位相乘/相除，形状按 NumPy 规则广播
//! - 加减：右操作数先换算到左操作数单位，量纲不同则报 `UnitConversion`
//! - `exp`：参数必须无量纲（换算系数并入数值）
//! - `to_spectral`：波数 ⇄ 频率 ⇄ 波长 ⇄ 能量
//!
//! ## 依赖关系
//! - 被 `spectra/`、`models/` 使用
//! - 使用 `units/unit.rs`、`units/constants.rs`

use crate::error::{PicocrossError, Result};
use crate::units::constants::{PLANCK, SPEED_OF_LIGHT};
use crate::units::unit::{SpectralFamily, Unit, DIMENSIONLESS};

use ndarray::{arr0, Array1, ArrayD, Zip};
use std::fmt;

/// 带单位的物理量（标量或数组）
#[derive(Debug, Clone)]
pub struct Quantity {
    value: ArrayD<f64>,
    unit: Unit,
}

impl Quantity {
    /// 由任意维数组创建
    pub fn new(value: ArrayD<f64>, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// 标量
    pub fn scalar(value: f64, unit: Unit) -> Self {
        Quantity::new(arr0(value).into_dyn(), unit)
    }

    /// 一维序列
    pub fn from_vec(values: Vec<f64>, unit: Unit) -> Self {
        Quantity::new(Array1::from(values).into_dyn(), unit)
    }

    /// 无量纲量
    pub fn dimensionless(value: ArrayD<f64>) -> Self {
        Quantity::new(value, DIMENSIONLESS)
    }

    pub fn value(&self) -> &ArrayD<f64> {
        &self.value
    }

    pub fn into_value(self) -> ArrayD<f64> {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// 0 维（标量）
    pub fn is_scalar(&self) -> bool {
        self.value.ndim() == 0
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// 单元素时返回其数值
    pub fn as_scalar(&self) -> Option<f64> {
        if self.value.len() == 1 {
            self.value.iter().next().copied()
        } else {
            None
        }
    }

    /// 按行优先顺序展平
    pub fn to_vec(&self) -> Vec<f64> {
        self.value.iter().copied().collect()
    }

    // ─────────────────────────────────────────────────────────────
    // 单位换算
    // ─────────────────────────────────────────────────────────────

    /// 同量纲单位换算
    pub fn to(&self, unit: &Unit) -> Result<Quantity> {
        let factor = self
            .unit
            .conversion_factor(unit)
            .ok_or_else(|| PicocrossError::unit_conversion(self.unit, unit))?;
        Ok(Quantity::new(self.value.mapv(|v| v * factor), *unit))
    }

    /// 光谱等价换算：σ = ν/c = 1/λ = E/(hc)
    ///
    /// 零波长得到无穷大波数，不做数值保护。
    pub fn to_spectral(&self, unit: &Unit) -> Result<Quantity> {
        if self.unit.dimension() == unit.dimension() {
            return self.to(unit);
        }

        let (from, to) = match (
            self.unit.dimension().spectral_family(),
            unit.dimension().spectral_family(),
        ) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(PicocrossError::unit_conversion(self.unit, unit)),
        };

        let hc = PLANCK * SPEED_OF_LIGHT;
        let scale = self.unit.scale();
        let target = unit.scale();

        let value = self.value.mapv(|v| {
            let si = v * scale;
            // 统一到 SI 波数 (m⁻¹)
            let sigma = match from {
                SpectralFamily::Wavenumber => si,
                SpectralFamily::Frequency => si / SPEED_OF_LIGHT,
                SpectralFamily::Wavelength => 1.0 / si,
                SpectralFamily::Energy => si / hc,
            };
            let out = match to {
                SpectralFamily::Wavenumber => sigma,
                SpectralFamily::Frequency => sigma * SPEED_OF_LIGHT,
                SpectralFamily::Wavelength => 1.0 / sigma,
                SpectralFamily::Energy => sigma * hc,
            };
            out / target
        });

        Ok(Quantity::new(value, *unit))
    }

    // ─────────────────────────────────────────────────────────────
    // 算术
    // ─────────────────────────────────────────────────────────────

    fn zip_with(
        &self,
        rhs: &Quantity,
        context: &str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<ArrayD<f64>> {
        let mismatch = || PicocrossError::shape_mismatch(context, self.shape(), rhs.shape());

        let shape = broadcast_shape(self.shape(), rhs.shape()).ok_or_else(mismatch)?;
        let a = self.value.broadcast(shape.as_slice()).ok_or_else(mismatch)?;
        let b = rhs.value.broadcast(shape.as_slice()).ok_or_else(mismatch)?;

        Ok(Zip::from(&a).and(&b).map_collect(|&x, &y| f(x, y)))
    }

    pub fn try_mul(&self, rhs: &Quantity) -> Result<Quantity> {
        let value = self.zip_with(rhs, "multiplication", |a, b| a * b)?;
        Ok(Quantity::new(value, self.unit * rhs.unit))
    }

    pub fn try_div(&self, rhs: &Quantity) -> Result<Quantity> {
        let value = self.zip_with(rhs, "division", |a, b| a / b)?;
        Ok(Quantity::new(value, self.unit / rhs.unit))
    }

    pub fn try_add(&self, rhs: &Quantity) -> Result<Quantity> {
        let rhs = rhs.to(&self.unit)?;
        let value = self.zip_with(&rhs, "addition", |a, b| a + b)?;
        Ok(Quantity::new(value, self.unit))
    }

    pub fn try_sub(&self, rhs: &Quantity) -> Result<Quantity> {
        let rhs = rhs.to(&self.unit)?;
        let value = self.zip_with(&rhs, "subtraction", |a, b| a - b)?;
        Ok(Quantity::new(value, self.unit))
    }

    /// 乘以纯数
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.value.mapv(|v| v * factor), self.unit)
    }

    pub fn powi(&self, n: i32) -> Quantity {
        Quantity::new(self.value.mapv(|v| v.powi(n)), self.unit.powi(n))
    }

    /// 平方根，量纲指数必须全为偶数
    pub fn sqrt(&self) -> Result<Quantity> {
        let unit = self
            .unit
            .sqrt()
            .ok_or_else(|| PicocrossError::unit_conversion(self.unit, "an even-power unit"))?;
        Ok(Quantity::new(self.value.mapv(f64::sqrt), unit))
    }

    /// 指数函数，参数必须无量纲
    pub fn exp(&self) -> Result<Quantity> {
        if !self.unit.is_dimensionless() {
            return Err(PicocrossError::unit_conversion(self.unit, "dimensionless"));
        }
        let scale = self.unit.scale();
        Ok(Quantity::dimensionless(
            self.value.mapv(|v| (v * scale).exp()),
        ))
    }

    /// 所有元素求和，得到标量
    pub fn sum(&self) -> Quantity {
        Quantity::scalar(self.value.sum(), self.unit)
    }
}

/// NumPy 广播规则下的结果形状
fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let n = a.len().max(b.len());
    let dim_at = |s: &[usize], i: usize| {
        let offset = n - s.len();
        if i < offset {
            1
        } else {
            s[i - offset]
        }
    };

    (0..n)
        .map(|i| match (dim_at(a, i), dim_at(b, i)) {
            (x, y) if x == y => Some(x),
            (1, y) => Some(y),
            (x, 1) => Some(x),
            _ => None,
        })
        .collect()
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::scalar(value, DIMENSIONLESS)
    }
}

impl From<Vec<f64>> for Quantity {
    fn from(values: Vec<f64>) -> Self {
        Quantity::from_vec(values, DIMENSIONLESS)
    }
}

impl From<Array1<f64>> for Quantity {
    fn from(values: Array1<f64>) -> Self {
        Quantity::dimensionless(values.into_dyn())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.first() {
            Some(v) if self.is_scalar() => write!(f, "{} {}", v, self.unit),
            _ => write!(f, "{} {}", self.value, self.unit),
        }
    }
}
