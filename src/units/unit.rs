//! # 物理单位
//!
//! 单位 = SI 换算系数 + 量纲指数。
//!
//! ## 量纲
//! 以 SI 基本量纲 (长度、质量、时间、温度、物质的量) 的整数指数表示。
//! 光谱类单位 (波数、频率、波长、能量) 通过 [`SpectralFamily`] 识别，
//! 供 `Quantity::to_spectral` 使用。
//!
//! ## 依赖关系
//! - 被 `units/quantity.rs`、`units/constants.rs` 使用
//! - 无外部模块依赖

use std::fmt;
use std::ops::{Div, Mul};

/// SI 基本量纲指数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub length: i8,
    pub mass: i8,
    pub time: i8,
    pub temperature: i8,
    pub amount: i8,
}

impl Dimension {
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0);
    pub const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 1);
    pub const WAVENUMBER: Dimension = Dimension::new(-1, 0, 0, 0, 0);
    pub const FREQUENCY: Dimension = Dimension::new(0, 0, -1, 0, 0);
    pub const ENERGY: Dimension = Dimension::new(2, 1, -2, 0, 0);

    pub const fn new(length: i8, mass: i8, time: i8, temperature: i8, amount: i8) -> Self {
        Dimension {
            length,
            mass,
            time,
            temperature,
            amount,
        }
    }

    fn exponents(&self) -> [i8; 5] {
        [
            self.length,
            self.mass,
            self.time,
            self.temperature,
            self.amount,
        ]
    }

    fn from_exponents(e: [i8; 5]) -> Self {
        Dimension::new(e[0], e[1], e[2], e[3], e[4])
    }

    /// 是否无量纲
    pub fn is_dimensionless(&self) -> bool {
        *self == Dimension::NONE
    }

    /// 整数次幂
    pub fn powi(self, n: i32) -> Self {
        let e = self.exponents().map(|x| (x as i32 * n) as i8);
        Dimension::from_exponents(e)
    }

    /// 平方根（要求所有指数为偶数）
    pub fn sqrt(self) -> Option<Self> {
        let e = self.exponents();
        if e.iter().any(|x| x % 2 != 0) {
            return None;
        }
        Some(Dimension::from_exponents(e.map(|x| x / 2)))
    }

    /// 光谱类量纲识别
    pub fn spectral_family(&self) -> Option<SpectralFamily> {
        match *self {
            Dimension::WAVENUMBER => Some(SpectralFamily::Wavenumber),
            Dimension::FREQUENCY => Some(SpectralFamily::Frequency),
            Dimension::LENGTH => Some(SpectralFamily::Wavelength),
            Dimension::ENERGY => Some(SpectralFamily::Energy),
            _ => None,
        }
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        let (a, b) = (self.exponents(), rhs.exponents());
        Dimension::from_exponents([
            a[0] + b[0],
            a[1] + b[1],
            a[2] + b[2],
            a[3] + b[3],
            a[4] + b[4],
        ])
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self * rhs.powi(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }
        let symbols = ["m", "kg", "s", "K", "mol"];
        let parts: Vec<String> = symbols
            .iter()
            .zip(self.exponents())
            .filter(|(_, e)| *e != 0)
            .map(|(s, e)| {
                if e == 1 {
                    s.to_string()
                } else {
                    format!("{}^{}", s, e)
                }
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// 可通过光谱等价关系互相转换的量纲族
///
/// σ = ν / c = 1 / λ = E / (h c)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralFamily {
    /// 波数 (长度⁻¹)
    Wavenumber,
    /// 频率 (时间⁻¹)
    Frequency,
    /// 波长 (长度)
    Wavelength,
    /// 能量
    Energy,
}

impl SpectralFamily {
    /// 与波数是否成正比（波长为倒数关系）
    pub fn is_linear(&self) -> bool {
        !matches!(self, SpectralFamily::Wavelength)
    }
}

/// 物理单位：数值 × scale 得到 SI 值
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    scale: f64,
    dimension: Dimension,
    symbol: Option<&'static str>,
}

impl Unit {
    pub const fn named(symbol: &'static str, scale: f64, dimension: Dimension) -> Self {
        Unit {
            scale,
            dimension,
            symbol: Some(symbol),
        }
    }

    pub const fn new(scale: f64, dimension: Dimension) -> Self {
        Unit {
            scale,
            dimension,
            symbol: None,
        }
    }

    /// SI 换算系数
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// 量纲
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// 是否无量纲（允许非 1 的换算系数）
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// 同量纲单位之间的换算系数
    pub fn conversion_factor(&self, to: &Unit) -> Option<f64> {
        (self.dimension == to.dimension).then(|| self.scale / to.scale)
    }

    /// 整数次幂
    pub fn powi(&self, n: i32) -> Unit {
        Unit::new(self.scale.powi(n), self.dimension.powi(n))
    }

    /// 平方根
    pub fn sqrt(&self) -> Option<Unit> {
        self.dimension
            .sqrt()
            .map(|d| Unit::new(self.scale.sqrt(), d))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && ((self.scale - other.scale).abs() <= 1e-12 * self.scale.abs().max(other.scale.abs()))
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        Unit::new(self.scale * rhs.scale, self.dimension * rhs.dimension)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        Unit::new(self.scale / rhs.scale, self.dimension / rhs.dimension)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = self.symbol {
            return write!(f, "{}", symbol);
        }
        if self.scale == 1.0 {
            write!(f, "{}", self.dimension)
        } else {
            write!(f, "{:e} {}", self.scale, self.dimension)
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 常用单位
// ─────────────────────────────────────────────────────────────

pub const DIMENSIONLESS: Unit = Unit::named("", 1.0, Dimension::NONE);

pub const METER: Unit = Unit::named("m", 1.0, Dimension::LENGTH);
pub const CENTIMETER: Unit = Unit::named("cm", 1e-2, Dimension::LENGTH);
pub const MICROMETER: Unit = Unit::named("um", 1e-6, Dimension::LENGTH);
pub const NANOMETER: Unit = Unit::named("nm", 1e-9, Dimension::LENGTH);

pub const KILOGRAM: Unit = Unit::named("kg", 1.0, Dimension::MASS);
pub const GRAM: Unit = Unit::named("g", 1e-3, Dimension::MASS);
/// 原子质量单位 (Da)
pub const DALTON: Unit = Unit::named("Da", 1.660_539_066_60e-27, Dimension::MASS);

pub const SECOND: Unit = Unit::named("s", 1.0, Dimension::TIME);
pub const HERTZ: Unit = Unit::named("Hz", 1.0, Dimension::FREQUENCY);
/// 爱因斯坦 A 系数使用的速率单位
pub const INVERSE_SECOND: Unit = Unit::named("s^-1", 1.0, Dimension::FREQUENCY);

pub const KELVIN: Unit = Unit::named("K", 1.0, Dimension::TEMPERATURE);
pub const MOLE: Unit = Unit::named("mol", 1.0, Dimension::AMOUNT);

pub const JOULE: Unit = Unit::named("J", 1.0, Dimension::ENERGY);
pub const ERG: Unit = Unit::named("erg", 1e-7, Dimension::ENERGY);

/// 波数 cm⁻¹ (kayser)
pub const WAVENUMBER: Unit = Unit::named("cm^-1", 1e2, Dimension::WAVENUMBER);
pub const INVERSE_METER: Unit = Unit::named("m^-1", 1.0, Dimension::WAVENUMBER);
