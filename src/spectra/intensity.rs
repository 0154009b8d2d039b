//! # 谱线积分强度
//!
//! ## 公式
//! ```text
//! S = g_u A / (8π c ν²) · exp(-c2 E_l / T) · (1 - exp(-c2 ν / T)) / Q
//! ```
//! 其中 ν 为跃迁波数，E_l 为下能级能量，c2 = h c / k_B。
//! 结果单位 cm / molecule。
//!
//! 零或负跃迁波数不做保护，按浮点规则得到非有限值。
//!
//! ## 依赖关系
//! - 被 `spectra/join.rs` 的 LineQuantities 与 `commands/` 调用
//! - 使用 `units/` 的 Quantity 与常数

use crate::error::Result;
use crate::units::constants::{second_radiation_constant, speed_of_light};
use crate::units::{Quantity, CENTIMETER, DIMENSIONLESS, KELVIN, WAVENUMBER};

use std::f64::consts::PI;

/// 计算逐线积分强度
///
/// 除 `temperature` 与 `partition` 为标量外，其余参数为等长序列。
pub fn intensity(
    transition_frequency: &Quantity,
    a_coefficient: &Quantity,
    lower_energy: &Quantity,
    upper_degeneracy: &Quantity,
    temperature: &Quantity,
    partition: &Quantity,
) -> Result<Quantity> {
    let temperature = temperature.to(&KELVIN)?;
    let partition = partition.to(&DIMENSIONLESS)?;

    let nu = transition_frequency.to_spectral(&WAVENUMBER)?;
    let e_lower = lower_energy.to_spectral(&WAVENUMBER)?;
    let g_upper = upper_degeneracy.to(&DIMENSIONLESS)?;

    let c2 = second_radiation_constant();

    // 受激辐射修正
    let stimulated = Quantity::from(1.0).try_sub(
        &c2.try_mul(&nu)?
            .try_div(&temperature)?
            .scale(-1.0)
            .exp()?,
    )?;

    // 下能级玻尔兹曼布居
    let population = c2
        .try_mul(&e_lower)?
        .try_div(&temperature)?
        .scale(-1.0)
        .exp()?;

    let prefactor = g_upper
        .try_mul(a_coefficient)?
        .try_div(&speed_of_light().scale(8.0 * PI).try_mul(&nu.powi(2))?)?;

    prefactor
        .try_mul(&population)?
        .try_mul(&stimulated)?
        .try_div(&partition)?
        .to(&CENTIMETER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PicocrossError;
    use crate::units::constants::SPEED_OF_LIGHT;
    use crate::units::{HERTZ, INVERSE_SECOND, MICROMETER};
    use approx::assert_relative_eq;

    const C2_CM_K: f64 = 1.438_776_877_503_933_8;

    /// 以 cgs 直接计算的参考值
    fn reference(nu: f64, a: f64, e: f64, g: f64, t: f64, q: f64) -> f64 {
        let c_cm = SPEED_OF_LIGHT * 100.0;
        g * a / (8.0 * PI * c_cm * nu * nu)
            * (-C2_CM_K * e / t).exp()
            * (1.0 - (-C2_CM_K * nu / t).exp())
            / q
    }

    fn lines() -> (Quantity, Quantity, Quantity, Quantity) {
        (
            Quantity::from_vec(vec![1594.873096, 3151.677108, 3657.155752], WAVENUMBER),
            Quantity::from_vec(vec![1.0e-2, 2.0e-3, 1.7e-3], INVERSE_SECOND),
            Quantity::from_vec(vec![0.0, 1594.873096, 0.0], WAVENUMBER),
            Quantity::from(vec![3.0, 5.0, 1.0]),
        )
    }

    #[test]
    fn test_intensity_matches_reference() {
        let (nu, a, e, g) = lines();
        let t = Quantity::scalar(1000.0, KELVIN);
        let q = Quantity::from(12.5);

        let s = intensity(&nu, &a, &e, &g, &t, &q).unwrap();
        assert_eq!(*s.unit(), CENTIMETER);
        assert_eq!(s.shape(), &[3]);

        let nus = nu.to_vec();
        let avals = a.to_vec();
        let evals = e.to_vec();
        let gvals = g.to_vec();
        for i in 0..3 {
            assert_relative_eq!(
                s.value()[[i]],
                reference(nus[i], avals[i], evals[i], gvals[i], 1000.0, 12.5),
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_frequency_input_equivalent() {
        let (nu, a, e, g) = lines();
        let t = Quantity::scalar(296.0, KELVIN);
        let q = Quantity::from(3.0);

        let base = intensity(&nu, &a, &e, &g, &t, &q).unwrap();
        let via_hz = intensity(&nu.to_spectral(&HERTZ).unwrap(), &a, &e, &g, &t, &q).unwrap();
        let via_um =
            intensity(&nu.to_spectral(&MICROMETER).unwrap(), &a, &e, &g, &t, &q).unwrap();

        for i in 0..3 {
            assert_relative_eq!(via_hz.value()[[i]], base.value()[[i]], max_relative = 1e-9);
            assert_relative_eq!(via_um.value()[[i]], base.value()[[i]], max_relative = 1e-9);
        }
    }

    #[test]
    fn test_zero_frequency_is_non_finite() {
        let s = intensity(
            &Quantity::from_vec(vec![0.0, 1000.0], WAVENUMBER),
            &Quantity::from_vec(vec![1.0, 1.0], INVERSE_SECOND),
            &Quantity::from_vec(vec![0.0, 0.0], WAVENUMBER),
            &Quantity::from(vec![1.0, 1.0]),
            &Quantity::scalar(300.0, KELVIN),
            &Quantity::from(1.0),
        )
        .unwrap();

        assert!(!s.value()[[0]].is_finite());
        assert!(s.value()[[1]].is_finite());
    }

    #[test]
    fn test_length_mismatch() {
        let (nu, a, e, _) = lines();
        let err = intensity(
            &nu,
            &a,
            &e,
            &Quantity::from(vec![1.0, 2.0]),
            &Quantity::scalar(300.0, KELVIN),
            &Quantity::from(1.0),
        )
        .unwrap_err();
        assert!(matches!(err, PicocrossError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_partition_must_be_dimensionless() {
        let (nu, a, e, g) = lines();
        let err = intensity(
            &nu,
            &a,
            &e,
            &g,
            &Quantity::scalar(300.0, KELVIN),
            &Quantity::scalar(1.0, KELVIN),
        )
        .unwrap_err();
        assert!(matches!(err, PicocrossError::UnitConversion { .. }));
    }
}
