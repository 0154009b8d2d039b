//! # 截面谱组装
//!
//! 将逐线强度 S_i 与线型矩阵 f_ij 合成为波数网格上的吸收截面：
//! σ_j = Σᵢ S_i f_ij (cm² / molecule)。
//!
//! 分块计算时按块到达顺序累加，结果与块大小无关。
//!
//! ## 依赖关系
//! - 被 `commands/cross_section.rs` 调用
//! - 使用 `spectra/profile.rs` 的线型矩阵

use crate::error::{PicocrossError, Result};
use crate::units::{Quantity, Unit, CENTIMETER, WAVENUMBER};

use ndarray::{Array1, Ix1, Ix2};

/// 网格点数上限（约 1 GiB 的 f64）
pub const MAX_GRID_POINTS: usize = 1 << 27;

/// 等间距波数网格 (cm⁻¹)
#[derive(Debug, Clone)]
pub struct WavenumberGrid {
    points: Array1<f64>,
    step: f64,
}

impl WavenumberGrid {
    /// 由闭区间 [min, max] 与步长创建
    pub fn from_range(min: f64, max: f64, step: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min < 0.0 || max <= min {
            return Err(PicocrossError::InvalidRange(format!(
                "{}-{} (must be 0 <= min < max)",
                min, max
            )));
        }
        if step <= 0.0 {
            return Err(PicocrossError::InvalidArgument(format!(
                "step must be positive, got {}",
                step
            )));
        }

        // 步长整除区间时舍入误差不应多出一个点
        let span = (max - min) / step;
        let intervals = if (span - span.round()).abs() < 1e-9 {
            span.round()
        } else {
            span.ceil()
        };
        if !(intervals.is_finite() && intervals < MAX_GRID_POINTS as f64) {
            return Err(PicocrossError::InvalidRange(format!(
                "{}-{} with step {} exceeds {} grid points",
                min, max, step, MAX_GRID_POINTS
            )));
        }
        let n_points = intervals as usize + 1;
        let points = Array1::from_shape_fn(n_points, |i| min + i as f64 * step);

        Ok(WavenumberGrid { points, step })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &Array1<f64> {
        &self.points
    }

    /// 作为线型计算的频点
    pub fn as_quantity(&self) -> Quantity {
        Quantity::new(self.points.clone().into_dyn(), WAVENUMBER)
    }
}

/// 截面单位 cm²
fn area_unit() -> Unit {
    CENTIMETER.powi(2)
}

/// 单块截面：Σᵢ S_i f_ij
pub fn cross_section(intensities: &Quantity, profile: &Quantity) -> Result<Quantity> {
    let mismatch = || {
        PicocrossError::shape_mismatch(
            "cross-section (intensities vs profile rows)",
            intensities.shape(),
            profile.shape(),
        )
    };

    let s = intensities
        .value()
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| mismatch())?;
    let f = profile
        .value()
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| mismatch())?;

    if f.nrows() != s.len() {
        return Err(mismatch());
    }

    let unit = *intensities.unit() * *profile.unit();
    Quantity::new(s.dot(&f).into_dyn(), unit).to(&area_unit())
}

/// 累加中的截面谱
#[derive(Debug, Clone)]
pub struct CrossSection {
    grid: WavenumberGrid,
    values: Array1<f64>,
    lines: usize,
}

impl CrossSection {
    pub fn new(grid: WavenumberGrid) -> Self {
        let values = Array1::zeros(grid.len());
        CrossSection {
            grid,
            values,
            lines: 0,
        }
    }

    /// 累加一块谱线
    pub fn accumulate(&mut self, intensities: &Quantity, profile: &Quantity) -> Result<()> {
        let chunk = cross_section(intensities, profile)?;
        let chunk = chunk
            .into_value()
            .into_dimensionality::<Ix1>()
            .map_err(|e| PicocrossError::Other(e.to_string()))?;

        if chunk.len() != self.values.len() {
            return Err(PicocrossError::shape_mismatch(
                "cross-section accumulation",
                &[chunk.len()],
                &[self.values.len()],
            ));
        }

        self.values += &chunk;
        self.lines += intensities.len();
        Ok(())
    }

    pub fn grid(&self) -> &WavenumberGrid {
        &self.grid
    }

    /// 截面值 (cm²/molecule)
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// 已累加谱线数
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn as_quantity(&self) -> Quantity {
        Quantity::new(self.values.clone().into_dyn(), area_unit())
    }

    /// 截面峰值及其波数
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.grid
            .points()
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| v.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(x, y)| (*x, *y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectra::doppler_profile;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_from_range() {
        let grid = WavenumberGrid::from_range(1000.0, 1010.0, 0.5).unwrap();
        assert_eq!(grid.len(), 21);
        assert_relative_eq!(grid.points()[20], 1010.0);

        assert!(WavenumberGrid::from_range(10.0, 5.0, 1.0).is_err());
        assert!(WavenumberGrid::from_range(-1.0, 5.0, 1.0).is_err());
        assert!(WavenumberGrid::from_range(0.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn test_grid_too_large_rejected() {
        for (min, max, step) in [(0.0, 1e300, 1e-300), (0.0, 1e12, 1e-6), (0.0, 1e300, 1e-10)] {
            let err = WavenumberGrid::from_range(min, max, step).unwrap_err();
            assert!(matches!(err, PicocrossError::InvalidRange(_)));
        }

        // 恰好超出上限一个点
        let err = WavenumberGrid::from_range(0.0, MAX_GRID_POINTS as f64, 1.0).unwrap_err();
        assert!(matches!(err, PicocrossError::InvalidRange(_)));

        let grid = WavenumberGrid::from_range(0.0, 1000.0, 1.0).unwrap();
        assert_eq!(grid.len(), 1001);
    }

    #[test]
    fn test_cross_section_weights_profiles() {
        let grid = WavenumberGrid::from_range(990.0, 1010.0, 0.01).unwrap();
        let centres = Quantity::from_vec(vec![995.0, 1005.0], WAVENUMBER);
        let widths = Quantity::from_vec(vec![0.2, 0.3], WAVENUMBER);
        let profile = doppler_profile(&grid.as_quantity(), &centres, &widths).unwrap();

        let intensities = Quantity::from_vec(vec![2.0e-20, 1.0e-20], CENTIMETER);
        let xs = cross_section(&intensities, &profile).unwrap();

        assert_eq!(xs.shape(), &[grid.len()]);
        assert_eq!(*xs.unit(), area_unit());

        // 积分截面等于强度之和
        let integrated = xs.value().sum() * grid.step();
        assert_relative_eq!(integrated, 3.0e-20, max_relative = 1e-3);
    }

    #[test]
    fn test_chunked_accumulation_matches_whole() {
        let grid = WavenumberGrid::from_range(0.0, 20.0, 0.1).unwrap();
        let centres = vec![3.0, 7.5, 12.0, 15.5];
        let widths = vec![0.4, 0.5, 0.6, 0.7];
        let strengths = vec![1.0, 2.0, 3.0, 4.0];

        let mut whole = CrossSection::new(grid.clone());
        let profile = doppler_profile(
            &grid.as_quantity(),
            &Quantity::from_vec(centres.clone(), WAVENUMBER),
            &Quantity::from_vec(widths.clone(), WAVENUMBER),
        )
        .unwrap();
        whole
            .accumulate(&Quantity::from_vec(strengths.clone(), CENTIMETER), &profile)
            .unwrap();

        let mut chunked = CrossSection::new(grid.clone());
        for i in (0..4).step_by(2) {
            let profile = doppler_profile(
                &grid.as_quantity(),
                &Quantity::from_vec(centres[i..i + 2].to_vec(), WAVENUMBER),
                &Quantity::from_vec(widths[i..i + 2].to_vec(), WAVENUMBER),
            )
            .unwrap();
            chunked
                .accumulate(
                    &Quantity::from_vec(strengths[i..i + 2].to_vec(), CENTIMETER),
                    &profile,
                )
                .unwrap();
        }

        assert_eq!(whole.line_count(), 4);
        assert_eq!(chunked.line_count(), 4);
        for (a, b) in whole.values().iter().zip(chunked.values().iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-300);
        }

        let (peak_x, _) = whole.peak().unwrap();
        assert_relative_eq!(peak_x, 15.5, epsilon = 1e-9);
    }

    #[test]
    fn test_cross_section_shape_mismatch() {
        let grid = WavenumberGrid::from_range(0.0, 1.0, 0.5).unwrap();
        let profile = doppler_profile(
            &grid.as_quantity(),
            &Quantity::from_vec(vec![0.5, 0.6], WAVENUMBER),
            &Quantity::from_vec(vec![0.1, 0.1], WAVENUMBER),
        )
        .unwrap();
        let err = cross_section(&Quantity::from_vec(vec![1.0], CENTIMETER), &profile).unwrap_err();
        assert!(matches!(err, PicocrossError::ShapeMismatch { .. }));
    }
}
