//! # 谱线与截面数据导出
//!
//! ## 支持格式
//! - 谱线 CSV: upper, lower, wavenumber, Afi, lower_energy, g_upper, intensity
//! - 截面 CSV: wavenumber, cross_section
//!
//! 谱线导出支持分块追加：先 `LineWriter::create`，每块调用 `write_lines`。
//!
//! ## 依赖关系
//! - 被 `commands/lines.rs`、`commands/cross_section.rs` 调用
//! - 使用 `spectra/join.rs` 的 LineQuantities
//! - 使用 `csv` + `serde` 写入 CSV 文件

use crate::error::{PicocrossError, Result};
use crate::spectra::{CrossSection, LineQuantities};
use crate::units::{Quantity, CENTIMETER, DIMENSIONLESS, INVERSE_SECOND, WAVENUMBER};

use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// 单条谱线记录
#[derive(Debug, Clone, Serialize)]
pub struct LineRecord {
    pub upper: u64,
    pub lower: u64,
    pub wavenumber: f64,
    #[serde(rename = "Afi")]
    pub a_coefficient: f64,
    pub lower_energy: f64,
    #[serde(rename = "g_upper")]
    pub upper_degeneracy: f64,
    pub intensity: f64,
}

/// 将逐线物理量与强度组装为记录（统一为 cm⁻¹、s⁻¹、cm/molecule）
pub fn line_records(lines: &LineQuantities, intensity: &Quantity) -> Result<Vec<LineRecord>> {
    if intensity.len() != lines.len() {
        return Err(PicocrossError::shape_mismatch(
            "line records (lines vs intensities)",
            &[lines.len()],
            intensity.shape(),
        ));
    }

    let wavenumber = lines.wavenumber.to_spectral(&WAVENUMBER)?.to_vec();
    let a_coefficient = lines.a_coefficient.to(&INVERSE_SECOND)?.to_vec();
    let lower_energy = lines.lower_energy.to_spectral(&WAVENUMBER)?.to_vec();
    let upper_degeneracy = lines.upper_degeneracy.to(&DIMENSIONLESS)?.to_vec();
    let intensity = intensity.to(&CENTIMETER)?.to_vec();

    Ok((0..lines.len())
        .map(|i| LineRecord {
            upper: lines.upper_id[i],
            lower: lines.lower_id[i],
            wavenumber: wavenumber[i],
            a_coefficient: a_coefficient[i],
            lower_energy: lower_energy[i],
            upper_degeneracy: upper_degeneracy[i],
            intensity: intensity[i],
        })
        .collect())
}

/// 分块写入的谱线 CSV
pub struct LineWriter {
    wtr: csv::Writer<File>,
    path: PathBuf,
    written: usize,
}

impl LineWriter {
    pub fn create(output_path: &Path) -> Result<Self> {
        let wtr = csv::Writer::from_path(output_path)?;
        Ok(LineWriter {
            wtr,
            path: output_path.to_path_buf(),
            written: 0,
        })
    }

    /// 追加一块谱线
    pub fn write_lines(&mut self, records: &[LineRecord]) -> Result<()> {
        for record in records {
            self.wtr.serialize(record)?;
        }
        self.written += records.len();
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        self.wtr.flush().map_err(|e| PicocrossError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(self.written)
    }
}

/// 导出截面为 CSV 格式
pub fn cross_section_to_csv(xs: &CrossSection, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["wavenumber", "cross_section"])?;

    for (x, y) in xs.grid().points().iter().zip(xs.values().iter()) {
        wtr.write_record(&[format!("{:.6}", x), format!("{:.6e}", y)])?;
    }

    wtr.flush().map_err(|e| PicocrossError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{State, StateTable, Transition, TransitionTable};
    use crate::spectra::{combine_states_transitions, WavenumberGrid};
    use crate::units::KELVIN;
    use std::fs;
    use tempfile::tempdir;

    fn joined_lines() -> LineQuantities {
        let states = StateTable::new(vec![
            State::new(1, 0.0, 1.0, 0.0),
            State::new(2, 1594.873096, 3.0, 1.0),
        ])
        .unwrap();
        let transitions = TransitionTable::new(vec![Transition::new(2, 1, 1.0e-2)]);
        combine_states_transitions(&states, &transitions)
            .into_quantities()
            .unwrap()
    }

    #[test]
    fn test_line_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lines.csv");

        let lines = joined_lines();
        let s = lines
            .intensity(&Quantity::scalar(296.0, KELVIN), &Quantity::from(2.0))
            .unwrap();
        let records = line_records(&lines, &s).unwrap();

        let mut writer = LineWriter::create(&path).unwrap();
        writer.write_lines(&records).unwrap();
        writer.write_lines(&records).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let content = fs::read_to_string(&path).unwrap();
        let mut rows = content.lines();
        assert_eq!(
            rows.next().unwrap(),
            "upper,lower,wavenumber,Afi,lower_energy,g_upper,intensity"
        );
        assert!(rows.next().unwrap().starts_with("2,1,1594.873096,0.01,0.0,3.0,"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_line_records_length_mismatch() {
        let lines = joined_lines();
        let err = line_records(&lines, &Quantity::from_vec(vec![1.0, 2.0], CENTIMETER))
            .unwrap_err();
        assert!(matches!(err, PicocrossError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_cross_section_to_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("xs.csv");

        let xs = CrossSection::new(WavenumberGrid::from_range(100.0, 101.0, 0.5).unwrap());
        cross_section_to_csv(&xs, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "wavenumber,cross_section");
        assert!(rows[1].starts_with("100.000000,"));
    }
}
