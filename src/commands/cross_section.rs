//! # cross-section 子命令实现
//!
//! 完整流水线：逐线强度 × 多普勒线型，按块累加到波数网格上。
//!
//! 线型矩阵为 (谱线 × 频点) 稠密矩阵，每块再按行数拆分，
//! 使单个矩阵不超过 `PROFILE_CELLS` 个元素。
//!
//! 中心、线宽或强度非有限的谱线（如 `--on-missing nan` 保留的缺失行、
//! 零波数跃迁）会使整条截面变为 NaN，累加前剔除并计数。
//!
//! ## 依赖关系
//! - 使用 `cli/cross_section.rs` 定义的 CrossSectionArgs
//! - 使用 `commands/pipeline.rs` 的分块流程
//! - 使用 picocross 的 spectra

use super::{parse_range, pipeline};
use crate::cli::cross_section::CrossSectionArgs;
use crate::utils::output;

use picocross::error::{PicocrossError, Result};
use picocross::spectra::export::cross_section_to_csv;
use picocross::spectra::{doppler_profile, CrossSection, LineQuantities, WavenumberGrid};
use picocross::units::{Quantity, DALTON};

/// 单个线型矩阵的元素上限（约 128 MiB）
const PROFILE_CELLS: usize = 1 << 24;

/// 执行截面计算
pub fn execute(args: CrossSectionArgs) -> Result<()> {
    output::print_header("Absorption Cross-Section");

    if !(args.mass.is_finite() && args.mass > 0.0) {
        return Err(PicocrossError::InvalidArgument(format!(
            "molecular mass must be positive, got {}",
            args.mass
        )));
    }

    let (min, max) = parse_range(&args.range)?;
    let grid = WavenumberGrid::from_range(min, max, args.step)?;
    output::print_info(&format!(
        "Grid: {}-{} cm^-1, {} points (step {})",
        min,
        max,
        grid.len(),
        args.step
    ));

    let ctx = pipeline::load_context(&args.source)?;
    let mass = Quantity::scalar(args.mass, DALTON);
    let bins = grid.as_quantity();
    let batch_rows = (PROFILE_CELLS / grid.len()).max(1);

    let mut xs = CrossSection::new(grid);
    let mut skipped = 0;

    pipeline::run_chunks(&args.source, &ctx, |lines, intensity| {
        let hwhm = lines.doppler_hwhm(&ctx.temperature, &mass)?;
        skipped += accumulate_batched(&mut xs, &bins, lines, intensity, &hwhm, batch_rows)?;
        Ok(())
    })?;

    if skipped > 0 {
        output::print_warning(&format!(
            "Skipped {} lines with non-finite centre, width or intensity",
            skipped
        ));
    }

    cross_section_to_csv(&xs, &args.output)?;

    output::print_separator();
    if let Some((x, y)) = xs.peak() {
        output::print_value("peak", &format!("{:.4e} cm^2/molecule at {:.4} cm^-1", y, x));
    }
    output::print_written(
        &format!("{} lines, {} points", xs.line_count(), xs.grid().len()),
        &args.output.display().to_string(),
    );

    Ok(())
}

/// 按行数拆分后累加一块谱线，返回剔除的非有限谱线数
fn accumulate_batched(
    xs: &mut CrossSection,
    bins: &Quantity,
    lines: &LineQuantities,
    intensity: &Quantity,
    hwhm: &Quantity,
    batch_rows: usize,
) -> Result<usize> {
    let centres = lines.wavenumber.to_vec();
    let widths = hwhm.to_vec();
    let strengths = intensity.to_vec();

    let finite: Vec<usize> = (0..centres.len())
        .filter(|&i| centres[i].is_finite() && widths[i].is_finite() && strengths[i].is_finite())
        .collect();
    let skipped = centres.len() - finite.len();

    for batch in finite.chunks(batch_rows) {
        let take = |values: &[f64], like: &Quantity| {
            Quantity::from_vec(batch.iter().map(|&i| values[i]).collect(), *like.unit())
        };

        let profile = doppler_profile(
            bins,
            &take(&centres[..], &lines.wavenumber),
            &take(&widths[..], hwhm),
        )?;
        xs.accumulate(&take(&strengths[..], intensity), &profile)?;
    }

    Ok(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use picocross::models::{State, StateTable, Transition, TransitionTable};
    use picocross::spectra::combine_states_transitions;
    use picocross::units::KELVIN;

    #[test]
    fn test_batched_matches_single_batch() {
        let states = StateTable::new(vec![
            State::new(1, 0.0, 1.0, 0.0),
            State::new(2, 1000.0, 3.0, 1.0),
            State::new(3, 1003.0, 5.0, 2.0),
            State::new(4, 1007.5, 7.0, 3.0),
        ])
        .unwrap();
        let transitions = TransitionTable::new(vec![
            Transition::new(2, 1, 1.0),
            Transition::new(3, 1, 2.0),
            Transition::new(4, 1, 3.0),
        ]);
        let lines = combine_states_transitions(&states, &transitions)
            .into_quantities()
            .unwrap();

        let t = Quantity::scalar(1000.0, KELVIN);
        let q = states.partition_function(&t).unwrap();
        let s = lines.intensity(&t, &q).unwrap();
        let hwhm = lines.doppler_hwhm(&t, &Quantity::scalar(18.0, DALTON)).unwrap();

        let grid = WavenumberGrid::from_range(995.0, 1012.0, 0.01).unwrap();
        let bins = grid.as_quantity();

        let mut single = CrossSection::new(grid.clone());
        assert_eq!(accumulate_batched(&mut single, &bins, &lines, &s, &hwhm, 3).unwrap(), 0);
        let mut batched = CrossSection::new(grid);
        assert_eq!(accumulate_batched(&mut batched, &bins, &lines, &s, &hwhm, 1).unwrap(), 0);

        assert_eq!(single.line_count(), 3);
        assert_eq!(batched.line_count(), 3);
        for (a, b) in single.values().iter().zip(batched.values().iter()) {
            approx::assert_relative_eq!(a, b, max_relative = 1e-12, epsilon = 1e-300);
        }
    }

    #[test]
    fn test_unmatched_lines_do_not_poison_spectrum() {
        let states = StateTable::new(vec![
            State::new(1, 0.0, 1.0, 0.0),
            State::new(2, 1000.0, 3.0, 1.0),
        ])
        .unwrap();
        let transitions = TransitionTable::new(vec![
            Transition::new(2, 1, 1.0),
            Transition::new(99, 1, 1.0),
        ]);
        let lines = combine_states_transitions(&states, &transitions).into_quantities_lossy();

        let t = Quantity::scalar(1000.0, KELVIN);
        let q = states.partition_function(&t).unwrap();
        let s = lines.intensity(&t, &q).unwrap();
        let hwhm = lines.doppler_hwhm(&t, &Quantity::scalar(18.0, DALTON)).unwrap();

        let grid = WavenumberGrid::from_range(999.9, 1000.1, 0.005).unwrap();
        assert_eq!(grid.len(), 41);
        let bins = grid.as_quantity();

        let mut xs = CrossSection::new(grid);
        let skipped = accumulate_batched(&mut xs, &bins, &lines, &s, &hwhm, 16).unwrap();

        assert_eq!(skipped, 1);
        assert_eq!(xs.line_count(), 1);
        assert!(xs.values().iter().all(|v| v.is_finite()));
        let (peak_x, _) = xs.peak().unwrap();
        assert!((peak_x - 1000.0).abs() < 0.005);
    }
}
