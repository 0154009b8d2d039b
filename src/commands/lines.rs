//! # lines 子命令实现
//!
//! 分块计算逐线强度，打印最强的若干条谱线，可选导出全部谱线为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/lines.rs` 定义的 LinesArgs
//! - 使用 `commands/pipeline.rs` 的分块流程
//! - 使用 picocross 的 spectra::export

use super::pipeline;
use crate::cli::lines::LinesArgs;
use crate::utils::output;

use picocross::error::Result;
use picocross::spectra::export::{line_records, LineRecord, LineWriter};

use std::cmp::Ordering;
use tabled::{Table, Tabled};

/// 执行逐线强度计算
pub fn execute(args: LinesArgs) -> Result<()> {
    output::print_header("Line Intensities");

    let ctx = pipeline::load_context(&args.source)?;

    let mut writer = match &args.output {
        Some(path) => Some(LineWriter::create(path)?),
        None => None,
    };
    let mut strongest: Vec<LineRecord> = Vec::new();

    pipeline::run_chunks(&args.source, &ctx, |lines, intensity| {
        let records = line_records(lines, intensity)?;
        if let Some(writer) = writer.as_mut() {
            writer.write_lines(&records)?;
        }
        keep_strongest(&mut strongest, records, args.top);
        Ok(())
    })?;

    if let (Some(writer), Some(path)) = (writer, &args.output) {
        let written = writer.finish()?;
        output::print_written(&format!("{} lines", written), &path.display().to_string());
    }

    if !strongest.is_empty() {
        output::print_separator();
        print_line_table(&strongest);
    }

    Ok(())
}

/// 强度降序，NaN 排在最后
fn by_intensity_desc(a: &LineRecord, b: &LineRecord) -> Ordering {
    match (a.intensity.is_nan(), b.intensity.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.intensity.total_cmp(&a.intensity),
    }
}

/// 合并本块记录并只保留最强的 `count` 条
fn keep_strongest(strongest: &mut Vec<LineRecord>, records: Vec<LineRecord>, count: usize) {
    if count == 0 {
        return;
    }
    strongest.extend(records);
    strongest.sort_by(by_intensity_desc);
    strongest.truncate(count);
}

/// 打印谱线表格
fn print_line_table(lines: &[LineRecord]) {
    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "#")]
        rank: usize,
        #[tabled(rename = "upper")]
        upper: u64,
        #[tabled(rename = "lower")]
        lower: u64,
        #[tabled(rename = "ν (cm⁻¹)")]
        wavenumber: String,
        #[tabled(rename = "A (s⁻¹)")]
        a_coefficient: String,
        #[tabled(rename = "S (cm/molecule)")]
        intensity: String,
    }

    let rows: Vec<LineRow> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| LineRow {
            rank: i + 1,
            upper: l.upper,
            lower: l.lower,
            wavenumber: format!("{:.6}", l.wavenumber),
            a_coefficient: format!("{:.4e}", l.a_coefficient),
            intensity: format!("{:.4e}", l.intensity),
        })
        .collect();

    println!("{}", Table::new(rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(upper: u64, intensity: f64) -> LineRecord {
        LineRecord {
            upper,
            lower: 1,
            wavenumber: 1000.0,
            a_coefficient: 1.0,
            lower_energy: 0.0,
            upper_degeneracy: 1.0,
            intensity,
        }
    }

    #[test]
    fn test_keep_strongest() {
        let mut strongest = Vec::new();
        keep_strongest(&mut strongest, vec![record(1, 1e-20), record(2, f64::NAN)], 2);
        keep_strongest(&mut strongest, vec![record(3, 5e-20), record(4, 2e-21)], 2);

        let uppers: Vec<u64> = strongest.iter().map(|r| r.upper).collect();
        assert_eq!(uppers, vec![3, 1]);

        keep_strongest(&mut strongest, vec![record(5, 1.0)], 0);
        assert_eq!(strongest.len(), 2);
    }
}
