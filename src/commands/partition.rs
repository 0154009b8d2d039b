//! # partition 子命令实现
//!
//! 读取 `.states` 文件，计算单一温度或温度区间上的配分函数。
//!
//! ## 依赖关系
//! - 使用 `cli/partition.rs` 定义的 PartitionArgs
//! - 使用 picocross 的 parsers、spectra

use super::parse_range;
use crate::cli::partition::PartitionArgs;
use crate::utils::output;

use picocross::error::{PicocrossError, Result};
use picocross::parsers;
use picocross::units::{Quantity, KELVIN};
use picocross::StateTable;

use tabled::{Table, Tabled};

/// 执行配分函数计算
pub fn execute(args: PartitionArgs) -> Result<()> {
    output::print_header("Partition Function");

    let states = parsers::load_exomol_states(&args.states)?;
    output::print_info(&format!(
        "Loaded {} states from '{}'",
        states.len(),
        args.states.display()
    ));

    match &args.temperatures {
        Some(range) => tabulate(&states, range, args.step),
        None => {
            let q = evaluate(&states, args.temperature)?;
            output::print_value(&format!("Q({} K)", args.temperature), &format!("{:.6}", q));
            Ok(())
        }
    }
}

fn evaluate(states: &StateTable, temperature: f64) -> Result<f64> {
    let q = states.partition_function(&Quantity::scalar(temperature, KELVIN))?;
    q.as_scalar()
        .ok_or_else(|| PicocrossError::Other("partition function is not a scalar".to_string()))
}

/// 在温度区间上打印 Q(T) 表格
fn tabulate(states: &StateTable, range: &str, step: f64) -> Result<()> {
    #[derive(Tabled)]
    struct PartitionRow {
        #[tabled(rename = "T (K)")]
        temperature: String,
        #[tabled(rename = "Q(T)")]
        partition: String,
    }

    let (t_min, t_max) = parse_range(range)?;
    if step <= 0.0 {
        return Err(PicocrossError::InvalidArgument(format!(
            "step must be positive, got {}",
            step
        )));
    }

    let n_points = ((t_max - t_min) / step).floor() as usize + 1;
    let rows = (0..n_points)
        .map(|i| t_min + i as f64 * step)
        .filter(|t| *t > 0.0)
        .map(|t| {
            Ok(PartitionRow {
                temperature: format!("{:.1}", t),
                partition: format!("{:.6}", evaluate(states, t)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{}", Table::new(rows));
    Ok(())
}
