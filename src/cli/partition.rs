//! # partition 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/partition.rs`

use clap::Args;
use std::path::PathBuf;

/// partition 子命令参数
#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// ExoMol .states file
    pub states: PathBuf,

    /// Temperature in K
    #[arg(short, long, default_value_t = 296.0)]
    pub temperature: f64,

    /// Tabulate Q over a temperature range in K (e.g., "100-3000")
    #[arg(long)]
    pub temperatures: Option<String>,

    /// Temperature step in K for --temperatures
    #[arg(long, default_value_t = 100.0)]
    pub step: f64,
}
