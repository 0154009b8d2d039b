//! # cross-section 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/cross_section.rs`

use super::lines::LineSourceArgs;

use clap::Args;
use std::path::PathBuf;

/// cross-section 子命令参数
#[derive(Args, Debug)]
pub struct CrossSectionArgs {
    #[command(flatten)]
    pub source: LineSourceArgs,

    /// Molecular mass in Da (e.g., 18.0106 for H2O)
    #[arg(short, long)]
    pub mass: f64,

    /// Wavenumber range in cm^-1 (e.g., "1000-2000")
    #[arg(short, long)]
    pub range: String,

    /// Grid spacing in cm^-1
    #[arg(short, long, default_value_t = 0.01)]
    pub step: f64,

    /// Output CSV file (wavenumber, cross_section)
    #[arg(short, long, default_value = "cross_section.csv")]
    pub output: PathBuf,
}
