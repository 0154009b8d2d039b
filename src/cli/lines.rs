//! # lines 子命令 CLI 定义
//!
//! `LineSourceArgs` 为 `lines` 与 `cross-section` 共用的输入参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`、`cli/cross_section.rs` 使用
//! - 参数传递给 `commands/lines.rs`、`commands/pipeline.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 跃迁引用缺失态时的处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OnMissing {
    /// Abort with an error naming the first unmatched transition
    #[default]
    Error,
    /// Drop unmatched transitions and report how many were dropped
    Skip,
    /// Keep unmatched transitions with NaN fields
    Nan,
}

impl std::fmt::Display for OnMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnMissing::Error => write!(f, "error"),
            OnMissing::Skip => write!(f, "skip"),
            OnMissing::Nan => write!(f, "nan"),
        }
    }
}

/// 线表输入参数
#[derive(Args, Debug)]
pub struct LineSourceArgs {
    /// ExoMol .states file
    pub states: PathBuf,

    /// ExoMol .trans file
    pub transitions: PathBuf,

    /// Temperature in K
    #[arg(short, long, default_value_t = 296.0)]
    pub temperature: f64,

    /// Number of transitions read per chunk
    #[arg(long, default_value_t = 100_000)]
    pub chunk_size: usize,

    /// How to handle transitions referencing states missing from the state file
    #[arg(long, value_enum, default_value = "error")]
    pub on_missing: OnMissing,

    /// Number of worker threads (0 = all cores)
    #[arg(short, long, default_value_t = 0, env = "PICOCROSS_JOBS")]
    pub jobs: usize,
}

/// lines 子命令参数
#[derive(Args, Debug)]
pub struct LinesArgs {
    #[command(flatten)]
    pub source: LineSourceArgs,

    /// Number of strongest lines to print
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Write every line to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
