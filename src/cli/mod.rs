//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `partition`: 配分函数
//! - `lines`: 逐线强度
//! - `cross-section`: 多普勒展宽吸收截面
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: partition, lines, cross_section

pub mod cross_section;
pub mod lines;
pub mod partition;

use clap::{Parser, Subcommand};

/// picocross - 分子吸收光谱计算工具
#[derive(Parser)]
#[command(name = "picocross")]
#[command(author = "Ahmed Al-Refaie")]
#[command(version)]
#[command(about = "Molecular absorption cross-sections from ExoMol line lists", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the partition function Q(T) from a .states file
    Partition(partition::PartitionArgs),

    /// Compute integrated line intensities from .states and .trans files
    Lines(lines::LinesArgs),

    /// Compute a Doppler-broadened absorption cross-section on a wavenumber grid
    CrossSection(cross_section::CrossSectionArgs),
}
