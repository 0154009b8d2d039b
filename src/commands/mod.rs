//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `utils/` 与 picocross 库
//! - 子模块: partition, lines, cross_section, pipeline

pub mod cross_section;
pub mod lines;
pub mod partition;
pub mod pipeline;

use crate::cli::Commands;
use picocross::error::{PicocrossError, Result};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Partition(args) => partition::execute(args),
        Commands::Lines(args) => lines::execute(args),
        Commands::CrossSection(args) => cross_section::execute(args),
    }
}

/// 解析 "min-max" 形式的范围
pub fn parse_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(PicocrossError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| PicocrossError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| PicocrossError::InvalidRange(range.to_string()))?;

    if min < 0.0 || max <= min {
        return Err(PicocrossError::InvalidRange(format!(
            "{} (must be 0 <= min < max)",
            range
        )));
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("1000-2000").unwrap(), (1000.0, 2000.0));
        assert_eq!(parse_range("0.5 - 10").unwrap(), (0.5, 10.0));
        assert!(parse_range("2000-1000").is_err());
        assert!(parse_range("1000").is_err());
        assert!(parse_range("a-b").is_err());
    }
}
