//! # 线程池配置
//!
//! 按 `--jobs` 初始化 rayon 全局线程池，线型矩阵按行在其中并行计算。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 使用
//! - 使用 `rayon`、`num_cpus`

use picocross::error::{PicocrossError, Result};

/// 解析线程数，0 表示使用全部核心
pub fn resolve_jobs(jobs: usize) -> usize {
    if jobs == 0 {
        num_cpus::get()
    } else {
        jobs
    }
}

/// 初始化全局线程池，返回实际线程数
pub fn init_thread_pool(jobs: usize) -> Result<usize> {
    let jobs = resolve_jobs(jobs);
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .map_err(|e| PicocrossError::Other(format!("Failed to build thread pool: {}", e)))?;
    Ok(jobs)
}
