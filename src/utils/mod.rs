//! # 工具函数模块
//!
//! 提供美化输出、进度提示、线程池配置等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output, parallel, progress

pub mod output;
pub mod parallel;
pub mod progress;
