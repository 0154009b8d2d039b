//! # 数据模型模块
//!
//! 定义量子态表与跃迁表的内存表示。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`spectra/` 和 `commands/` 使用
//! - 子模块: state, transition

pub mod state;
pub mod transition;

pub use state::{State, StateTable};
pub use transition::{Transition, TransitionTable};
