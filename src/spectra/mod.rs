//! # 吸收光谱计算模块
//!
//! 从态表与跃迁表出发计算逐线强度与截面。
//!
//! ## 子模块
//! - `partition`: 配分函数
//! - `join`: 态–跃迁连接
//! - `intensity`: 逐线积分强度
//! - `profile`: 多普勒半宽与线型
//! - `spectrum`: 波数网格与截面累加
//! - `export`: CSV 导出
//!
//! ## 数据流
//! ```text
//! StateTable ──┬── partition_function ──────────┐
//!              └── combine_states_transitions ──┴── intensity ──┐
//!                                  └── doppler_hwhm ── doppler_profile ──┴── cross_section
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 与库使用者调用
//! - 使用 `models/`、`units/`

pub mod export;
pub mod intensity;
pub mod join;
pub mod partition;
pub mod profile;
pub mod spectrum;

pub use intensity::intensity;
pub use join::{combine_states_transitions, JoinedTransition, JoinedTransitions, LineQuantities};
pub use partition::partition_function;
pub use profile::{doppler_hwhm, doppler_profile};
pub use spectrum::{cross_section, CrossSection, WavenumberGrid};
