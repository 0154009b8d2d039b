//! # picocross - 分子吸收光谱计算库
//!
//! 由 ExoMol 态表与跃迁表计算配分函数、逐线强度与多普勒展宽截面。
//!
//! ## 模块
//! - `units`    - 带单位的物理量与光谱等价换算
//! - `models`   - 态表与跃迁表
//! - `parsers`  - ExoMol `.states` / `.trans` 读取
//! - `spectra`  - 配分函数、连接、强度、线型、截面
//! - `error`    - 错误处理
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── spectra/  ──┬── models/
//!   │               └── units/
//!   ├── parsers/  ──── models/
//!   └── error.rs
//! ```

pub mod error;
pub mod models;
pub mod parsers;
pub mod spectra;
pub mod units;

pub use error::{PicocrossError, Result};
pub use models::{State, StateTable, Transition, TransitionTable};
pub use spectra::{
    combine_states_transitions, doppler_hwhm, doppler_profile, intensity, partition_function,
};
pub use units::Quantity;
