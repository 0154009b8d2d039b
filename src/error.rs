//! # 统一错误处理模块
//!
//! 定义 picocross 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// picocross 统一错误类型
#[derive(Error, Debug)]
pub enum PicocrossError {
    // ─────────────────────────────────────────────────────────────
    // 数值 / 物理错误
    // ─────────────────────────────────────────────────────────────
    #[error("Shape mismatch in {context}: {left:?} vs {right:?}")]
    ShapeMismatch {
        context: String,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    #[error("Non-physical {quantity}: {value}")]
    InvalidPhysicalValue { quantity: String, value: String },

    #[error("Cannot convert unit '{from}' to '{to}'")]
    UnitConversion { from: String, to: String },

    #[error(
        "Transition at row {row} ({upper_id} -> {lower_id}) references a state missing from the state table"
    )]
    MissingJoinMatch {
        row: usize,
        upper_id: u64,
        lower_id: u64,
    },

    #[error("Duplicate state ID {id} in state table")]
    DuplicateStateId { id: u64 },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path} (line {line})\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        line: usize,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl PicocrossError {
    /// 构造形状不匹配错误
    pub fn shape_mismatch(context: impl Into<String>, left: &[usize], right: &[usize]) -> Self {
        PicocrossError::ShapeMismatch {
            context: context.into(),
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    /// 构造单位转换错误
    pub fn unit_conversion(from: impl ToString, to: impl ToString) -> Self {
        PicocrossError::UnitConversion {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PicocrossError>;
