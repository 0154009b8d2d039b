//! # 解析器模块
//!
//! ExoMol 线表文件解析器。两种文件都是空白分隔的定宽列文本，只按位置读取前几列。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和库调用方使用
//! - 使用 `models/` 数据模型
//! - 子模块: states, transitions

pub mod states;
pub mod transitions;

pub use states::{load_exomol_states, parse_states_content};
pub use transitions::{load_exomol_transitions, parse_transitions_content, TransitionChunks};

use crate::error::{PicocrossError, Result};
use std::str::FromStr;

/// 一行中的位置字段
struct Fields<'a> {
    parts: Vec<&'a str>,
    format: &'static str,
    source: &'a str,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(line_text: &'a str, format: &'static str, source: &'a str, line: usize) -> Self {
        Fields {
            parts: line_text.split_whitespace().collect(),
            format,
            source,
            line,
        }
    }

    fn error(&self, reason: String) -> PicocrossError {
        PicocrossError::ParseError {
            format: self.format.to_string(),
            path: self.source.to_string(),
            line: self.line,
            reason,
        }
    }

    /// 解析第 `idx` 列
    fn parse<T: FromStr>(&self, idx: usize, name: &str) -> Result<T> {
        let raw = self.parts.get(idx).ok_or_else(|| {
            self.error(format!(
                "Missing column {} '{}' (found {} columns)",
                idx + 1,
                name,
                self.parts.len()
            ))
        })?;
        raw.parse()
            .map_err(|_| self.error(format!("Invalid value '{}' for column '{}'", raw, name)))
    }
}
