//! # ExoMol .trans 格式解析器
//!
//! ## .trans 格式说明
//! ```text
//!        43046        40053 3.2870e-06
//!        29200        27275 3.1410e-06
//! ```
//! 前三列依次为上能级 ID、下能级 ID、A 系数 (s⁻¹)，其余列忽略。
//!
//! 跃迁文件可能非常大，`TransitionChunks` 按固定行数分块读取，
//! 块顺序与文件行序一致。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/transition.rs`

use super::Fields;
use crate::error::{PicocrossError, Result};
use crate::models::{Transition, TransitionTable};

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// 读取整个 .trans 文件
pub fn load_exomol_transitions(path: &Path) -> Result<TransitionTable> {
    collect_chunks(TransitionChunks::open(path, usize::MAX)?)
}

/// 从字符串内容解析 .trans 格式
pub fn parse_transitions_content(content: &str, source: &str) -> Result<TransitionTable> {
    collect_chunks(TransitionChunks::new(content.as_bytes(), usize::MAX, source)?)
}

fn collect_chunks<R: BufRead>(chunks: TransitionChunks<R>) -> Result<TransitionTable> {
    let mut table = TransitionTable::default();
    for chunk in chunks {
        table.extend(chunk?);
    }
    Ok(table)
}

fn parse_transition_line(line: &str, source: &str, line_no: usize) -> Result<Transition> {
    let fields = Fields::new(line, "trans", source, line_no);

    let upper: u64 = fields.parse(0, "upper")?;
    let lower: u64 = fields.parse(1, "lower")?;
    let a_coefficient: f64 = fields.parse(2, "Afi")?;

    Ok(Transition::new(upper, lower, a_coefficient))
}

/// 分块跃迁读取器
///
/// 每次迭代返回至多 `chunk_size` 行；遇到错误后停止迭代。
pub struct TransitionChunks<R: BufRead> {
    lines: Lines<R>,
    chunk_size: usize,
    source: String,
    line_no: usize,
    finished: bool,
}

impl TransitionChunks<BufReader<File>> {
    /// 打开 .trans 文件
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self> {
        if !path.exists() {
            return Err(PicocrossError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| PicocrossError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        TransitionChunks::new(BufReader::new(file), chunk_size, path.display().to_string())
    }
}

impl<R: BufRead> TransitionChunks<R> {
    pub fn new(reader: R, chunk_size: usize, source: impl Into<String>) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PicocrossError::InvalidArgument(
                "chunk size must be at least 1".to_string(),
            ));
        }

        Ok(TransitionChunks {
            lines: reader.lines(),
            chunk_size,
            source: source.into(),
            line_no: 0,
            finished: false,
        })
    }
}

impl<R: BufRead> Iterator for TransitionChunks<R> {
    type Item = Result<TransitionTable>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut rows = Vec::with_capacity(self.chunk_size.min(1 << 16));

        while rows.len() < self.chunk_size {
            let line = match self.lines.next() {
                None => {
                    self.finished = true;
                    break;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(PicocrossError::FileReadError {
                        path: self.source.clone(),
                        source: e,
                    }));
                }
                Some(Ok(line)) => line,
            };

            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            match parse_transition_line(&line, &self.source, self.line_no) {
                Ok(t) => rows.push(t),
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        if rows.is_empty() {
            None
        } else {
            Some(Ok(TransitionTable::new(rows)))
        }
    }
}
