//! # ExoMol .states 格式解析器
//!
//! ## .states 格式说明
//! ```text
//!            1     0.000000      1       0         Inf +  1          1 p A1  0  0  0  0  0
//!            2  1594.873096      1       0  4.1203e-02 +  1          2 p A1  0  1  0  0  0
//! ```
//! 前四列依次为 ID、能量 (cm⁻¹)、总简并度 g_total、J，其余列忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/state.rs`

use super::Fields;
use crate::error::{PicocrossError, Result};
use crate::models::{State, StateTable};

use std::fs;
use std::path::Path;

/// 读取 .states 文件
pub fn load_exomol_states(path: &Path) -> Result<StateTable> {
    if !path.exists() {
        return Err(PicocrossError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| PicocrossError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_states_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 .states 格式
pub fn parse_states_content(content: &str, source: &str) -> Result<StateTable> {
    let mut states = Vec::new();

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        states.push(parse_state_line(line, source, i + 1)?);
    }

    StateTable::new(states)
}

fn parse_state_line(line: &str, source: &str, line_no: usize) -> Result<State> {
    let fields = Fields::new(line, "states", source, line_no);

    let id: u64 = fields.parse(0, "ID")?;
    let energy: f64 = fields.parse(1, "Energy")?;
    let degeneracy: f64 = fields.parse(2, "g_total")?;
    let j: f64 = fields.parse(3, "J")?;

    if degeneracy < 0.0 {
        return Err(fields.error(format!("Negative degeneracy {}", degeneracy)));
    }

    Ok(State::new(id, energy, degeneracy, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STATES: &str = "           1     0.000000      1       0         Inf +  1          1 p A1  0  0  0  0  0
           2  1594.873096      1       0  4.1203e-02 +  1          2 p A1  0  1  0  0  0
           3  3151.677108      1       0  2.0601e-02 +  1          3 p A1  0  2  0  0  0
           4  3657.155752      1       0  1.4963e-01 +  1          4 p A1  1  0  0  0  0
           5  4666.724999      1       0  1.3749e-02 +  1          5 p A1  0  3  0  0  0
";

    #[test]
    fn test_load_exomol_states() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STATES.as_bytes()).unwrap();

        let table = load_exomol_states(file.path()).unwrap();

        assert_eq!(table.columns().len(), 4);
        assert!(table.columns().contains(&"ID"));
        assert!(table.columns().contains(&"Energy"));
        assert!(table.columns().contains(&"g_total"));
        assert!(table.columns().contains(&"J"));
        assert_eq!(table.len(), 5);

        assert_eq!(table.states()[0].energy, 0.0);
        assert_eq!(table.states()[2].energy, 3151.677108);
        assert_eq!(table.states()[4].energy, 4666.724999);
        assert_eq!(table.states()[4].id, 5);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse_states_content("\n 1 0.0 1 0\n\n 2 10.5 3 1\n", "test").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(2).map(|s| s.degeneracy), Some(3.0));
    }

    #[test]
    fn test_half_integer_j() {
        let table = parse_states_content(" 1 0.0 2 0.5\n", "test").unwrap();
        assert_eq!(table.states()[0].j, 0.5);
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_states_content(" 1 0.0 1 0\n 2 abc 1 0\n", "test").unwrap_err();
        match err {
            PicocrossError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse_states_content(" 1 0.0\n", "test").is_err());
    }

    #[test]
    fn test_negative_degeneracy_rejected() {
        assert!(parse_states_content(" 1 0.0 -1 0\n", "test").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_exomol_states(Path::new("/nonexistent/test.states")).unwrap_err();
        assert!(matches!(err, PicocrossError::FileNotFound { .. }));
    }
}
