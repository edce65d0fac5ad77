//! Delimited text reader / writer
//!
//! Survey, wellhead, marker and stratigraphy tables are plain comma-separated
//! text with a fixed number of header lines. Fields may be quoted with `|`
//! (so a description can contain commas) and leading whitespace after a
//! delimiter is skipped.

use super::AcquisitionError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '|';

/// Split one line into fields, honouring `|` quoting.
///
/// A doubled quote inside a quoted field is a literal `|`. Whitespace
/// directly after a delimiter is skipped.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if at_field_start && !in_quotes && ch.is_whitespace() {
            continue;
        }
        at_field_start = false;
        match ch {
            QUOTE => {
                if in_quotes {
                    if chars.peek() == Some(&QUOTE) {
                        current.push(QUOTE);
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            DELIMITER if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                at_field_start = true;
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Join fields into one output line, quoting any that contain the delimiter.
pub fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| {
            let f = f.as_ref();
            if f.contains(DELIMITER) || f.contains(QUOTE) {
                let escaped = f.replace(QUOTE, "||");
                format!("{QUOTE}{escaped}{QUOTE}")
            } else {
                f.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// A delimited input file with header lines and a column selection.
#[derive(Debug, Clone)]
pub struct DelimitedFile {
    path: PathBuf,
    header_lines: usize,
    columns: Vec<usize>,
    /// Leading selected columns that must be present on every row
    required: usize,
}

impl DelimitedFile {
    /// `columns` are zero-based indices, returned in the given order.
    pub fn new(path: impl Into<PathBuf>, header_lines: usize, columns: &[usize]) -> Self {
        Self {
            path: path.into(),
            header_lines,
            columns: columns.to_vec(),
            required: columns.len(),
        }
    }

    /// Allow trailing selected columns to be missing (returned as empty strings).
    pub fn with_required(mut self, required: usize) -> Self {
        self.required = required.min(self.columns.len());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<String, AcquisitionError> {
        fs::read_to_string(&self.path).map_err(|e| AcquisitionError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    /// The header lines, verbatim.
    pub fn read_head(&self) -> Result<Vec<String>, AcquisitionError> {
        let contents = self.read_contents()?;
        Ok(contents
            .lines()
            .take(self.header_lines)
            .map(str::to_string)
            .collect())
    }

    /// Data rows with the selected columns, blank lines skipped.
    ///
    /// Each row is returned with its 1-based line number for error reporting.
    pub fn read_rows(&self) -> Result<Vec<(usize, Vec<String>)>, AcquisitionError> {
        let contents = self.read_contents()?;
        let mut rows = Vec::new();

        for (index, line) in contents.lines().enumerate().skip(self.header_lines) {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = index + 1;
            let fields = split_fields(line);
            let mut selected = Vec::with_capacity(self.columns.len());
            for (position, &col) in self.columns.iter().enumerate() {
                match fields.get(col) {
                    Some(value) => selected.push(value.trim().to_string()),
                    None if position >= self.required => selected.push(String::new()),
                    None => {
                        return Err(AcquisitionError::MissingColumn {
                            path: self.path.clone(),
                            line: line_no,
                            column: col,
                        })
                    }
                }
            }
            rows.push((line_no, selected));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "Rows read");
        Ok(rows)
    }
}

/// Write a header row followed by data rows.
pub fn write_rows<S: AsRef<str>>(
    path: &Path,
    header: &[S],
    rows: &[Vec<String>],
) -> Result<(), AcquisitionError> {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(&join_fields(header));
    out.push('\n');
    for row in rows {
        out.push_str(&join_fields(row));
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| AcquisitionError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), rows = rows.len(), "Rows written");
    Ok(())
}

/// Parse a numeric field, reporting file and line on failure.
pub fn parse_number(value: &str, path: &Path, line: usize, field: &str) -> Result<f64, AcquisitionError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AcquisitionError::Parse {
            path: path.to_path_buf(),
            line,
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_skips_initial_space() {
        assert_eq!(split_fields("1, 2,  3"), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_split_quoted_field_with_comma() {
        assert_eq!(
            split_fields("JUR, |Jurassic, upper|, x"),
            vec!["JUR", "Jurassic, upper", "x"]
        );
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(split_fields("|a||b|,c"), vec!["a|b", "c"]);
    }

    #[test]
    fn test_split_empty_trailing_fields() {
        assert_eq!(split_fields("W1,TERT,100,,"), vec!["W1", "TERT", "100", "", ""]);
    }

    #[test]
    fn test_join_quotes_when_needed() {
        assert_eq!(join_fields(&["Well: A", "x,y"]), "Well: A,|x,y|");
    }

    #[test]
    fn test_read_rows_selects_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "IDX,MD,INCL,AZIM").unwrap();
        writeln!(file, "0, 0.0, 0.0, 0.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "1, 100.0, 2.5, 45.0").unwrap();

        let reader = DelimitedFile::new(file.path(), 1, &[1, 2, 3]);
        let rows = reader.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].0, 4);
        assert_eq!(rows[1].1, vec!["100.0", "2.5", "45.0"]);
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "HEADER").unwrap();
        writeln!(file, "a,b").unwrap();
        let reader = DelimitedFile::new(file.path(), 1, &[0, 1, 2]);
        assert!(matches!(
            reader.read_rows(),
            Err(AcquisitionError::MissingColumn { line: 2, column: 2, .. })
        ));
    }

    #[test]
    fn test_optional_trailing_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "HEADER").unwrap();
        writeln!(file, "W1,TERT,100").unwrap();
        let reader = DelimitedFile::new(file.path(), 1, &[0, 1, 2, 3, 4]).with_required(3);
        let rows = reader.read_rows().unwrap();
        assert_eq!(rows[0].1, vec!["W1", "TERT", "100", "", ""]);
    }

    #[test]
    fn test_read_head() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Well: X1, Field: Y").unwrap();
        writeln!(file, "MD,INCL,AZIM").unwrap();
        writeln!(file, "0,0,0").unwrap();
        let head = DelimitedFile::new(file.path(), 2, &[0]).read_head().unwrap();
        assert_eq!(head.len(), 2);
        assert!(head[0].starts_with("Well: X1"));
    }

    #[test]
    fn test_write_then_read_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let rows = vec![vec!["1.00".to_string(), "2.00".to_string()]];
        write_rows(&path, &["Well: A", "MD [ft]"], &rows).unwrap();
        let back = DelimitedFile::new(&path, 1, &[0, 1]).read_rows().unwrap();
        assert_eq!(back[0].1, vec!["1.00", "2.00"]);
    }

    #[test]
    fn test_parse_number_reports_location() {
        let err = parse_number("abc", Path::new("f.txt"), 7, "MD").unwrap_err();
        assert!(err.to_string().contains("line 7"));
    }
}
