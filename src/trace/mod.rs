//! Trace file reader.
//!
//! A trace is plain text with one record per line: a branch identifier
//! and an outcome separated by whitespace, e.g. `4196032 1`.

use crate::error::{Result, TraceError};
use crate::models::{BranchRecord, Trace};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Options controlling how trace lines are parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Reject outcome tokens other than `0` and `1`.
    ///
    /// When off, anything other than `1` (including a missing token)
    /// reads as not taken.
    pub strict_outcomes: bool,
}

/// Parse a single trace line.
///
/// Returns `Ok(None)` for blank lines and `#` comments. `line_no` is
/// 1-indexed and only used for error messages.
pub fn parse_line(
    line: &str,
    line_no: usize,
    options: ParseOptions,
) -> Result<Option<BranchRecord>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (id, outcome) = match line.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim()),
        None => (line, ""),
    };

    let address = id
        .parse::<u64>()
        .map_err(|_| TraceError::InvalidBranchId {
            line: line_no,
            value: id.to_string(),
        })?;

    let taken = match outcome {
        "1" => true,
        "0" => false,
        other if options.strict_outcomes => {
            return Err(TraceError::InvalidOutcome {
                line: line_no,
                value: other.to_string(),
            });
        }
        _ => false,
    };

    Ok(Some(BranchRecord::new(address, taken)))
}

/// Parse the full text of a trace.
pub fn parse_trace(text: &str, options: ParseOptions) -> Result<Vec<BranchRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in text.lines().enumerate() {
        match parse_line(line, i + 1, options)? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} blank or comment lines", skipped);
    }

    Ok(records)
}

/// Read and parse the trace at `path`.
pub fn load_trace(path: &Path, options: ParseOptions) -> Result<Trace> {
    info!("Loading trace: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| TraceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_trace(&text, options)?;
    info!("Read {} records", records.len());

    Ok(Trace::new(path.to_path_buf(), records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LENIENT: ParseOptions = ParseOptions {
        strict_outcomes: false,
    };
    const STRICT: ParseOptions = ParseOptions {
        strict_outcomes: true,
    };

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("4196032 1", 1, LENIENT).unwrap(),
            Some(BranchRecord::new(4196032, true))
        );
        assert_eq!(
            parse_line("  17\t0  ", 1, LENIENT).unwrap(),
            Some(BranchRecord::new(17, false))
        );
    }

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert_eq!(parse_line("", 1, LENIENT).unwrap(), None);
        assert_eq!(parse_line("   ", 1, LENIENT).unwrap(), None);
        assert_eq!(parse_line("# fft -O0", 1, LENIENT).unwrap(), None);
    }

    #[test]
    fn test_lenient_outcome_defaults_to_not_taken() {
        assert_eq!(
            parse_line("99 yes", 1, LENIENT).unwrap(),
            Some(BranchRecord::new(99, false))
        );
        assert_eq!(
            parse_line("99", 1, LENIENT).unwrap(),
            Some(BranchRecord::new(99, false))
        );
    }

    #[test]
    fn test_strict_outcome_rejects_other_tokens() {
        match parse_line("99 2", 5, STRICT) {
            Err(TraceError::InvalidOutcome { line, value }) => {
                assert_eq!(line, 5);
                assert_eq!(value, "2");
            }
            other => panic!("expected InvalidOutcome, got {:?}", other),
        }
        assert!(parse_line("99", 1, STRICT).is_err());
    }

    #[test]
    fn test_invalid_branch_id() {
        match parse_line("-4 1", 3, LENIENT) {
            Err(TraceError::InvalidBranchId { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "-4");
            }
            other => panic!("expected InvalidBranchId, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trace_reports_line_numbers() {
        let text = "1 1\n\n2 0\nbad 1\n";
        match parse_trace(text, LENIENT) {
            Err(TraceError::InvalidBranchId { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected InvalidBranchId, got {:?}", other),
        }
    }

    #[test]
    fn test_load_trace() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# header").unwrap();
        writeln!(file, "10 1").unwrap();
        writeln!(file, "20 0").unwrap();
        writeln!(file, "10 1").unwrap();

        let trace = load_trace(file.path(), LENIENT).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.addresses(), vec![10, 20, 10]);
        assert_eq!(trace.outcomes(), vec![true, false, true]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_trace(Path::new("/nonexistent/trace.txt"), LENIENT);
        assert!(matches!(result, Err(TraceError::FileRead { .. })));
    }
}
