// Shared helpers for column-aligned tables in the exported documentation.
//
// Columns are separated by runs of two or more whitespace characters; a
// single space belongs to the cell (e.g. a comment like "Start button").

use once_cell::sync::Lazy;
use regex::Regex;

static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("column gap pattern"));

/// Absolute I/O, memory and data block addresses (`%I0.1`, `%QW64`,
/// `%DB10.DBX2.0`).
pub static IO_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:DB\d+\.DB[XBWD]\d+(?:\.\d+)?|[IQM][XBWD]?\d+(?:\.\d+)?)")
        .expect("io address pattern")
});

/// Interface-table addresses: an absolute address or a bare `byte.bit` offset.
pub static INTERFACE_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:DB\d+\.DB[XBWD]\d+(?:\.\d+)?|[IQM][XBWD]?\d+(?:\.\d+)?)|\b\d+\.\d+\b")
        .expect("interface address pattern")
});

/// Split a trimmed table row into its cells.
pub fn split_columns(line: &str) -> Vec<&str> {
    COLUMN_GAP
        .split(line.trim())
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Passthrough rendering for rows that do not fit the expected shape.
pub fn comment_line(line: &str) -> String {
    format!("// {line}")
}
