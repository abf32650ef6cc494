//! Text normalization and page-marker handling.
//!
//! The extraction collaborator hands over one string per document with
//! `--- PAGE <n> ---` sentinels between pages. The markers are plain text,
//! so splitting on them is best-effort.

use once_cell::sync::Lazy;
use regex::Regex;

pub const PAGE_MARKER_PREFIX: &str = "--- PAGE";

static PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--- PAGE \d+ ---").expect("page marker pattern"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Collapse internal whitespace runs while keeping indentation width and page
/// markers. The output always has the same number of lines as the input.
pub fn normalize(raw: &str) -> String {
    raw.split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    let content = line.trim();
    if content.is_empty() {
        return String::new();
    }
    if content.starts_with(PAGE_MARKER_PREFIX) {
        return line.to_string();
    }

    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    let collapsed = WHITESPACE_RUN.replace_all(content, " ");
    format!("{}{}", " ".repeat(indent), collapsed)
}

/// Split a document into page segments on the page markers.
pub fn split_pages(text: &str) -> Vec<&str> {
    PAGE_MARKER.split(text).collect()
}

/// Join page texts the way the extraction collaborator does: a marker line
/// (1-based) before every page.
pub fn assemble_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("\n{} {} ---\n{}", PAGE_MARKER_PREFIX, i + 1, page.as_ref()))
        .collect()
}

/// Non-empty trimmed lines of every page, markers removed.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    split_pages(text)
        .into_iter()
        .flat_map(|page| page.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
