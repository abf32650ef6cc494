use crate::extract::interface::{interface_span, parse_interface_lines, render_entry};
use crate::extract::table::{comment_line, split_columns};
use crate::types::{BlockMetadata, DataBlockRecord, InitialValueRow, InterfaceEntry};
use once_cell::sync::Lazy;
use regex::Regex;

// The heading sits on a line of its own; the phrase can also appear in comments.
static INITIAL_VALUES_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*Initial[ \t]+values[ \t]*\r?$").expect("initial values pattern")
});
static SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*Code|Block\s*info").expect("section end pattern"));

/// Build a data block record. Table parsing reads `raw` (column gaps
/// intact); the declared name comes from the already-extracted metadata.
pub fn structure_data_block(raw: &str, metadata: &BlockMetadata) -> DataBlockRecord {
    DataBlockRecord {
        declared_name: metadata.block_name.clone(),
        entries: data_block_interface(raw),
        initial_values: parse_initial_values(raw),
    }
}

/// Interface entries of a data block. The declaration table stops where the
/// initial values table starts.
fn data_block_interface(raw: &str) -> Vec<InterfaceEntry> {
    interface_span(raw)
        .map(|span| match INITIAL_VALUES_HEADING.find(span) {
            Some(heading) => &span[..heading.start()],
            None => span,
        })
        .map(parse_interface_lines)
        .unwrap_or_default()
}

/// Rows after the `Initial values` heading, up to the next `Code` /
/// `Block info` heading or the end of the text.
pub fn parse_initial_values(raw: &str) -> Option<Vec<InitialValueRow>> {
    let heading = INITIAL_VALUES_HEADING.find(raw)?;
    let rest = &raw[heading.end()..];
    let span = SECTION_END
        .find(rest)
        .map_or(rest, |end| &rest[..end.start()]);

    let rows = span
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("Name"))
        .map(|line| {
            let fields = split_columns(line);
            match (fields.first(), fields.last()) {
                (Some(name), Some(value)) if fields.len() >= 2 => InitialValueRow::Assignment {
                    name: name.to_string(),
                    value: value.to_string(),
                },
                _ => InitialValueRow::Passthrough(line.to_string()),
            }
        })
        .collect();
    Some(rows)
}

pub fn render_data_block(record: &DataBlockRecord) -> String {
    let mut out = match &record.declared_name {
        Some(name) => format!("DATA_BLOCK \"{name}\"\n{{\n"),
        None => "DATA_BLOCK\n{\n".to_string(),
    };

    for entry in &record.entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }

    if let Some(rows) = &record.initial_values {
        out.push_str("    // Initial values\n");
        for row in rows {
            match row {
                InitialValueRow::Assignment { name, value } => {
                    out.push_str(&format!("    {name} := {value};\n"))
                }
                InitialValueRow::Passthrough(line) => {
                    out.push_str(&format!("    {}\n", comment_line(line)))
                }
            }
        }
    }

    out.push_str("}\n");
    out
}
