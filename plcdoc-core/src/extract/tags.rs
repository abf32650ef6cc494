use super::table::{comment_line, split_columns, IO_ADDRESS};
use crate::normalize::content_lines;
use crate::types::{TagEntry, TagRow, TagTable};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_TABLE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Name|Address|Data type|Comment)\b").expect("tag header pattern"));

/// Collect every tag table in a PLC tags document.
///
/// A header line starts a new table; lines before the first header are page
/// furniture and are skipped. Rows that do not split into at least three
/// columns are kept as passthrough comments.
pub fn parse_tag_tables(text: &str) -> Vec<TagTable> {
    let mut tables: Vec<TagTable> = Vec::new();

    for line in content_lines(text) {
        if TAG_TABLE_HEADER.is_match(line) {
            tables.push(TagTable {
                header: line.to_string(),
                rows: Vec::new(),
            });
            continue;
        }

        if let Some(table) = tables.last_mut() {
            table.rows.push(parse_tag_row(line));
        }
    }

    tables
}

/// Parse one tag table row.
///
/// The address column is found by shape rather than position, so exports
/// that put the data type before the address still come out right.
pub fn parse_tag_row(line: &str) -> TagRow {
    let fields = split_columns(line);
    if fields.len() < 3 {
        return TagRow::Passthrough(line.to_string());
    }

    let name = fields[0];
    let (middle, comment) = if fields.len() > 3 {
        (&fields[1..fields.len() - 1], Some(fields[fields.len() - 1].to_string()))
    } else {
        (&fields[1..], None)
    };

    let address_idx = middle
        .iter()
        .position(|cell| IO_ADDRESS.is_match(cell))
        .unwrap_or(0);
    let address = middle[address_idx];
    let data_type = middle
        .iter()
        .enumerate()
        .find(|(i, _)| *i != address_idx)
        .map(|(_, cell)| *cell)
        .unwrap_or_default();

    if name.is_empty() || address.is_empty() {
        return TagRow::Passthrough(line.to_string());
    }

    TagRow::Tag(TagEntry {
        name: name.to_string(),
        address: address.to_string(),
        data_type: data_type.to_string(),
        comment,
    })
}

pub fn render_tag(tag: &TagEntry) -> String {
    let mut out = format!("{} AT {} : {};", tag.name, tag.address, tag.data_type);
    if let Some(comment) = &tag.comment {
        out.push_str(" // ");
        out.push_str(comment);
    }
    out
}

/// Render all tables under a `// PLC Tags` banner, one blank line between
/// tables.
pub fn render_tag_tables(tables: &[TagTable]) -> String {
    let mut out = String::from("// PLC Tags\n\n");
    let rendered: Vec<String> = tables
        .iter()
        .map(|table| {
            let mut block = comment_line(&table.header) + "\n";
            for row in &table.rows {
                match row {
                    TagRow::Tag(tag) => block.push_str(&render_tag(tag)),
                    TagRow::Passthrough(line) => block.push_str(&comment_line(line)),
                }
                block.push('\n');
            }
            block
        })
        .collect();
    out.push_str(&rendered.join("\n"));
    out
}
