use super::table::{comment_line, split_columns, INTERFACE_ADDRESS};
use crate::types::{InterfaceEntry, InterfaceSection, InterfaceVariable};
use once_cell::sync::Lazy;
use regex::Regex;

static INTERFACE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Interface\s*\n").expect("interface heading pattern"));
static INTERFACE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*Code|Block\s*info").expect("interface end pattern"));
static COLUMN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Name|Type|Offset|Comment)\b").expect("column header pattern"));

/// Text between the `Interface` heading and the next `Code` / `Block info`
/// heading. `None` when either end is missing.
pub fn interface_span(text: &str) -> Option<&str> {
    let heading = INTERFACE_HEADING.find(text)?;
    let rest = &text[heading.end()..];
    let end = INTERFACE_END.find(rest)?;
    Some(&rest[..end.start()])
}

/// Parse the interface region of a document into entries, in source order.
pub fn parse_interface(text: &str) -> Vec<InterfaceEntry> {
    interface_span(text)
        .map(parse_interface_lines)
        .unwrap_or_default()
}

/// What a single trimmed line means to the section state machine.
#[derive(Debug, PartialEq, Eq)]
enum LineEvent<'a> {
    Section(InterfaceSection),
    ColumnHeader,
    Row(Vec<&'a str>),
    Ignored,
}

/// Section/table state. Starts in `Temp`, outside any table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceState {
    pub section: InterfaceSection,
    pub in_table: bool,
}

impl Default for InterfaceState {
    fn default() -> Self {
        Self {
            section: InterfaceSection::Temp,
            in_table: false,
        }
    }
}

impl InterfaceState {
    fn classify<'a>(&self, line: &'a str) -> LineEvent<'a> {
        if let Some(section) = InterfaceSection::from_keyword(line) {
            LineEvent::Section(section)
        } else if COLUMN_HEADER.is_match(line) {
            LineEvent::ColumnHeader
        } else if self.in_table {
            LineEvent::Row(split_columns(line))
        } else {
            LineEvent::Ignored
        }
    }

    /// Transition table: section keywords switch the current section, a
    /// column header opens a table, everything else leaves the state alone.
    fn apply(&mut self, event: &LineEvent<'_>) {
        match event {
            LineEvent::Section(section) => self.section = *section,
            LineEvent::ColumnHeader => self.in_table = true,
            LineEvent::Row(_) | LineEvent::Ignored => {}
        }
    }
}

/// Run the section state machine over an already-isolated interface region.
pub fn parse_interface_lines(span: &str) -> Vec<InterfaceEntry> {
    let mut state = InterfaceState::default();
    let mut entries = Vec::new();

    for line in span.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let event = state.classify(line);
        state.apply(&event);

        let entry = match event {
            LineEvent::Section(section) => Some(InterfaceEntry::SectionStart(section)),
            LineEvent::ColumnHeader => Some(InterfaceEntry::ColumnHeader(line.to_string())),
            LineEvent::Row(fields) => Some(parse_row(line, &fields, state.section)),
            LineEvent::Ignored => None,
        };
        entries.extend(entry);
    }

    entries
}

fn parse_row(line: &str, fields: &[&str], section: InterfaceSection) -> InterfaceEntry {
    if fields.len() < 2 {
        return InterfaceEntry::Passthrough(line.to_string());
    }

    let name = fields[0];
    let mut declared_type = fields[1].to_string();
    let comment = (fields.len() > 2).then(|| fields[fields.len() - 1].to_string());

    let memory_address = INTERFACE_ADDRESS.find(fields[1]).map(|m| m.as_str().to_string());
    if let Some(address) = &memory_address {
        declared_type = declared_type.replace(address.as_str(), "").trim().to_string();
    }

    if name.is_empty() || declared_type.is_empty() {
        return InterfaceEntry::Passthrough(line.to_string());
    }

    InterfaceEntry::Variable(InterfaceVariable {
        name: name.to_string(),
        declared_type,
        memory_address,
        comment,
        section,
    })
}

/// Render one entry as a declaration line (no trailing newline).
pub fn render_entry(entry: &InterfaceEntry) -> String {
    match entry {
        InterfaceEntry::SectionStart(section) => format!("// {} section", section.keyword()),
        InterfaceEntry::ColumnHeader(line) | InterfaceEntry::Passthrough(line) => comment_line(line),
        InterfaceEntry::Variable(var) => render_variable(var),
    }
}

fn render_variable(var: &InterfaceVariable) -> String {
    let mut out = format!("    {} : {}", var.name, var.declared_type);
    if let Some(address) = &var.memory_address {
        out.push_str(" AT ");
        out.push_str(address);
    }
    out.push(';');
    if let Some(comment) = &var.comment {
        out.push_str(" // ");
        out.push_str(comment);
    }
    out
}

/// Render all entries, one line each, newline-terminated. Empty input gives
/// an empty string.
pub fn render_interface(entries: &[InterfaceEntry]) -> String {
    entries
        .iter()
        .map(|entry| render_entry(entry) + "\n")
        .collect()
}
