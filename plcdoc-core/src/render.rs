use crate::config::RenderConfig;
use crate::extract::{render_interface, render_tag_tables};
use crate::structure::{format_diagrams, render_data_block, render_networks};
use crate::types::{BlockBody, BlockCategory, BlockMetadata, InterfaceEntry, StructuredBlockDocument};
use chrono::NaiveDateTime;

pub const RULE_LINE: &str =
    "// ============================================================================";

/// Provenance written at the top of every converted file.
#[derive(Debug, Clone)]
pub struct DocumentHeader {
    pub source_name: String,
    pub converted_at: NaiveDateTime,
}

impl DocumentHeader {
    pub fn new(source_name: impl Into<String>, converted_at: NaiveDateTime) -> Self {
        Self {
            source_name: source_name.into(),
            converted_at,
        }
    }

    /// Stamped with the local wall-clock time.
    pub fn now(source_name: impl Into<String>) -> Self {
        Self::new(source_name, chrono::Local::now().naive_local())
    }
}

/// `block_name` → `Block_name`
fn capitalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn render_header(
    header: &DocumentHeader,
    category: BlockCategory,
    metadata: &BlockMetadata,
) -> String {
    let mut out = format!("{RULE_LINE}\n");
    out.push_str(&format!("// Converted from: {}\n", header.source_name));
    out.push_str(&format!(
        "// Conversion date: {}\n",
        header.converted_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("// Block type: {}\n", category.label()));
    for (key, value) in metadata.entries() {
        out.push_str(&format!("// {}: {}\n", capitalize_key(key), value));
    }
    out.push_str(RULE_LINE);
    out.push_str("\n\n");
    out
}

/// Turns a structured document into the final text file contents.
pub struct BlockRenderer<'a> {
    config: &'a RenderConfig,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, document: &StructuredBlockDocument, header: &DocumentHeader) -> String {
        let mut out = render_header(header, document.category, &document.metadata);
        out.push_str(&self.render_body(document));
        out
    }

    pub fn render_body(&self, document: &StructuredBlockDocument) -> String {
        match &document.body {
            BlockBody::DataBlock(record) => render_data_block(record),
            BlockBody::Tags(tables) => render_tag_tables(tables),
            BlockBody::Networks {
                interface,
                networks,
            } => {
                let mut out = self.wrap_interface(interface, document.metadata.language.as_deref());
                out.push_str(&format_diagrams(&render_networks(
                    networks,
                    self.config.emit_empty_networks,
                )));
                out
            }
        }
    }

    /// `VAR ... END_VAR` for structured-text dialects, `INTERFACE ...
    /// END_INTERFACE` otherwise, nothing for an empty interface.
    fn wrap_interface(&self, entries: &[InterfaceEntry], language: Option<&str>) -> String {
        if entries.is_empty() {
            return String::new();
        }
        let (open, close) = if self.config.is_structured_text(language) {
            ("VAR", "END_VAR")
        } else {
            ("INTERFACE", "END_INTERFACE")
        };
        format!("{open}\n{}{close}\n\n", render_interface(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DataBlockRecord, InterfaceSection, InterfaceVariable, LineKind, NetworkBody, NetworkLine,
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn header() -> DocumentHeader {
        let converted_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 5, 9))
            .unwrap();
        DocumentHeader::new("Conveyor (FB).pdf", converted_at)
    }

    fn variable() -> InterfaceEntry {
        InterfaceEntry::Variable(InterfaceVariable {
            name: "Start".to_string(),
            declared_type: "Bool".to_string(),
            memory_address: None,
            comment: None,
            section: InterfaceSection::Input,
        })
    }

    #[test]
    fn test_header_lists_present_fields_in_order() {
        let metadata = BlockMetadata {
            block_name: Some("Conveyor".to_string()),
            language: Some("LAD".to_string()),
            ..Default::default()
        };
        let expected = format!(
            "{RULE_LINE}
// Converted from: Conveyor (FB).pdf
// Conversion date: 2024-03-01 08:05:09
// Block type: FBs
// Block_name: Conveyor
// Language: LAD
{RULE_LINE}

"
        );
        assert_eq!(render_header(&header(), BlockCategory::FB, &metadata), expected);
        assert_eq!(RULE_LINE.matches('=').count(), 76);
    }

    #[test]
    fn test_structured_text_uses_var_wrapper() {
        let config = RenderConfig::default();
        let renderer = BlockRenderer::new(&config);
        let document = StructuredBlockDocument {
            metadata: BlockMetadata {
                language: Some("SCL".to_string()),
                ..Default::default()
            },
            category: BlockCategory::FC,
            body: BlockBody::Networks {
                interface: vec![InterfaceEntry::SectionStart(InterfaceSection::Input), variable()],
                networks: vec![],
            },
        };
        assert_eq!(
            renderer.render_body(&document),
            "VAR\n// Input section\n    Start : Bool;\nEND_VAR\n\n"
        );
    }

    #[test]
    fn test_graphical_language_uses_interface_wrapper_and_formats_diagrams() {
        let config = RenderConfig::default();
        let renderer = BlockRenderer::new(&config);
        let mut network = NetworkBody::new("1", None);
        network.lines.push(NetworkLine {
            kind: LineKind::Diagram,
            text: "--[ ]----()--".to_string(),
        });
        let document = StructuredBlockDocument {
            metadata: BlockMetadata::default(),
            category: BlockCategory::OB,
            body: BlockBody::Networks {
                interface: vec![variable()],
                networks: vec![network],
            },
        };
        assert_eq!(
            renderer.render_body(&document),
            "INTERFACE\n    Start : Bool;\nEND_INTERFACE\n\nNETWORK 1:\n    // LAD: --[ IN ]----( OUT )--\n\n"
        );
    }

    #[test]
    fn test_empty_interface_has_no_wrapper() {
        let config = RenderConfig::default();
        let document = StructuredBlockDocument {
            metadata: BlockMetadata::default(),
            category: BlockCategory::FB,
            body: BlockBody::Networks {
                interface: vec![],
                networks: vec![],
            },
        };
        assert_eq!(BlockRenderer::new(&config).render_body(&document), "");
    }

    #[test]
    fn test_unnamed_data_block_body() {
        let config = RenderConfig::default();
        let document = StructuredBlockDocument {
            metadata: BlockMetadata::default(),
            category: BlockCategory::DB,
            body: BlockBody::DataBlock(DataBlockRecord::default()),
        };
        let body = BlockRenderer::new(&config).render_body(&document);
        assert!(body.starts_with("DATA_BLOCK\n{\n"));
        assert!(body.ends_with("}\n"));
    }

    #[test]
    fn test_capitalize_key() {
        assert_eq!(capitalize_key("memory_size"), "Memory_size");
        assert_eq!(capitalize_key(""), "");
    }
}
