use crate::types::BlockMetadata;
use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! field_pattern {
    ($name:ident, $pattern:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect("metadata field pattern"));
    };
}

field_pattern!(BLOCK_NAME, r"Block name:\s*([^\n]+)");
field_pattern!(BLOCK_NUMBER, r"Block number:\s*(\d+)");
field_pattern!(BLOCK_TYPE, r"Block type:\s*([^\n]+)");
field_pattern!(VERSION, r"Version:\s*([^\n]+)");
field_pattern!(AUTHOR, r"Author:\s*([^\n]+)");
field_pattern!(FAMILY, r"Family:\s*([^\n]+)");
field_pattern!(LANGUAGE, r"Language:\s*([^\n]+)");
field_pattern!(MEMORY_SIZE, r"Memory\s*size.*:\s*([^\n]+)");

/// Pull the labeled block-info fields out of the normalized document text.
///
/// Only the first occurrence of each label counts. A label that never
/// appears, or whose value trims to nothing, stays `None`.
pub fn extract_metadata(text: &str) -> BlockMetadata {
    BlockMetadata {
        block_name: first_value(&BLOCK_NAME, text),
        block_number: first_value(&BLOCK_NUMBER, text),
        block_type: first_value(&BLOCK_TYPE, text),
        version: first_value(&VERSION, text),
        author: first_value(&AUTHOR, text),
        family: first_value(&FAMILY, text),
        language: first_value(&LANGUAGE, text),
        memory_size: first_value(&MEMORY_SIZE, text),
    }
}

fn first_value(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_INFO: &str = "\
Block info
Block name: Conveyor_Control
Block number: 12
Block type: FB
Version: 0.3
Author: lineA
Family: Conveyors
Language: SCL
Memory size (load memory): 2048 bytes
";

    #[test]
    fn test_all_fields_extracted() {
        let metadata = extract_metadata(BLOCK_INFO);
        assert_eq!(metadata.block_name.as_deref(), Some("Conveyor_Control"));
        assert_eq!(metadata.block_number.as_deref(), Some("12"));
        assert_eq!(metadata.block_type.as_deref(), Some("FB"));
        assert_eq!(metadata.version.as_deref(), Some("0.3"));
        assert_eq!(metadata.author.as_deref(), Some("lineA"));
        assert_eq!(metadata.family.as_deref(), Some("Conveyors"));
        assert_eq!(metadata.language.as_deref(), Some("SCL"));
        assert_eq!(metadata.memory_size.as_deref(), Some("2048 bytes"));
    }

    #[test]
    fn test_missing_labels_are_omitted() {
        let metadata = extract_metadata("Block name: Pump\nsome other line\n");
        assert_eq!(metadata.block_name.as_deref(), Some("Pump"));
        assert!(metadata.author.is_none());
        assert!(metadata.language.is_none());
        assert_eq!(metadata.entries(), vec![("block_name", "Pump")]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let metadata = extract_metadata("Author: first\nAuthor: second\n");
        assert_eq!(metadata.author.as_deref(), Some("first"));
    }

    #[test]
    fn test_non_numeric_block_number_is_absent() {
        let metadata = extract_metadata("Block number: n/a\n");
        assert!(metadata.block_number.is_none());
    }

    #[test]
    fn test_empty_text_gives_empty_metadata() {
        assert!(extract_metadata("").is_empty());
    }
}
