//! End-to-end tests over the text dumps in `test_fixtures/dumps/`.
//!
//! - Conversion: dump text → rendered block file, compared in full
//! - Processor: dumps on disk → per-category `.st` files
//! - Chunker: oversized block files → parts that reassemble exactly

use chrono::NaiveDate;
use plcdoc_core::chunker::ChunkWriter;
use plcdoc_core::config::{ChunkerConfig, ConversionConfig, SplitStrategy};
use plcdoc_core::preprocessors::{PageTextSource, TextDumpSource};
use plcdoc_core::render::{DocumentHeader, RULE_LINE};
use plcdoc_core::storage::FileStorage;
use plcdoc_core::{DocumentProcessor, MemoryStorage};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Fixture helpers
// ============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures/dumps")
}

fn load_dump(name: &str) -> String {
    let path = fixtures_dir().join(name);
    TextDumpSource::new()
        .extract_pages(&path)
        .unwrap_or_else(|e| panic!("Missing fixture {}: {e:#}", path.display()))
}

fn fixed_header(source_name: &str) -> DocumentHeader {
    let converted_at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .expect("valid timestamp");
    DocumentHeader::new(source_name, converted_at)
}

fn in_memory_processor() -> DocumentProcessor {
    DocumentProcessor::new_with_dependencies(
        Box::new(TextDumpSource::new()),
        Box::new(MemoryStorage::new()),
        ConversionConfig::default(),
    )
}

fn convert_fixture(name: &str) -> String {
    in_memory_processor().convert_text(&load_dump(name), &fixed_header(name))
}

// ============================================================================
// Conversion: whole documents
// ============================================================================

mod conversion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_block_document() {
        let expected = format!(
            "{RULE_LINE}
// Converted from: Conveyor (FB).txt
// Conversion date: 2024-01-15 10:30:00
// Block type: FBs
// Block_name: Conveyor
// Block_number: 12
// Block_type: FB
// Version: 0.3
// Author: lineA
// Language: LAD
// Memory_size: 2048 bytes
{RULE_LINE}

INTERFACE
// Input section
// Name        Data type       Comment
    Start : Bool; // Start request
    Stop : Bool; // Stop request
// Output section
// Name        Data type       Comment
    Motor : Bool AT %Q0.0; // Motor contactor
// Temp section
// Name        Data type
    Scratch : Real;
END_INTERFACE

NETWORK 1:
// Motor latch
    // LAD: --| |--[Start]----( OUT )--
    Motor := Start AND NOT Stop;

NETWORK 2:
// Run timer
    TON(IN := Motor, PT := T#5s, Q => , ET => )

NETWORK 3:
// Count parts
    CTU(CU := Motor, R := , PV := , Q => , CV => )
    GE(Count, 10)

NETWORK 4:

"
        );
        assert_eq!(convert_fixture("Conveyor (FB).txt"), expected);
    }

    #[test]
    fn data_block_without_name() {
        let expected = format!(
            "{RULE_LINE}
// Converted from: Recipe (DB).txt
// Conversion date: 2024-01-15 10:30:00
// Block type: DBs
// Block_number: 7
// Author: lineA
{RULE_LINE}

DATA_BLOCK
{{
// Static section
// Name  Data type  Comment
    Speed : Int; // Line speed
    Enabled : Bool;
    // Initial values
    Speed := 100;
    Enabled := TRUE;
}}
"
        );
        assert_eq!(convert_fixture("Recipe (DB).txt"), expected);
    }

    #[test]
    fn plc_tag_tables() {
        let expected = format!(
            "{RULE_LINE}
// Converted from: PLC tags.txt
// Conversion date: 2024-01-15 10:30:00
// Block type: Tags
{RULE_LINE}

// PLC Tags

// Name  Data type  Address  Comment
Start_PB AT %I0.0 : Bool; // Start push button
Stop_PB AT %I0.1 : Bool;

// Name  Data type  Address  Comment
Motor_K1 AT %Q0.0 : Bool; // Main contactor
Level AT %IW64 : Int; // Tank level
"
        );
        assert_eq!(convert_fixture("PLC tags.txt"), expected);
    }

    #[test]
    fn structured_text_block_uses_var_section() {
        let raw = "\
Block name: Scale
Language: SCL
Interface
Input
Name  Data type
Raw  Int
Code
Network 1:
Scaled := Raw * 10
";
        let text = in_memory_processor().convert_text(raw, &fixed_header("Scale (FC).txt"));
        assert!(text.contains("// Block type: FCs\n"));
        assert!(text.contains("\n\nVAR\n// Input section\n// Name  Data type\n    Raw : Int;\nEND_VAR\n\n"));
        assert!(text.ends_with("NETWORK 1:\n    Scaled := Raw * 10;\n\n"));
    }

    #[test]
    fn document_without_anything_recognizable() {
        let text = in_memory_processor().convert_text("just\nsome\ntext", &fixed_header("Notes.txt"));
        assert_eq!(
            text,
            format!(
                "{RULE_LINE}\n// Converted from: Notes.txt\n// Conversion date: 2024-01-15 10:30:00\n// Block type: Other\n{RULE_LINE}\n\n"
            )
        );
    }
}

// ============================================================================
// Processor: files on disk
// ============================================================================

mod processor {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_one_file_per_document_under_category_directories() {
        let out = tempfile::tempdir().unwrap();
        let processor = DocumentProcessor::new_with_dependencies(
            Box::new(TextDumpSource::new()),
            Box::new(FileStorage::new(out.path()).unwrap()),
            ConversionConfig::default(),
        );

        let inputs: Vec<PathBuf> = ["Conveyor (FB).txt", "Recipe (DB).txt", "PLC tags.txt"]
            .iter()
            .map(|name| fixtures_dir().join(name))
            .collect();
        let report = processor.process_documents(&inputs, true);

        assert!(report.is_clean());
        assert_eq!(report.converted.len(), 3);
        for relative in ["FBs/Conveyor (FB).st", "DBs/Recipe (DB).st", "Tags/PLC tags.st"] {
            let path = out.path().join(relative);
            let text = fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("missing output {}", path.display()));
            assert!(text.starts_with(RULE_LINE));
        }

        let fb = &report.converted[0];
        assert_eq!(fb.networks, 4);
        assert_eq!(fb.interface_variables, 4);
    }

    #[test]
    fn unreadable_and_unsupported_inputs_are_reported() {
        let out = tempfile::tempdir().unwrap();
        let processor = DocumentProcessor::new_with_dependencies(
            Box::new(TextDumpSource::new()),
            Box::new(FileStorage::new(out.path()).unwrap()),
            ConversionConfig::default(),
        );

        let report = processor.process_documents(
            &[
                PathBuf::from("/nonexistent/Lost (OB).txt"),
                PathBuf::from("Manual (FB).pdf"),
            ],
            false,
        );

        assert_eq!(report.degraded_count(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(out.path().join("OBs/Lost (OB).st").exists());
    }
}

// ============================================================================
// Chunker: splitting on disk
// ============================================================================

mod chunker {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Body of a part file: header and footer removed.
    fn part_body(text: &str) -> &str {
        let header_end = format!("// {}\n\n", "=".repeat(75));
        let start = text.find(&header_end).map_or(0, |idx| idx + header_end.len());
        let body = &text[start..];
        let footer_start = format!("\n\n// {}\n// End of", "=".repeat(30));
        match body.find(&footer_start) {
            Some(idx) => &body[..idx],
            None => body,
        }
    }

    fn write_block_file(root: &Path, lines: usize) -> (PathBuf, String) {
        let dir = root.join("FBs");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Big.st");
        let content = (0..lines)
            .map(|i| format!("    Tank_{i}.Level := {i};"))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&path, &content).unwrap();
        (path, content)
    }

    #[test]
    fn parts_reassemble_to_the_source() {
        for strategy in [SplitStrategy::Exact, SplitStrategy::Estimated] {
            let root = tempfile::tempdir().unwrap();
            let (path, content) = write_block_file(root.path(), 5_000);
            let config = ChunkerConfig {
                max_file_size_mb: 0.05,
                strategy,
                ..ChunkerConfig::default()
            };

            let writer = ChunkWriter::new(config, root.path().join("txt"))
                .unwrap()
                .with_source_root(root.path());
            let outcome = writer.split_file(&path).unwrap();
            assert!(outcome.outputs.len() > 1, "{strategy:?}");

            let bodies: Vec<String> = outcome
                .outputs
                .iter()
                .map(|output| part_body(&fs::read_to_string(output).unwrap()).to_string())
                .collect();
            assert_eq!(bodies.join("\n"), content, "{strategy:?}");

            let last = fs::read_to_string(outcome.outputs.last().unwrap()).unwrap();
            assert!(!last.contains("// End of part"));
            assert!(last.contains("// Original file: FBs/Big.st\n"));
        }
    }

    #[test]
    fn converted_output_flows_into_the_chunker() {
        let root = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(root.path().join("converted")).unwrap();
        let processor = DocumentProcessor::new_with_dependencies(
            Box::new(TextDumpSource::new()),
            Box::new(storage),
            ConversionConfig::default(),
        );
        let report = processor.process_documents(&[fixtures_dir().join("Recipe (DB).txt")], false);
        let converted = &report.converted[0].output;

        let writer = ChunkWriter::new(ChunkerConfig::default(), root.path().join("txt")).unwrap();
        let outcome = writer.split_file(converted).unwrap();

        assert!(!outcome.split);
        assert_eq!(outcome.outputs, vec![root.path().join("txt/DBs_Recipe (DB).txt")]);
        assert_eq!(
            fs::read(converted).unwrap(),
            fs::read(&outcome.outputs[0]).unwrap()
        );
    }
}
