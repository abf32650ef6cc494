use serde::{Deserialize, Serialize};
use std::fmt;

// ===== BLOCK CLASSIFICATION =====

/// Category of a documented program unit, derived from the source file name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    /// Organization block
    OB,
    /// Function block
    FB,
    /// Function
    FC,
    /// Data block
    DB,
    Safety,
    Tools,
    Tags,
    Other,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 8] = [
        BlockCategory::OB,
        BlockCategory::FB,
        BlockCategory::FC,
        BlockCategory::DB,
        BlockCategory::Safety,
        BlockCategory::Tools,
        BlockCategory::Tags,
        BlockCategory::Other,
    ];

    /// Label used in the header comment and as the output sub-directory.
    pub fn label(&self) -> &'static str {
        match self {
            BlockCategory::OB => "OBs",
            BlockCategory::FB => "FBs",
            BlockCategory::FC => "FCs",
            BlockCategory::DB => "DBs",
            BlockCategory::Safety => "Safety",
            BlockCategory::Tools => "Tools",
            BlockCategory::Tags => "Tags",
            BlockCategory::Other => "Other",
        }
    }

    pub fn is_data_block(&self) -> bool {
        matches!(self, BlockCategory::DB)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ===== METADATA =====

/// Labeled fields pulled from the block-info area of a document.
///
/// Every field is optional; a label that is not present in the source stays
/// `None` and is left out of the rendered header entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockMetadata {
    pub block_name: Option<String>,
    pub block_number: Option<String>,
    pub block_type: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub family: Option<String>,
    pub language: Option<String>,
    pub memory_size: Option<String>,
}

impl BlockMetadata {
    /// Present fields as `(key, value)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("block_name", &self.block_name),
            ("block_number", &self.block_number),
            ("block_type", &self.block_type),
            ("version", &self.version),
            ("author", &self.author),
            ("family", &self.family),
            ("language", &self.language),
            ("memory_size", &self.memory_size),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

// ===== INTERFACE =====

/// Declaration section of a block interface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InterfaceSection {
    Input,
    Output,
    InOut,
    Temp,
    Static,
    Constant,
}

impl InterfaceSection {
    pub const ALL: [InterfaceSection; 6] = [
        InterfaceSection::Input,
        InterfaceSection::Output,
        InterfaceSection::InOut,
        InterfaceSection::Temp,
        InterfaceSection::Static,
        InterfaceSection::Constant,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            InterfaceSection::Input => "Input",
            InterfaceSection::Output => "Output",
            InterfaceSection::InOut => "InOut",
            InterfaceSection::Temp => "Temp",
            InterfaceSection::Static => "Static",
            InterfaceSection::Constant => "Constant",
        }
    }

    /// Exact keyword lookup; anything else is not a section heading.
    pub fn from_keyword(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.keyword() == line)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterfaceVariable {
    pub name: String,
    pub declared_type: String,
    pub memory_address: Option<String>,
    pub comment: Option<String>,
    pub section: InterfaceSection,
}

/// One rendered line of an interface region, in source order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InterfaceEntry {
    SectionStart(InterfaceSection),
    ColumnHeader(String),
    Variable(InterfaceVariable),
    Passthrough(String),
}

// ===== NETWORKS =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineKind {
    /// Ladder / FBD token fragments
    Diagram,
    /// Identifier directly followed by an argument list
    Call,
    Comment,
    Statement,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkBody {
    pub id: String,
    pub title: Option<String>,
    pub lines: Vec<NetworkLine>,
}

impl NetworkBody {
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
            lines: Vec::new(),
        }
    }
}

// ===== DATA BLOCKS =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InitialValueRow {
    Assignment { name: String, value: String },
    Passthrough(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataBlockRecord {
    pub declared_name: Option<String>,
    pub entries: Vec<InterfaceEntry>,
    /// `None` when the document has no initial-values heading at all.
    pub initial_values: Option<Vec<InitialValueRow>>,
}

impl DataBlockRecord {
    /// Declared variables, skipping section markers and passthrough lines.
    pub fn variables(&self) -> impl Iterator<Item = &InterfaceVariable> {
        self.entries.iter().filter_map(|entry| match entry {
            InterfaceEntry::Variable(var) => Some(var),
            _ => None,
        })
    }

    /// `(variable, literal)` pairs in source order.
    pub fn initial_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.initial_values
            .iter()
            .flatten()
            .filter_map(|row| match row {
                InitialValueRow::Assignment { name, value } => Some((name.as_str(), value.as_str())),
                InitialValueRow::Passthrough(_) => None,
            })
    }
}

// ===== TAGS =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    pub address: String,
    pub data_type: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TagRow {
    Tag(TagEntry),
    Passthrough(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagTable {
    pub header: String,
    pub rows: Vec<TagRow>,
}

// ===== DOCUMENT =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlockBody {
    Networks {
        interface: Vec<InterfaceEntry>,
        networks: Vec<NetworkBody>,
    },
    DataBlock(DataBlockRecord),
    Tags(Vec<TagTable>),
}

/// Everything extracted from one source document, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredBlockDocument {
    pub metadata: BlockMetadata,
    pub category: BlockCategory,
    pub body: BlockBody,
}
