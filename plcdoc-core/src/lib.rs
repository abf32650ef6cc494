// plcdoc Core Library
//
// Converts page text dumps of PLC program documentation into structured
// block files, and repackages large outputs into bounded chunks.

pub mod chunker;
pub mod classifier;
pub mod config;
pub mod decode;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod preprocessors;
pub mod processor;
pub mod render;
pub mod rules;
pub mod storage;
pub mod structure;
pub mod types;

// Re-export main types and functions for easy use
pub use chunker::{plan_chunks, ChunkWriter};
pub use classifier::BlockClassifier;
pub use config::{ChunkerConfig, ConversionConfig, SplitStrategy};
pub use error::PlcDocError;
pub use preprocessors::{InMemorySource, PageTextSource, TextDumpSource};
pub use processor::{ConversionReport, DocumentProcessor, StepProfiler};
pub use render::{BlockRenderer, DocumentHeader};
pub use rules::RewriteEngine;
pub use storage::{BlockStorage, FileStorage, MemoryStorage};
pub use types::*;
