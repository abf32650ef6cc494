//! Page text sources
//!
//! The boundary between raw document extraction and the conversion
//! pipeline. A source turns one input file into a single string with
//! `--- PAGE <n> ---` markers between pages; everything downstream works on
//! that string only.
//!
//! ```text
//! Document (text dump, in-memory pages, external PDF extractor...)
//!     ↓
//! [PageTextSource]
//!     ↓
//! RawDocument (one string, page markers)
//!     ↓
//! [DocumentProcessor]
//! ```
//!
//! ## Available sources
//!
//! - `TextDumpSource` - pre-extracted `.txt` dumps on disk
//! - `InMemorySource` - page lists held in memory (tests, embedding)

pub mod memory;
pub mod preprocessor;
pub mod text_dump;

pub use memory::InMemorySource;
pub use preprocessor::PageTextSource;
pub use text_dump::TextDumpSource;
