// Extraction collaborator abstraction.
//
// Binary formats (PDF and friends) are handled outside this crate; a source
// only has to hand back the page texts of one document as a single string.

use anyhow::Result;
use std::path::Path;

/// Produces the raw page text of a document.
pub trait PageTextSource {
    /// Full document text with a `--- PAGE <n> ---` marker line before each
    /// page.
    fn extract_pages(&self, path: &Path) -> Result<String>;

    /// Source name for logging
    fn name(&self) -> &str;

    /// Check if the source can read the given file
    fn supports_file_type(&self, path: &Path) -> bool;
}
