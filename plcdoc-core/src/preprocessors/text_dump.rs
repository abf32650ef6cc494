use super::preprocessor::PageTextSource;
use crate::decode::read_text;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Reads text dumps written by an external extractor. The dump already
/// carries the page markers, so it is passed through as-is.
#[derive(Debug, Default)]
pub struct TextDumpSource;

impl TextDumpSource {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextSource for TextDumpSource {
    fn extract_pages(&self, path: &Path) -> Result<String> {
        let text = read_text(path)
            .with_context(|| format!("Failed to read text dump {}", path.display()))?;
        debug!("📄 Read {} bytes from {}", text.len(), path.display());
        Ok(text)
    }

    fn name(&self) -> &str {
        "text-dump"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
    }
}
