use super::preprocessor::PageTextSource;
use crate::normalize::assemble_pages;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Page texts registered per path, assembled with page markers on request.
#[derive(Debug, Default)]
pub struct InMemorySource {
    documents: HashMap<PathBuf, Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, pages: Vec<String>) {
        self.documents.insert(path.into(), pages);
    }
}

impl PageTextSource for InMemorySource {
    fn extract_pages(&self, path: &Path) -> Result<String> {
        self.documents
            .get(path)
            .map(|pages| assemble_pages(pages))
            .ok_or_else(|| anyhow!("No pages registered for {}", path.display()))
    }

    fn name(&self) -> &str {
        "in-memory"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_assembled_with_markers() {
        let mut source = InMemorySource::new();
        source.insert("Main (OB).pdf", vec!["first".to_string(), "second".to_string()]);

        let text = source.extract_pages(Path::new("Main (OB).pdf")).unwrap();
        assert_eq!(text, "\n--- PAGE 1 ---\nfirst\n--- PAGE 2 ---\nsecond");
    }

    #[test]
    fn test_unknown_path() {
        let source = InMemorySource::new();
        assert!(!source.supports_file_type(Path::new("x.pdf")));
        assert!(source.extract_pages(Path::new("x.pdf")).is_err());
    }
}
