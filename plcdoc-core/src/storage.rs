use crate::types::BlockCategory;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Output extension for converted blocks.
pub const BLOCK_EXTENSION: &str = "st";

/// Destination for rendered block files.
pub trait BlockStorage {
    /// Store one rendered document under its category. Returns the path the
    /// document was stored at, relative to the storage root for in-memory
    /// stores.
    fn write_block(&self, category: BlockCategory, stem: &str, text: &str) -> Result<PathBuf>;
}

/// `<category label>/<stem>.st`
pub fn block_relative_path(category: BlockCategory, stem: &str) -> PathBuf {
    Path::new(category.label()).join(format!("{stem}.{BLOCK_EXTENSION}"))
}

/// Writes `<root>/<category label>/<stem>.st`, creating directories as
/// needed. Existing files are overwritten.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create output directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlockStorage for FileStorage {
    fn write_block(&self, category: BlockCategory, stem: &str, text: &str) -> Result<PathBuf> {
        let path = self.root.join(block_relative_path(category, stem));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Keeps rendered documents in memory, keyed by relative path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blocks: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<String> {
        self.blocks.borrow().get(relative.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.blocks.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.borrow().is_empty()
    }
}

impl BlockStorage for MemoryStorage {
    fn write_block(&self, category: BlockCategory, stem: &str, text: &str) -> Result<PathBuf> {
        let path = block_relative_path(category, stem);
        self.blocks.borrow_mut().insert(path.clone(), text.to_string());
        Ok(path)
    }
}
