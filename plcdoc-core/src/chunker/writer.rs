use super::plan::{plan_chunks, ChunkNames};
use crate::classifier::BlockClassifier;
use crate::config::ChunkerConfig;
use crate::decode::decode_text;
use crate::error::PlcDocError;
use crate::types::BlockCategory;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const MIB: f64 = 1024.0 * 1024.0;

/// What happened to one input file.
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
    /// False when the file fit the budget and was copied unchanged
    pub split: bool,
}

/// Repackages converted block files into bounded `.txt` files in one flat
/// output directory.
pub struct ChunkWriter {
    config: ChunkerConfig,
    output_dir: PathBuf,
    source_root: Option<PathBuf>,
    classifier: BlockClassifier,
}

impl ChunkWriter {
    pub fn new(config: ChunkerConfig, output_dir: impl Into<PathBuf>) -> Result<Self, PlcDocError> {
        config.validate()?;
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PlcDocError::io(&output_dir, source))?;
        Ok(Self {
            config,
            output_dir,
            source_root: None,
            classifier: BlockClassifier::new(),
        })
    }

    /// Report `Original file:` paths relative to this directory.
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// `<category label>_<stem>`. The label is the parent directory when it
    /// is a category directory, otherwise the file name decides.
    pub fn base_name(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent_label = path
            .parent()
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str())
            .and_then(BlockCategory::from_label);
        let category = parent_label.unwrap_or_else(|| {
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            self.classifier.classify(file_name)
        });
        let label = category.label();
        format!("{label}_{stem}")
    }

    fn original_name(&self, path: &Path) -> String {
        self.source_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or_else(|| path.file_name().map_or(path, Path::new))
            .display()
            .to_string()
    }

    pub fn split_file(&self, path: &Path) -> Result<SplitOutcome> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let base = self.base_name(path);
        let original = self.original_name(path);

        if bytes.len() <= self.config.budget() {
            let target = self.output_dir.join(format!("{base}.txt"));
            fs::write(&target, &bytes)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            info!(
                "📄 Copied {} to {} ({:.2} MB)",
                original,
                target.display(),
                bytes.len() as f64 / MIB
            );
            return Ok(SplitOutcome {
                source: path.to_path_buf(),
                outputs: vec![target],
                split: false,
            });
        }

        let content = decode_text(path, &bytes)?;
        let names = ChunkNames { base, original };
        let plan = plan_chunks(&names, &content, &self.config)?;
        let lines: Vec<&str> = content.lines().collect();

        info!(
            "🔪 Splitting {} into {} parts (total size: {:.2} MB)",
            names.original,
            plan.parts.len(),
            bytes.len() as f64 / MIB
        );

        let mut outputs = Vec::with_capacity(plan.parts.len());
        for part in &plan.parts {
            let text = part.render(&lines);
            let target = self.output_dir.join(&part.file_name);
            fs::write(&target, &text)
                .with_context(|| format!("Failed to write {}", target.display()))?;

            let size_mb = text.len() as f64 / MIB;
            info!(
                "   Created {} ({:.2} MB, lines {}-{})",
                part.file_name,
                size_mb,
                part.lines.start + 1,
                part.lines.end
            );
            if size_mb > self.config.max_file_size_mb {
                warn!(
                    "⚠️  {} is {:.2} MB, over the {} MB limit",
                    part.file_name, size_mb, self.config.max_file_size_mb
                );
            }
            outputs.push(target);
        }

        Ok(SplitOutcome {
            source: path.to_path_buf(),
            outputs,
            split: true,
        })
    }

    /// Split every file; failures are logged and the rest still run.
    pub fn split_files(&self, paths: &[PathBuf]) -> (Vec<SplitOutcome>, Vec<(PathBuf, anyhow::Error)>) {
        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        for path in paths {
            match self.split_file(path) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("❌ Failed to split {}: {:#}", path.display(), e);
                    failures.push((path.clone(), e));
                }
            }
        }

        let parts: usize = outcomes
            .iter()
            .filter(|o| o.split)
            .map(|o| o.outputs.len())
            .sum();
        info!(
            "✅ {} files written to {} ({} parts for large files)",
            outcomes.iter().map(|o| o.outputs.len()).sum::<usize>(),
            self.output_dir.display(),
            parts
        );
        (outcomes, failures)
    }
}
