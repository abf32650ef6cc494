use crate::classifier::BlockClassifier;
use crate::config::ConversionConfig;
use crate::extract::{extract_metadata, parse_interface, parse_tag_tables};
use crate::normalize::normalize;
use crate::preprocessors::PageTextSource;
use crate::render::{BlockRenderer, DocumentHeader};
use crate::rules::RewriteEngine;
use crate::storage::BlockStorage;
use crate::structure::{structure_data_block, NetworkStructurer};
use crate::types::*;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        // Same step across documents accumulates into one entry
        match self.timings.iter_mut().find(|(name, _)| name == step_name) {
            Some((_, total)) => *total += elapsed,
            None => self.timings.push((step_name.to_string(), elapsed)),
        }
        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        info!("📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            info!(
                "   {:.<35} {:.0}ms ({:.1}%)",
                step,
                duration.as_millis(),
                percentage
            );
        }
        info!("   {:.<35} {:.0}ms", "Total", total.as_millis());
    }
}

/// One document that made it to storage.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedDocument {
    pub source: PathBuf,
    pub category: BlockCategory,
    pub output: PathBuf,
    pub networks: usize,
    pub interface_variables: usize,
    /// Set when page extraction failed and an empty document was written
    pub extraction_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of a batch conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    pub converted: Vec<ConvertedDocument>,
    pub skipped: Vec<DocumentFailure>,
    pub failed: Vec<DocumentFailure>,
}

impl ConversionReport {
    pub fn degraded_count(&self) -> usize {
        self.converted
            .iter()
            .filter(|doc| doc.extraction_error.is_some())
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty() && self.degraded_count() == 0
    }
}

pub struct DocumentProcessor {
    source: Box<dyn PageTextSource>,
    storage: Box<dyn BlockStorage>,
    classifier: BlockClassifier,
    rule_engine: RewriteEngine,
    config: ConversionConfig,
}

impl DocumentProcessor {
    /// Create DocumentProcessor with full dependency injection
    pub fn new_with_dependencies(
        source: Box<dyn PageTextSource>,
        storage: Box<dyn BlockStorage>,
        config: ConversionConfig,
    ) -> Self {
        Self {
            source,
            storage,
            classifier: BlockClassifier::new(),
            rule_engine: RewriteEngine::new(&config.rules),
            config,
        }
    }

    pub fn rule_engine(&self) -> &RewriteEngine {
        &self.rule_engine
    }

    /// Raw page text → structured document. Never fails: text that does not
    /// parse ends up as passthrough lines or is left out.
    pub fn structure(&self, raw: &str, category: BlockCategory) -> StructuredBlockDocument {
        let normalized = normalize(raw);
        let metadata = extract_metadata(&normalized);

        let body = match category {
            BlockCategory::DB => BlockBody::DataBlock(structure_data_block(raw, &metadata)),
            BlockCategory::Tags => BlockBody::Tags(parse_tag_tables(raw)),
            _ => BlockBody::Networks {
                interface: parse_interface(raw),
                networks: NetworkStructurer::new(&self.rule_engine).structure(&normalized),
            },
        };

        StructuredBlockDocument {
            metadata,
            category,
            body,
        }
    }

    /// Classify by file name, structure and render one document's text.
    pub fn convert_text(&self, raw: &str, header: &DocumentHeader) -> String {
        let category = self.classifier.classify(&header.source_name);
        let document = self.structure(raw, category);
        BlockRenderer::new(&self.config.render).render(&document, header)
    }

    /// Run one file through extraction, structuring, rendering and storage.
    ///
    /// A failed extraction degrades to an empty document (header only) and is
    /// reported on the result; only a storage failure is an error.
    pub fn process_document(
        &self,
        input_path: &Path,
        profiler: &mut StepProfiler,
    ) -> Result<ConvertedDocument> {
        let file_name = input_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Input path has no file name: {}", input_path.display()))?;
        let stem = input_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);

        info!("📄 Processing {}", input_path.display());

        let (raw, extraction_error) =
            match profiler.time_step("1. Page Extraction", || self.source.extract_pages(input_path)) {
                Ok(raw) => (raw, None),
                Err(e) => {
                    warn!("⚠️  Extraction failed for {}: {:#}", input_path.display(), e);
                    (String::new(), Some(format!("{e:#}")))
                }
            };

        let category = profiler.time_step("2. Classification", || self.classifier.classify(file_name));
        let document = profiler.time_step("3. Structuring", || self.structure(&raw, category));
        let header = DocumentHeader::now(file_name);
        let text = profiler.time_step("4. Rendering", || {
            BlockRenderer::new(&self.config.render).render(&document, &header)
        });
        let output = profiler.time_step("5. Storage", || {
            self.storage.write_block(category, stem, &text)
        })?;

        let (networks, interface_variables) = match &document.body {
            BlockBody::Networks {
                interface,
                networks,
            } => (
                networks.len(),
                interface
                    .iter()
                    .filter(|entry| matches!(entry, InterfaceEntry::Variable(_)))
                    .count(),
            ),
            BlockBody::DataBlock(record) => (0, record.variables().count()),
            BlockBody::Tags(_) => (0, 0),
        };

        info!(
            "✅ {} → {} ({}, {} networks)",
            file_name,
            output.display(),
            category,
            networks
        );

        Ok(ConvertedDocument {
            source: input_path.to_path_buf(),
            category,
            output,
            networks,
            interface_variables,
            extraction_error,
        })
    }

    /// Convert every given file; one bad document never stops the batch.
    pub fn process_documents(&self, inputs: &[PathBuf], enable_profiling: bool) -> ConversionReport {
        let start_time = Instant::now();
        let mut profiler = StepProfiler::new(enable_profiling);
        let mut report = ConversionReport::default();

        for input in inputs {
            if !self.source.supports_file_type(input) {
                warn!(
                    "⏭️  Skipping {}: not supported by the {} source",
                    input.display(),
                    self.source.name()
                );
                report.skipped.push(DocumentFailure {
                    source: input.clone(),
                    error: format!("unsupported by {}", self.source.name()),
                });
                continue;
            }

            match self.process_document(input, &mut profiler) {
                Ok(converted) => report.converted.push(converted),
                Err(e) => {
                    warn!("❌ Failed to convert {}: {:#}", input.display(), e);
                    report.failed.push(DocumentFailure {
                        source: input.clone(),
                        error: format!("{e:#}"),
                    });
                }
            }
        }

        profiler.print_summary();
        if enable_profiling {
            for (rule, spent) in self.rule_engine.rule_timings.borrow().iter() {
                info!("   rule {:.<30} {:.3}ms", rule, spent.as_secs_f64() * 1000.0);
            }
        }
        info!(
            "⏱️  Converted {} documents ({} degraded, {} failed, {} skipped) in {:.3}s",
            report.converted.len(),
            report.degraded_count(),
            report.failed.len(),
            report.skipped.len(),
            start_time.elapsed().as_secs_f64()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessors::InMemorySource;
    use crate::storage::MemoryStorage;
    use std::rc::Rc;

    // Shares one MemoryStorage between the processor and the test.
    struct SharedStorage(Rc<MemoryStorage>);

    impl BlockStorage for SharedStorage {
        fn write_block(&self, category: BlockCategory, stem: &str, text: &str) -> Result<PathBuf> {
            self.0.write_block(category, stem, text)
        }
    }

    fn processor(source: InMemorySource) -> (DocumentProcessor, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let processor = DocumentProcessor::new_with_dependencies(
            Box::new(source),
            Box::new(SharedStorage(Rc::clone(&storage))),
            ConversionConfig::default(),
        );
        (processor, storage)
    }

    #[test]
    fn test_profiler_accumulates_repeated_steps() {
        let mut profiler = StepProfiler::new(true);
        profiler.time_step("a", || ());
        profiler.time_step("a", || ());
        profiler.time_step("b", || ());
        assert_eq!(profiler.timings().len(), 2);

        let mut disabled = StepProfiler::new(false);
        assert_eq!(disabled.time_step("a", || 7), 7);
        assert!(disabled.timings().is_empty());
    }

    #[test]
    fn test_batch_continues_past_bad_documents() {
        let mut source = InMemorySource::new();
        source.insert(
            "Mixer (FB).pdf",
            vec!["Block name: Mixer\nNetwork 1: Run\nTemp := 5".to_string()],
        );
        let (processor, storage) = processor(source);

        let report = processor.process_documents(
            &[PathBuf::from("Mixer (FB).pdf"), PathBuf::from("Missing (FC).pdf")],
            true,
        );

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.converted[0].category, BlockCategory::FB);
        assert_eq!(report.converted[0].networks, 1);

        let text = storage.get("FBs/Mixer (FB).st").unwrap();
        assert!(text.contains("// Block_name: Mixer\n"));
        assert!(text.contains("NETWORK 1:\n// Run\n    Temp := 5;\n"));
    }

    #[test]
    fn test_failed_extraction_degrades_to_empty_document() {
        struct FailingSource;
        impl PageTextSource for FailingSource {
            fn extract_pages(&self, _path: &Path) -> Result<String> {
                Err(anyhow!("corrupt document"))
            }
            fn name(&self) -> &str {
                "failing"
            }
            fn supports_file_type(&self, _path: &Path) -> bool {
                true
            }
        }

        let storage = Rc::new(MemoryStorage::new());
        let processor = DocumentProcessor::new_with_dependencies(
            Box::new(FailingSource),
            Box::new(SharedStorage(Rc::clone(&storage))),
            ConversionConfig::default(),
        );
        let report = processor.process_documents(&[PathBuf::from("Broken (OB).pdf")], false);

        assert_eq!(report.degraded_count(), 1);
        assert_eq!(
            report.converted[0].extraction_error.as_deref(),
            Some("corrupt document")
        );
        let text = storage.get("OBs/Broken (OB).st").unwrap();
        assert!(text.contains("// Block type: OBs\n"));
        assert!(!text.contains("NETWORK"));
    }

    #[test]
    fn test_structure_dispatches_on_category() {
        let (processor, _) = processor(InMemorySource::new());
        let document = processor.structure("Initial values\nLimit  5\n", BlockCategory::DB);
        assert!(matches!(document.body, BlockBody::DataBlock(_)));

        let document = processor.structure("Name  Address  Data type\nA  %I0.0  Bool\n", BlockCategory::Tags);
        assert!(matches!(document.body, BlockBody::Tags(ref tables) if tables.len() == 1));
    }
}
