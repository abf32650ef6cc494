use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use plcdoc_core::{
    ChunkWriter, ConversionConfig, DocumentProcessor, FileStorage, SplitStrategy, TextDumpSource,
};

#[derive(Parser)]
#[command(name = "plcdoc")]
#[command(about = "Convert PLC documentation text dumps into structured block files")]
struct Args {
    /// Path to custom config file (YAML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert page text dumps (one per documented block) into `.st` files
    Convert {
        /// Text dumps to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory; files land in per-category sub-directories
        #[arg(short, long, default_value = "ConvertedProgram")]
        output_dir: PathBuf,

        /// Leave out networks that have a header but no lines
        #[arg(long)]
        skip_empty_networks: bool,

        /// Enable detailed profiling of all pipeline steps
        #[arg(long)]
        profile: bool,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Copy converted files into one flat directory, splitting oversized ones
    Split {
        /// Converted block files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory for `.txt` files and parts
        #[arg(short, long, default_value = "PlainTextFiles")]
        output_dir: PathBuf,

        /// Hard size limit per produced file, in MB
        #[arg(long)]
        max_size_mb: Option<f64>,

        /// Split strategy: exact or estimated
        #[arg(long)]
        strategy: Option<SplitStrategy>,

        /// Directory that `Original file:` paths are shown relative to
        #[arg(long)]
        source_root: Option<PathBuf>,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON and exit
    ShowConfig,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("🦀 plcdoc");

    let config = ConversionConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        info!("📋 Loaded config from: {}", config_path.display());
    }

    match args.command {
        Command::Convert {
            inputs,
            output_dir,
            skip_empty_networks,
            profile,
            report,
        } => convert(config, &inputs, &output_dir, skip_empty_networks, profile, report.as_deref()),
        Command::Split {
            inputs,
            output_dir,
            max_size_mb,
            strategy,
            source_root,
            report,
        } => {
            let mut config = config;
            // CLI flags override config values
            if let Some(max_size_mb) = max_size_mb {
                config.chunker.max_file_size_mb = max_size_mb;
            }
            if let Some(strategy) = strategy {
                config.chunker.strategy = strategy;
            }
            split(config, &inputs, &output_dir, source_root, report.as_deref())
        }
        Command::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn convert(
    mut config: ConversionConfig,
    inputs: &[PathBuf],
    output_dir: &Path,
    skip_empty_networks: bool,
    profile: bool,
    report_path: Option<&Path>,
) -> Result<()> {
    if skip_empty_networks {
        config.render.emit_empty_networks = false;
    }

    let storage = FileStorage::new(output_dir)?;
    let processor = DocumentProcessor::new_with_dependencies(
        Box::new(TextDumpSource::new()),
        Box::new(storage),
        config,
    );

    let report = processor.process_documents(inputs, profile);

    if let Some(path) = report_path {
        let summary = serde_json::json!({
            "output_dir": output_dir,
            "finished_at": chrono::Utc::now().to_rfc3339(),
            "report": report,
        });
        save_json(path, &summary)?;
    }

    if !report.failed.is_empty() {
        error!("❌ {} documents could not be converted", report.failed.len());
        std::process::exit(1);
    }
    Ok(())
}

fn split(
    config: ConversionConfig,
    inputs: &[PathBuf],
    output_dir: &Path,
    source_root: Option<PathBuf>,
    report_path: Option<&Path>,
) -> Result<()> {
    let mut writer = ChunkWriter::new(config.chunker.clone(), output_dir)?;
    if let Some(root) = source_root {
        writer = writer.with_source_root(root);
    }

    let (outcomes, failures) = writer.split_files(inputs);

    if let Some(path) = report_path {
        let failed: Vec<_> = failures
            .iter()
            .map(|(source, e)| serde_json::json!({ "source": source, "error": format!("{e:#}") }))
            .collect();
        let summary = serde_json::json!({
            "output_dir": output_dir,
            "finished_at": chrono::Utc::now().to_rfc3339(),
            "chunker": config.chunker,
            "outcomes": outcomes,
            "failed": failed,
        });
        save_json(path, &summary)?;
    }

    if !failures.is_empty() {
        error!("❌ {} files could not be split", failures.len());
        std::process::exit(1);
    }
    Ok(())
}

fn save_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Report saved to: {}", path.display());
    Ok(())
}
