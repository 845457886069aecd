//! Batch processing command for multiple certificates.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ecx_core::models::config::EcxConfig;
use ecx_core::{DocumentPipeline, ProcessedDocument, RecordFilter, RecordSink};

use super::process::{
    build_pipeline, cancel_on_ctrl_c, document_id, load_config, read_document_text, FilterArgs,
    TranslationArgs,
};
use crate::output::{format_document, OutputFormat};
use crate::sink::JsonlSink;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    translation: TranslationArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Append records of every file to a JSON-lines store
    #[arg(long)]
    store: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    document: Option<ProcessedDocument>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = build_pipeline(&config, &args.translation)?;
    let filter = args.filter.to_filter();
    let mut sink = match &args.store {
        Some(path) => Some(JsonlSink::open(path)?),
        None => None,
    };
    let cancel = cancel_on_ctrl_c();

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        if cancel.load(Ordering::SeqCst) {
            warn!("Batch cancelled before {}", path.display());
            break;
        }

        let file_start = Instant::now();
        let result = process_single_file(&path, &pipeline, &filter, &config, &cancel).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(document) => {
                if let Some(sink) = sink.as_mut() {
                    sink.store(&document_id(&path), &document.records)?;
                }
                results.push(ProcessResult {
                    path: path.clone(),
                    document: Some(document),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        document: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.document.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(document), Some(output_dir)) = (&result.document, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("certificate");

            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_document(document, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_single_file(
    path: &Path,
    pipeline: &DocumentPipeline,
    filter: &RecordFilter,
    config: &EcxConfig,
    cancel: &std::sync::atomic::AtomicBool,
) -> anyhow::Result<ProcessedDocument> {
    let text = read_document_text(path, config)?;
    let mut document = pipeline.process_with_cancel(&text, cancel).await?;
    filter.apply_to_document(&mut document);
    Ok(document)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "record_count",
        "tamil_fragment_count",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(document) = &result.document {
            let status = if document.cancelled { "cancelled" } else { "success" };
            wtr.write_record([
                filename,
                status,
                &document.record_count().to_string(),
                &document.tamil_fragment_count.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
