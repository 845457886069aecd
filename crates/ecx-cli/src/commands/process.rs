//! Process command - extract transactions from a single certificate.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use ecx_core::models::config::EcxConfig;
use ecx_core::pdf::PdfTextSource;
use ecx_core::{Dictionary, DocumentPipeline, RecordFilter, RecordSink};

use super::config::default_config_path;
use crate::output::{format_document, OutputFormat};
use crate::sink::JsonlSink;

/// Environment variable consulted when the config has no API key.
pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    translation: TranslationArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Append records to a JSON-lines store
    #[arg(long)]
    store: Option<PathBuf>,
}

/// Translation options shared by process and batch.
#[derive(Args, Debug, Clone)]
pub struct TranslationArgs {
    /// JSON dictionary of [tamil, english] pairs replacing the built-in table
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Never call the remote translation service
    #[arg(long)]
    pub no_remote: bool,
}

/// Record filter options shared by process and batch.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep records whose buyer contains this text (case-insensitive)
    #[arg(long)]
    pub buyer: Option<String>,

    /// Keep records whose seller contains this text (case-insensitive)
    #[arg(long)]
    pub seller: Option<String>,

    /// Keep records with exactly this house/plot number
    #[arg(long)]
    pub house: Option<String>,

    /// Keep records with exactly this survey number
    #[arg(long)]
    pub survey: Option<String>,

    /// Keep records with exactly this document number
    #[arg(long)]
    pub document: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            buyer_name: self.buyer.clone(),
            seller_name: self.seller.clone(),
            house_number: self.house.clone(),
            survey_number: self.survey.clone(),
            document_number: self.document.clone(),
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let text = read_document_text(&args.input, &config)?;

    pb.set_message("Extracting transactions...");
    let pipeline = build_pipeline(&config, &args.translation)?;
    let cancel = cancel_on_ctrl_c();

    let mut document = pipeline.process_with_cancel(&text, &cancel).await?;
    pb.finish_and_clear();

    args.filter.to_filter().apply_to_document(&mut document);

    if document.cancelled {
        eprintln!(
            "{} Cancelled, returning {} completed records",
            style("!").yellow(),
            document.record_count()
        );
    }
    if !document.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &document.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if let Some(store_path) = &args.store {
        let mut sink = JsonlSink::open(store_path)?;
        let stored = sink.store(&document_id(&args.input), &document.records)?;
        eprintln!(
            "{} Stored {} records in {}",
            style("✓").green(),
            stored,
            store_path.display()
        );
    }

    let output = format_document(&document, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration from `config_path`, the default location, or defaults.
///
/// The API key falls back to the environment when the file has none.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EcxConfig> {
    let mut config = match config_path {
        Some(path) => EcxConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                EcxConfig::from_file(&default_path)?
            } else {
                EcxConfig::default()
            }
        }
    };

    if config.translation.api_key.is_none() {
        config.translation.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
    }

    Ok(config)
}

pub fn build_pipeline(config: &EcxConfig, args: &TranslationArgs) -> anyhow::Result<DocumentPipeline> {
    let dictionary = match &args.dictionary {
        Some(path) => {
            let dictionary = Dictionary::from_file(path)?;
            debug!("Loaded {} dictionary entries from {}", dictionary.len(), path.display());
            dictionary
        }
        None => Dictionary::default_tamil(),
    };

    let mut config = config.clone();
    if args.no_remote {
        config.translation.enabled = false;
    } else if config.translation.enabled && config.translation.api_key.is_none() {
        info!("No translation API key (set {}), using the dictionary only", API_KEY_ENV);
    }

    Ok(DocumentPipeline::from_config(&config, Arc::new(dictionary)))
}

/// Read the raw text of a certificate.
pub fn read_document_text(path: &Path, config: &EcxConfig) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let text = PdfTextSource::text_from_bytes(&data)?;
            if text.trim().chars().count() < config.pdf.min_text_length {
                anyhow::bail!(
                    "No usable text in {}; scanned certificates need OCR first",
                    path.display()
                );
            }
            Ok(text)
        }
        "txt" | "text" => Ok(fs::read_to_string(path)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Identifier used when storing records.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string()
}

/// A flag that is set when the user presses Ctrl-C.
///
/// A second Ctrl-C exits immediately with status 130.
pub fn cancel_on_ctrl_c() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = flag.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if record_interrupt(&handle) {
                eprintln!("{} Interrupted again, exiting", style("!").red());
                std::process::exit(130);
            }
            eprintln!(
                "{} Cancelling after the current record, press Ctrl-C again to exit",
                style("!").yellow()
            );
        }
    });
    flag
}

/// Raise the cancel flag. Returns true if it was already raised.
fn record_interrupt(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_map_to_filter() {
        let args = FilterArgs {
            buyer: Some("ravi".to_string()),
            survey: Some("45/2B".to_string()),
            ..Default::default()
        };
        let filter = args.to_filter();
        assert_eq!(filter.buyer_name.as_deref(), Some("ravi"));
        assert_eq!(filter.survey_number.as_deref(), Some("45/2B"));
        assert!(filter.seller_name.is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, b"png").unwrap();

        let err = read_document_text(&path, &EcxConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_no_remote_disables_translation_service() {
        let args = TranslationArgs {
            dictionary: None,
            no_remote: true,
        };
        let mut config = EcxConfig::default();
        config.translation.api_key = Some("key".to_string());
        let pipeline = build_pipeline(&config, &args).unwrap();
        assert!(!pipeline.translator().has_remote());
    }

    #[test]
    fn test_second_interrupt_requests_exit() {
        let flag = AtomicBool::new(false);
        assert!(!record_interrupt(&flag));
        assert!(flag.load(Ordering::SeqCst));
        assert!(record_interrupt(&flag));
    }
}
