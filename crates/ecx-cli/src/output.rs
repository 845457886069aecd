//! Rendering processed documents for the terminal and output files.

use ecx_core::extraction::rules::format_rupee_amount;
use ecx_core::{ProcessedDocument, TransactionRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per transaction
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing into an output directory.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_document(document: &ProcessedDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(document)?),
        OutputFormat::Csv => format_csv(&document.records),
        OutputFormat::Text => Ok(format_text(document)),
    }
}

const CSV_HEADER: [&str; 14] = [
    "serial_no",
    "date",
    "transaction_date",
    "document_no",
    "nature",
    "seller",
    "buyer",
    "value",
    "market_value",
    "property_extent",
    "survey_no",
    "house_no",
    "village",
    "property_type",
];

fn format_csv(records: &[TransactionRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let amount = |value: Option<u64>| value.map(|v| v.to_string()).unwrap_or_default();

        wtr.write_record([
            text(&record.serial_no),
            text(&record.date),
            record
                .transaction_date()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            text(&record.document_no),
            text(&record.nature),
            text(&record.seller),
            text(&record.buyer),
            amount(record.value),
            amount(record.market_value),
            text(&record.property_extent),
            text(&record.survey_no),
            text(&record.house_no),
            text(&record.village),
            text(&record.property_type),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(document: &ProcessedDocument) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Transactions: {} (Tamil name fragments: {})\n",
        document.record_count(),
        document.tamil_fragment_count
    ));
    if document.cancelled {
        output.push_str("Processing was cancelled; the list is incomplete.\n");
    }

    for (i, record) in document.records.iter().enumerate() {
        output.push('\n');
        output.push_str(&format!(
            "#{} Serial {} | {} | Doc {}\n",
            i + 1,
            record.serial_no.as_deref().unwrap_or("-"),
            record.date.as_deref().unwrap_or("-"),
            record.document_no.as_deref().unwrap_or("-"),
        ));

        let lines = [
            ("Nature", record.nature.clone()),
            ("Seller", record.seller.clone()),
            ("Buyer", record.buyer.clone()),
            ("Value", record.value.map(|v| format!("Rs. {}", format_rupee_amount(v)))),
            (
                "Market value",
                record.market_value.map(|v| format!("Rs. {}", format_rupee_amount(v))),
            ),
            ("Extent", record.property_extent.clone()),
            ("Survey", record.survey_no.clone()),
            ("House/Plot", record.house_no.clone()),
            ("Village", record.village.clone()),
            ("Property", record.property_type.clone()),
        ];
        for (label, value) in lines {
            if let Some(value) = value {
                output.push_str(&format!("  {}: {}\n", label, value));
            }
        }
    }

    if !document.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &document.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
