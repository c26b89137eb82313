use crate::error::Result;
use crate::structs::{
    Classification, CountryClassificationCount, CountryExtremes, CountrySummary,
};
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use chrono::{SecondsFormat, Utc};
use csv::Writer;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use std::collections::BTreeMap;
use std::{fs::File, path::Path, sync::Arc};

/// Everything the overview page shows, bundled for a single JSON export.
#[derive(Debug, Serialize)]
pub struct OverviewReport<'a> {
    pub generated_at: String,
    pub total_records: usize,
    pub skipped_rows: usize,
    pub counts: &'a BTreeMap<Classification, usize>,
    pub summaries: &'a [CountrySummary],
    pub extremes: Option<&'a CountryExtremes>,
}

impl<'a> OverviewReport<'a> {
    /// Builds a report stamped with the current UTC time.
    pub fn new(
        total_records: usize,
        skipped_rows: usize,
        counts: &'a BTreeMap<Classification, usize>,
        summaries: &'a [CountrySummary],
        extremes: Option<&'a CountryExtremes>,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_records,
            skipped_rows,
            counts,
            summaries,
            extremes,
        }
    }
}

/// Writes country summaries to a CSV file.
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_summary_csv(summaries: &[CountrySummary], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "Country Label",
        "Average_Value",
        "Classification",
        "Count",
    ])?;

    for summary in summaries {
        writer.write_record(&[
            summary.country_label.clone(),
            format!("{:.4}", summary.average_value),
            summary.modal_classification.to_string(),
            summary.record_count.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the per-country classification counts behind the overview chart.
pub fn write_chart_csv(counts: &[CountryClassificationCount], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["Country Label", "Klasifikasi Kualitas Udara", "Count"])?;
    for row in counts {
        writer.write_record(&[
            row.country_label.clone(),
            row.classification.to_string(),
            row.count.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes country summaries to a pretty-formatted JSON file.
pub fn write_summary_json(summaries: &[CountrySummary], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, summaries)?;
    Ok(())
}

pub fn write_report_json(report: &OverviewReport, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Writes country summaries to a columnar Parquet file using Arrow format.
///
/// The classification column holds the dashboard label (e.g. `Sehat`).
///
/// # Errors
/// Returns error if file cannot be created, schema is invalid, or Arrow operations fail.
pub fn write_summary_parquet(summaries: &[CountrySummary], output_path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("country_label", DataType::Utf8, false),
        Field::new("average_value", DataType::Float64, false),
        Field::new("modal_classification", DataType::Utf8, false),
        Field::new("record_count", DataType::UInt64, false),
    ]));

    let countries =
        StringArray::from_iter_values(summaries.iter().map(|s| s.country_label.as_str()));
    let averages: Float64Array = summaries.iter().map(|s| s.average_value).collect();
    let classifications = StringArray::from_iter_values(
        summaries
            .iter()
            .map(|s| s.modal_classification.indonesian_label()),
    );
    let counts: UInt64Array = summaries.iter().map(|s| s.record_count as u64).collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(countries),
            Arc::new(averages),
            Arc::new(classifications),
            Arc::new(counts),
        ],
    )?;

    let file = File::create(output_path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
