use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One row of the air-quality table as it appears in the source file.
///
/// Field names follow the column headers of the published dataset; any
/// additional columns in the file are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    #[serde(rename = "Country Label")]
    pub country_label: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Pollutant")]
    pub pollutant: String,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Unit")]
    pub unit: String,
}

/// Air-quality severity assigned to a single measurement.
///
/// Variants are declared in ascending severity, so the derived `Ord` sorts
/// `Healthy` first and the `Unknown` fallback last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Sehat")]
    Healthy,
    #[serde(rename = "Sedang")]
    Moderate,
    #[serde(rename = "Buruk")]
    Poor,
    #[serde(rename = "Beracun")]
    Toxic,
    #[serde(rename = "Tidak Diketahui")]
    Unknown,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::Healthy,
        Classification::Moderate,
        Classification::Poor,
        Classification::Toxic,
        Classification::Unknown,
    ];

    /// Label used throughout the dashboard text.
    pub fn indonesian_label(&self) -> &'static str {
        match self {
            Classification::Healthy => "Sehat",
            Classification::Moderate => "Sedang",
            Classification::Poor => "Buruk",
            Classification::Toxic => "Beracun",
            Classification::Unknown => "Tidak Diketahui",
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            Classification::Healthy => "Healthy",
            Classification::Moderate => "Moderate",
            Classification::Poor => "Poor",
            Classification::Toxic => "Toxic",
            Classification::Unknown => "Unknown",
        }
    }

    pub fn label(&self, language: &LabelLanguage) -> &'static str {
        match language {
            LabelLanguage::Indonesian => self.indonesian_label(),
            LabelLanguage::English => self.english_label(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.indonesian_label())
    }
}

/// A measurement together with its severity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedMeasurement {
    pub measurement: Measurement,
    pub classification: Classification,
}

/// Rows accepted from the input table, plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub measurements: Vec<Measurement>,
    pub skipped_rows: usize,
}

/// The classified in-memory table. Loaded once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<ClassifiedMeasurement>,
    pub skipped_rows: usize,
}

/// Per-country statistics over every record carrying that country label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country_label: String,
    pub average_value: f64,
    pub modal_classification: Classification,
    pub record_count: usize,
}

/// The countries with the lowest and highest mean pollutant value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryExtremes {
    pub healthiest: CountrySummary,
    pub most_toxic: CountrySummary,
}

/// One bar segment of the "records per country" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryClassificationCount {
    pub country_label: String,
    pub classification: Classification,
    pub count: usize,
}

/// Outcome of the country-level air quality check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAssessment {
    pub country_label: String,
    pub average_value: f64,
    pub unit: String,
    pub classification: Classification,
}

/// Values entered on the sensor test form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Relative humidity, percent
    pub humidity: f64,
    /// MQ135 gas sensor output, ppm
    pub mq135_ppm: f64,
    /// Ambient temperature, °C
    pub temperature: f64,
}

/// Language used when printing classification labels
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum LabelLanguage {
    Indonesian,
    English,
}

/// Configuration for loading the measurement table
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub delimiter: u8,
    pub labels: LabelLanguage,
    pub skip_invalid: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            labels: LabelLanguage::Indonesian,
            skip_invalid: true,
        }
    }
}
