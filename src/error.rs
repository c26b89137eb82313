use arrow_schema::ArrowError;

/// Every failure the dashboard can report. The classifier and the
/// aggregations never produce one of these; they come from the ingestion
/// boundary, the output writers, or validation of user-entered values.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column in input table: {0}")]
    MissingColumn(String),
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: u64, reason: String },
    #[error("Invalid sensor input: {0}")]
    SensorInput(String),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Arrow Error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("Parquet Error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
