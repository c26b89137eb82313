pub mod advice;
pub mod classify;
pub mod error;
pub mod load;
pub mod structs;
pub mod transform;

// Re-export public API
pub use advice::{AdviceKind, NO_COUNTRY_DATA, country_intro, health_advice, sensor_intro};
pub use classify::{UNIT_PPM, UNIT_UG_M3, classify, classify_all, classify_measurement};
pub use error::{DashboardError, Result};
pub use load::{
    OverviewReport, write_chart_csv, write_report_json, write_summary_csv, write_summary_json,
    write_summary_parquet,
};
pub use structs::{
    Classification, ClassifiedMeasurement, CountryAssessment, CountryClassificationCount,
    CountryExtremes, CountrySummary, DashboardConfig, Dataset, IngestReport, LabelLanguage,
    Measurement, SensorReading, SimpleLogger,
};
pub use transform::{
    assess_country, cities, count_by_classification, count_by_country_and_classification,
    countries, filter_by_city, filter_by_country, find_extremes, full_counts, load_dataset,
    read_measurements, read_measurements_from_reader, summarize_by_country,
};
