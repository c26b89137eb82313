use crate::classify::{classify, classify_all};
use crate::error::{DashboardError, Result};
use crate::structs::{
    Classification, ClassifiedMeasurement, CountryAssessment, CountryClassificationCount,
    CountryExtremes, CountrySummary, DashboardConfig, Dataset, IngestReport, Measurement,
};
use csv::ReaderBuilder;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::{fs::File, io::Read, path::Path};

/// Columns the measurement table must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Country Label",
    "City",
    "Location",
    "Pollutant",
    "Value",
    "Unit",
];

/// Loads the measurement table and classifies every accepted row.
///
/// This is the single entry point the presentation layer uses at startup;
/// everything else in this module derives views from the returned dataset.
///
/// # Errors
///
/// Returns `DashboardError` if the file cannot be opened, a required column
/// is missing, or (with `skip_invalid` off) a row cannot be parsed.
pub fn load_dataset(file_path: &Path, config: &DashboardConfig) -> Result<Dataset> {
    let report = read_measurements(file_path, config)?;
    Ok(Dataset {
        records: classify_all(report.measurements),
        skipped_rows: report.skipped_rows,
    })
}

/// Reads measurements from a delimited file on disk.
pub fn read_measurements(file_path: &Path, config: &DashboardConfig) -> Result<IngestReport> {
    debug!("Reading measurement table: {}", file_path.display());
    let file = File::open(file_path)?;
    read_measurements_from_reader(file, config)
}

/// Reads measurements from any delimited text source.
///
/// Rows that fail to deserialize, or whose value is not a finite non-negative
/// number, are either skipped and counted or turned into an error, depending
/// on `config.skip_invalid`. A missing required column always fails.
pub fn read_measurements_from_reader<R: Read>(
    reader: R,
    config: &DashboardConfig,
) -> Result<IngestReport> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
    }

    let mut report = IngestReport::default();
    for (index, row) in csv_reader.deserialize::<Measurement>().enumerate() {
        let row_number = index as u64 + 1;
        let checked = row
            .map_err(|e| e.to_string())
            .and_then(|measurement| match clean_value(measurement.value) {
                Some(_) => Ok(measurement),
                None => Err(format!(
                    "value {} is not a valid concentration",
                    measurement.value
                )),
            });

        match checked {
            Ok(measurement) => report.measurements.push(measurement),
            Err(reason) if config.skip_invalid => {
                debug!("Skipping row {}: {}", row_number, reason);
                report.skipped_rows += 1;
            }
            Err(reason) => {
                return Err(DashboardError::InvalidRow {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    if report.skipped_rows > 0 {
        warn!(
            "Skipped {} malformed rows while loading measurements",
            report.skipped_rows
        );
    }
    debug!("Loaded {} measurements", report.measurements.len());
    Ok(report)
}

/// Concentrations must be finite and non-negative to enter the table.
fn clean_value(value: f64) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value)
}

/// Distinct country labels, sorted, for the country picker.
pub fn countries(records: &[ClassifiedMeasurement]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.measurement.country_label.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct cities in first-appearance order.
pub fn cities<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a ClassifiedMeasurement>,
{
    let mut seen = BTreeSet::new();
    records
        .into_iter()
        .map(|r| r.measurement.city.as_str())
        .filter(|city| seen.insert(*city))
        .collect()
}

pub fn filter_by_country<'a>(
    records: &'a [ClassifiedMeasurement],
    country: &str,
) -> Vec<&'a ClassifiedMeasurement> {
    records
        .iter()
        .filter(|r| r.measurement.country_label == country)
        .collect()
}

pub fn filter_by_city<'a, I>(records: I, city: &str) -> Vec<&'a ClassifiedMeasurement>
where
    I: IntoIterator<Item = &'a ClassifiedMeasurement>,
{
    records
        .into_iter()
        .filter(|r| r.measurement.city == city)
        .collect()
}

/// Counts how many records fall into each classification.
///
/// Only classifications that occur appear in the map; an empty input gives
/// an empty map. Accepts a slice or any pre-filtered sequence of references.
pub fn count_by_classification<'a, I>(records: I) -> BTreeMap<Classification, usize>
where
    I: IntoIterator<Item = &'a ClassifiedMeasurement>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.classification).or_insert(0) += 1;
    }
    counts
}

/// Like `count_by_classification`, but every classification is present,
/// with zero for those that do not occur.
pub fn full_counts<'a, I>(records: I) -> BTreeMap<Classification, usize>
where
    I: IntoIterator<Item = &'a ClassifiedMeasurement>,
{
    let mut counts: BTreeMap<Classification, usize> =
        Classification::ALL.iter().map(|c| (*c, 0)).collect();
    for (classification, count) in count_by_classification(records) {
        counts.insert(classification, count);
    }
    counts
}

/// Running totals for one country while summarizing.
struct CountryGroup<'a> {
    country_label: &'a str,
    sum: f64,
    count: usize,
    /// Classification tallies in order of first occurrence
    tallies: Vec<(Classification, usize)>,
}

impl<'a> CountryGroup<'a> {
    fn new(country_label: &'a str) -> Self {
        Self {
            country_label,
            sum: 0.0,
            count: 0,
            tallies: Vec::new(),
        }
    }

    fn add(&mut self, record: &ClassifiedMeasurement) {
        self.sum += record.measurement.value;
        self.count += 1;
        match self
            .tallies
            .iter_mut()
            .find(|(classification, _)| *classification == record.classification)
        {
            Some((_, tally)) => *tally += 1,
            None => self.tallies.push((record.classification, 1)),
        }
    }

    /// Most frequent classification; on a tie the one seen first wins.
    fn mode(&self) -> Classification {
        let mut best = self.tallies[0];
        for &(classification, tally) in &self.tallies[1..] {
            if tally > best.1 {
                best = (classification, tally);
            }
        }
        best.0
    }

    fn into_summary(self) -> CountrySummary {
        CountrySummary {
            country_label: self.country_label.to_string(),
            average_value: self.sum / self.count as f64,
            modal_classification: self.mode(),
            record_count: self.count,
        }
    }
}

/// Builds one summary per distinct country label.
///
/// Countries are grouped by exact label equality. The average is the
/// arithmetic mean of the values; the modal classification is the most
/// frequent one, with ties going to whichever appeared first in `records`.
/// The result is sorted by country label.
pub fn summarize_by_country(records: &[ClassifiedMeasurement]) -> Vec<CountrySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CountryGroup> = Vec::new();

    for record in records {
        let label = record.measurement.country_label.as_str();
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(CountryGroup::new(label));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    debug!("Summarizing {} countries", groups.len());
    let mut summaries: Vec<CountrySummary> =
        groups.into_iter().map(CountryGroup::into_summary).collect();
    summaries.sort_by(|a, b| a.country_label.cmp(&b.country_label));
    summaries
}

/// Picks the countries with the lowest and highest average value.
///
/// Ties go to the summary that comes first in `summaries`. Returns `None`
/// when there is nothing to compare.
pub fn find_extremes(summaries: &[CountrySummary]) -> Option<CountryExtremes> {
    let first = summaries.first()?;
    let mut healthiest = first;
    let mut most_toxic = first;

    for summary in &summaries[1..] {
        if summary.average_value < healthiest.average_value {
            healthiest = summary;
        }
        if summary.average_value > most_toxic.average_value {
            most_toxic = summary;
        }
    }

    Some(CountryExtremes {
        healthiest: healthiest.clone(),
        most_toxic: most_toxic.clone(),
    })
}

/// Record counts per (country, classification), the data behind the
/// overview bar chart. Sorted by country, then by severity.
pub fn count_by_country_and_classification(
    records: &[ClassifiedMeasurement],
) -> Vec<CountryClassificationCount> {
    let mut counts: BTreeMap<(&str, Classification), usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry((record.measurement.country_label.as_str(), record.classification))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((country_label, classification), count)| CountryClassificationCount {
            country_label: country_label.to_string(),
            classification,
            count,
        })
        .collect()
}

/// Classifies a country as a whole: its mean value, read in the unit of its
/// first record.
///
/// Returns `None` if the dataset holds no records for `country`.
pub fn assess_country(
    records: &[ClassifiedMeasurement],
    country: &str,
) -> Option<CountryAssessment> {
    let country_records = filter_by_country(records, country);
    let first = country_records.first()?;

    let total: f64 = country_records.iter().map(|r| r.measurement.value).sum();
    let average_value = total / country_records.len() as f64;
    let unit = first.measurement.unit.clone();

    Some(CountryAssessment {
        country_label: country.to_string(),
        average_value,
        classification: classify(average_value, &unit),
        unit,
    })
}
