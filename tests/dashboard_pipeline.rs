//! End-to-end tests: delimited table in, classifications and summaries out.

use lib::*;
use std::collections::BTreeSet;
use std::io::Write;

const WORLD_SAMPLE: &str = "\
Country Code;City;Location;Pollutant;Source Name;Unit;Value;Last Updated;Country Label
TH;Bangkok;Din Daeng;PM2.5;AirNow;µg/m³;62.0;2023-02-01T00:00:00+00:00;Thailand
TH;Bangkok;Din Daeng;CO;AirNow;ppm;0.0004;2023-02-01T00:00:00+00:00;Thailand
TH;Chiang Mai;Yupparaj;PM10;AirNow;µg/m³;171.5;2023-02-01T00:00:00+00:00;Thailand
NO;Oslo;Kirkeveien;NO2;EEA;µg/m³;12.0;2023-02-01T00:00:00+00:00;Norway
NO;Oslo;Kirkeveien;SO2;EEA;µg/m³;3.0;2023-02-01T00:00:00+00:00;Norway
MX;Monterrey;Obispado;O3;SINAICA;ppm;0.012;2023-02-01T00:00:00+00:00;Mexico
MX;Monterrey;Obispado;BC;SINAICA;particles/cm³;5200;2023-02-01T00:00:00+00:00;Mexico
";

fn measurement(country: &str, value: f64, unit: &str) -> Measurement {
    Measurement {
        country_label: country.to_string(),
        city: "City".to_string(),
        location: "Station".to_string(),
        pollutant: "PM2.5".to_string(),
        value,
        unit: unit.to_string(),
    }
}

fn load_sample() -> Vec<ClassifiedMeasurement> {
    let report =
        read_measurements_from_reader(WORLD_SAMPLE.as_bytes(), &DashboardConfig::default())
            .unwrap();
    assert_eq!(report.skipped_rows, 0);
    classify_all(report.measurements)
}

#[test]
fn three_record_scenario() {
    let records = classify_all(vec![
        measurement("A", 0.0005, "ppm"),
        measurement("A", 0.008, "ppm"),
        measurement("B", 200.0, "µg/m³"),
    ]);

    let classes: Vec<_> = records.iter().map(|r| r.classification).collect();
    assert_eq!(
        classes,
        vec![
            Classification::Healthy,
            Classification::Poor,
            Classification::Toxic
        ]
    );

    let counts = count_by_classification(&records);
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[&Classification::Healthy], 1);
    assert_eq!(counts[&Classification::Poor], 1);
    assert_eq!(counts[&Classification::Toxic], 1);

    let summaries = summarize_by_country(&records);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].country_label, "A");
    assert!((summaries[0].average_value - 0.00425).abs() < 1e-12);
    assert_eq!(summaries[0].modal_classification, Classification::Healthy);
    assert_eq!(summaries[1].country_label, "B");
    assert_eq!(summaries[1].average_value, 200.0);
    assert_eq!(summaries[1].modal_classification, Classification::Toxic);
}

#[test]
fn sample_table_counts_are_conserved() {
    let records = load_sample();
    assert_eq!(records.len(), 7);

    let counts = count_by_classification(&records);
    assert_eq!(counts.values().sum::<usize>(), records.len());
    assert_eq!(counts[&Classification::Unknown], 1);
    assert_eq!(counts[&Classification::Toxic], 2);

    for country in countries(&records) {
        let scoped = filter_by_country(&records, country);
        let scoped_counts = count_by_classification(scoped.iter().copied());
        assert_eq!(scoped_counts.values().sum::<usize>(), scoped.len());
    }
}

#[test]
fn sample_table_summaries() {
    let records = load_sample();
    let summaries = summarize_by_country(&records);

    let distinct: BTreeSet<_> = records
        .iter()
        .map(|r| r.measurement.country_label.as_str())
        .collect();
    assert_eq!(summaries.len(), distinct.len());

    let labels: Vec<_> = summaries.iter().map(|s| s.country_label.as_str()).collect();
    assert_eq!(labels, vec!["Mexico", "Norway", "Thailand"]);

    let norway = &summaries[1];
    assert_eq!(norway.average_value, 7.5);
    assert_eq!(norway.modal_classification, Classification::Healthy);

    // Thailand: Moderate, Healthy, Toxic all once; first seen wins.
    let thailand = &summaries[2];
    assert_eq!(thailand.record_count, 3);
    assert_eq!(thailand.modal_classification, Classification::Moderate);

    let extremes = find_extremes(&summaries).unwrap();
    assert_eq!(extremes.healthiest.country_label, "Norway");
    assert_eq!(extremes.most_toxic.country_label, "Mexico");
}

#[test]
fn sample_table_monitor_views() {
    let records = load_sample();
    assert_eq!(countries(&records), vec!["Mexico", "Norway", "Thailand"]);

    let thailand = filter_by_country(&records, "Thailand");
    assert_eq!(cities(thailand.iter().copied()), vec!["Bangkok", "Chiang Mai"]);

    let bangkok = filter_by_city(thailand.iter().copied(), "Bangkok");
    let counts = count_by_classification(bangkok.iter().copied());
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&Classification::Moderate], 1);
    assert_eq!(counts[&Classification::Healthy], 1);

    assert!(filter_by_country(&records, "Atlantis").is_empty());
}

#[test]
fn sample_table_country_check() {
    let records = load_sample();

    let norway = assess_country(&records, "Norway").unwrap();
    assert_eq!(norway.classification, Classification::Healthy);
    assert_eq!(
        AdviceKind::from(norway.classification),
        AdviceKind::Tips
    );

    // Mexico's first unit is ppm, and the mean lands far above 0.010.
    let mexico = assess_country(&records, "Mexico").unwrap();
    assert_eq!(mexico.unit, "ppm");
    assert_eq!(mexico.classification, Classification::Toxic);
    assert!(health_advice(mexico.classification).contains("Dampak kesehatan"));

    assert!(assess_country(&records, "Atlantis").is_none());
}

#[test]
fn load_dataset_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WORLD_SAMPLE.as_bytes()).unwrap();
    file.write_all("XX;Nowhere;Void;CO;Test;ppm;not-a-number;;Nowhere\n".as_bytes())
        .unwrap();
    file.flush().unwrap();

    let dataset = load_dataset(file.path(), &DashboardConfig::default()).unwrap();
    assert_eq!(dataset.records.len(), 7);
    assert_eq!(dataset.skipped_rows, 1);

    let strict = DashboardConfig {
        skip_invalid: false,
        ..DashboardConfig::default()
    };
    let err = load_dataset(file.path(), &strict).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidRow { row: 8, .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_dataset(
        std::path::Path::new("/nonexistent/world_air_quality.csv"),
        &DashboardConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DashboardError::Io(_)));
}

#[test]
fn comma_delimited_tables_with_configured_delimiter() {
    let table = "Country Label,City,Location,Pollutant,Value,Unit\nA,X,S,CO,0.02,ppm\n";
    let config = DashboardConfig {
        delimiter: b',',
        ..DashboardConfig::default()
    };
    let report = read_measurements_from_reader(table.as_bytes(), &config).unwrap();
    let records = classify_all(report.measurements);
    assert_eq!(records[0].classification, Classification::Toxic);

    // With the default delimiter the whole header is one column.
    let err = read_measurements_from_reader(table.as_bytes(), &DashboardConfig::default())
        .unwrap_err();
    assert!(matches!(err, DashboardError::MissingColumn(_)));
}
