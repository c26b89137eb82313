use clap::{Parser, Subcommand};
use lib::{
    ClassifiedMeasurement, DashboardConfig, DashboardError, LabelLanguage, NO_COUNTRY_DATA,
    OverviewReport, SensorReading, SimpleLogger, assess_country, cities, count_by_classification,
    count_by_country_and_classification, country_intro, filter_by_city, filter_by_country,
    find_extremes, health_advice, load_dataset, sensor_intro, summarize_by_country,
    write_chart_csv, write_report_json, write_summary_csv, write_summary_json,
    write_summary_parquet,
};
use log::debug;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Semicolon-delimited air quality table
    #[arg(short, long, global = true, default_value = "Dashboard/world_air_quality.csv")]
    input_file: PathBuf,

    /// Language for classification labels
    #[arg(long, global = true, default_value = "indonesian")]
    labels: LabelLanguage,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    /// Log level for output
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Counts per country, country summaries, and the best and worst country
    Overview {
        /// Output base name (will create dir containing .csv, .json, and .parquet files)
        #[arg(short, long, default_value = "overview")]
        output: String,
    },
    /// Browse the measurements of one country and one of its cities
    Monitor {
        #[arg(short, long)]
        country: String,

        /// City to detail (defaults to the first city of the country)
        #[arg(long)]
        city: Option<String>,
    },
    /// Classify a simulated MQ135 sensor reading
    Sensor {
        /// Relative humidity (%)
        #[arg(long, default_value_t = 0.0)]
        humidity: f64,

        /// MQ135 sensor value (ppm)
        #[arg(long)]
        mq135: f64,

        /// Temperature (°C)
        #[arg(long, default_value_t = 0.0)]
        temperature: f64,
    },
    /// Classify a country from its average measured value
    Check {
        #[arg(short, long)]
        country: String,

        /// Name used to address the reader
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

fn main() -> Result<(), DashboardError> {
    let total_start = Instant::now();
    log::set_logger(&LOGGER)
        .map_err(|e| DashboardError::Io(std::io::Error::other(e.to_string())))?;

    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = DashboardConfig {
        labels: args.labels,
        skip_invalid: !args.strict,
        ..DashboardConfig::default()
    };
    debug!(
        "Input file: {} | Labels: {:?} | Skip invalid rows: {}",
        args.input_file.display(),
        config.labels,
        config.skip_invalid
    );

    // The sensor form does not need the table.
    if let Command::Sensor {
        humidity,
        mq135,
        temperature,
    } = args.command
    {
        let reading = SensorReading {
            humidity,
            mq135_ppm: mq135,
            temperature,
        };
        run_sensor(&reading, &config)?;
        return Ok(());
    }

    println!("Air Quality Monitoring Sensing for Healthier People");
    let load_start = Instant::now();
    let dataset = load_dataset(&args.input_file, &config)?;
    println!(
        "Loaded {} records in {:.2?} ({} skipped)",
        dataset.records.len(),
        load_start.elapsed(),
        dataset.skipped_rows
    );

    match args.command {
        Command::Overview { output } => {
            run_overview(&dataset.records, dataset.skipped_rows, &output, &config)?
        }
        Command::Monitor { country, city } => {
            run_monitor(&dataset.records, &country, city.as_deref(), &config)
        }
        Command::Check { country, name } => run_check(&dataset.records, &country, &name, &config),
        Command::Sensor { .. } => {}
    }

    println!("\nTotal runtime: {:.2?}", total_start.elapsed());
    Ok(())
}

fn run_overview(
    records: &[ClassifiedMeasurement],
    skipped_rows: usize,
    output: &str,
    config: &DashboardConfig,
) -> Result<(), DashboardError> {
    let processing_start = Instant::now();
    let chart = count_by_country_and_classification(records);
    let counts = count_by_classification(records);
    let summaries = summarize_by_country(records);
    let extremes = find_extremes(&summaries);
    let processing_time = processing_start.elapsed();
    println!(
        "Summarized {} countries in {:.2?}",
        summaries.len(),
        processing_time
    );

    println!("\nJumlah Data Kualitas Udara Berdasarkan Negara");
    for row in &chart {
        println!(
            "  {:<30} {:<16} {:>6}",
            row.country_label,
            row.classification.label(&config.labels),
            row.count
        );
    }

    println!("\nRingkasan per Negara");
    for summary in &summaries {
        println!(
            "  {:<30} avg={:<12.4} {:<16} n={}",
            summary.country_label,
            summary.average_value,
            summary.modal_classification.label(&config.labels),
            summary.record_count
        );
    }

    if let Some(extremes) = &extremes {
        println!(
            "\nNegara dengan Kualitas Udara Terbaik: {} (rata-rata {:.4})",
            extremes.healthiest.country_label, extremes.healthiest.average_value
        );
        println!(
            "Negara dengan Kualitas Udara Paling Beracun: {} (rata-rata {:.4})",
            extremes.most_toxic.country_label, extremes.most_toxic.average_value
        );
    }

    let output_dir = PathBuf::from(format!("./output/{}", output));
    fs::create_dir_all(&output_dir)?;
    println!(
        "\nCreated output directory: {} | Writing output files...",
        output_dir.display()
    );

    // Extract just the directory name for the file names (remove path separators)
    let output_name = output.split(['/', '\\']).next_back().unwrap_or(output);
    let csv_path = output_dir.join(format!("{}.csv", output_name));
    let json_path = output_dir.join(format!("{}.json", output_name));
    let parquet_path = output_dir.join(format!("{}.parquet", output_name));
    let chart_path = output_dir.join(format!("{}_chart.csv", output_name));
    let report_path = output_dir.join(format!("{}_report.json", output_name));

    let io_start = Instant::now();
    write_summary_csv(&summaries, &csv_path)?;
    write_summary_json(&summaries, &json_path)?;
    write_summary_parquet(&summaries, &parquet_path)?;
    write_chart_csv(&chart, &chart_path)?;
    let report = OverviewReport::new(
        records.len(),
        skipped_rows,
        &counts,
        &summaries,
        extremes.as_ref(),
    );
    write_report_json(&report, &report_path)?;
    println!("All files took {:.2?}", io_start.elapsed());
    debug!("  - {}", csv_path.display());
    debug!("  - {}", json_path.display());
    debug!("  - {}", parquet_path.display());
    debug!("  - {}", chart_path.display());
    debug!("  - {}", report_path.display());

    Ok(())
}

fn run_monitor(
    records: &[ClassifiedMeasurement],
    country: &str,
    city: Option<&str>,
    config: &DashboardConfig,
) {
    let country_data = filter_by_country(records, country);
    if country_data.is_empty() {
        println!("{}", NO_COUNTRY_DATA);
        return;
    }

    println!("\nWorld Air Quality Monitor: {}", country);
    print_rows(&country_data, true, config);

    println!("\nRingkasan Kualitas Udara:");
    for (classification, count) in count_by_classification(country_data.iter().copied()) {
        println!("  {:<16} {}", classification.label(&config.labels), count);
    }

    let city_options = cities(country_data.iter().copied());
    debug!("Cities available: {}", city_options.join(", "));
    let Some(city) = city.or(city_options.first().copied()) else {
        return;
    };

    let city_data = filter_by_city(country_data.iter().copied(), city);
    println!("\nDetail Kualitas Udara di {}:", city);
    print_rows(&city_data, false, config);
}

fn print_rows(rows: &[&ClassifiedMeasurement], with_location: bool, config: &DashboardConfig) {
    for row in rows {
        let m = &row.measurement;
        let label = row.classification.label(&config.labels);
        if with_location {
            println!(
                "  {:<20} {:<24} {:<8} {:>10} {:<6} {}",
                m.city, m.location, m.pollutant, m.value, m.unit, label
            );
        } else {
            println!(
                "  {:<8} {:>10} {:<6} {}",
                m.pollutant, m.value, m.unit, label
            );
        }
    }
}

fn run_sensor(reading: &SensorReading, config: &DashboardConfig) -> Result<(), DashboardError> {
    reading.validate()?;
    println!("Kelembaban: {}%", reading.humidity);
    println!("Nilai Sensor MQ135: {} ppm", reading.mq135_ppm);
    println!("Suhu: {} °C", reading.temperature);

    let classification = reading.classify();
    println!(
        "Klasifikasi Kualitas Udara Berdasarkan Nilai Sensor MQ135: {}\n",
        classification.label(&config.labels)
    );
    println!("{}\n", sensor_intro(classification));
    println!("{}", health_advice(classification));
    Ok(())
}

fn run_check(
    records: &[ClassifiedMeasurement],
    country: &str,
    name: &str,
    config: &DashboardConfig,
) {
    let Some(assessment) = assess_country(records, country) else {
        println!("{}", NO_COUNTRY_DATA);
        return;
    };

    debug!(
        "Average for {}: {} {}",
        assessment.country_label, assessment.average_value, assessment.unit
    );
    println!(
        "Hasil kualitas udara menunjukkan bahwa kualitas udara di {} adalah {}.",
        assessment.country_label,
        assessment.classification.label(&config.labels)
    );
    println!(
        "{}\n",
        country_intro(&assessment.country_label, name, assessment.classification)
    );
    println!("{}", health_advice(assessment.classification));
}
