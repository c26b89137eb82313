use crate::structs::{Classification, ClassifiedMeasurement, Measurement};
use log::debug;
use rayon::prelude::*;

/// Unit used for gaseous pollutants.
pub const UNIT_PPM: &str = "ppm";
/// Unit used for particulate pollutants.
pub const UNIT_UG_M3: &str = "µg/m³";

/// Upper bounds (exclusive) of Healthy, Moderate and Poor for ppm readings.
const PPM_BOUNDS: [f64; 3] = [0.001, 0.005, 0.010];
/// Upper bounds (exclusive) of Healthy, Moderate and Poor for µg/m³ readings.
const UG_M3_BOUNDS: [f64; 3] = [50.0, 100.0, 150.0];

/// Maps a concentration and its unit to a severity.
///
/// Each band is half-open, `[lower, upper)`, so a value sitting exactly on a
/// bound belongs to the more severe band. A unit other than `ppm` or `µg/m³`
/// (compared byte for byte) yields `Unknown`. The function is total: a NaN
/// value fails every comparison and ends up `Toxic` for a recognized unit.
pub fn classify(value: f64, unit: &str) -> Classification {
    let bounds = match unit {
        UNIT_PPM => &PPM_BOUNDS,
        UNIT_UG_M3 => &UG_M3_BOUNDS,
        _ => return Classification::Unknown,
    };

    if value < bounds[0] {
        Classification::Healthy
    } else if value < bounds[1] {
        Classification::Moderate
    } else if value < bounds[2] {
        Classification::Poor
    } else {
        Classification::Toxic
    }
}

pub fn classify_measurement(measurement: Measurement) -> ClassifiedMeasurement {
    let classification = classify(measurement.value, &measurement.unit);
    ClassifiedMeasurement {
        measurement,
        classification,
    }
}

/// Classifies every record in parallel. The output keeps the input order.
pub fn classify_all(measurements: Vec<Measurement>) -> Vec<ClassifiedMeasurement> {
    debug!("Classifying {} measurements", measurements.len());
    measurements
        .into_par_iter()
        .map(classify_measurement)
        .collect()
}
