//! Health advice text and the sensor test form.
//!
//! The advice blocks are fixed Indonesian templates. Which block is shown
//! depends only on the classification group.

use crate::classify::{UNIT_PPM, classify};
use crate::error::{DashboardError, Result};
use crate::structs::{Classification, SensorReading};

const HEALTH_TIPS: &str = "\
**Tips untuk menjaga kesehatan**
- **Tetaplah berolahraga secara teratur:** Aktivitas fisik dapat membantu menjaga kesehatan jantung dan paru-paru.
- **Konsumsi makanan bergizi:** Pastikan untuk mengonsumsi makanan yang seimbang dan kaya nutrisi untuk memperkuat sistem kekebalan tubuh.
- **Hindari merokok dan paparan asap rokok:** Hindari kebiasaan merokok dan paparan asap rokok untuk menjaga kesehatan paru-paru.
- **Jaga pola tidur yang baik:** Tidur yang cukup dan berkualitas penting untuk pemulihan tubuh dan kesehatan secara keseluruhan.
- **Rutin lakukan pemeriksaan kesehatan:** Pemeriksaan kesehatan secara berkala dapat membantu mendeteksi masalah kesehatan sejak dini.
- **Pertahankan hidrasi yang baik:** Minum cukup air setiap hari untuk menjaga fungsi tubuh dan kesehatan kulit.
- **Berjemur di bawah sinar matahari:** Paparan sinar matahari pagi membantu tubuh memproduksi vitamin D yang penting untuk kesehatan tulang dan sistem kekebalan tubuh.
- **Kurangi stres:** Lakukan aktivitas yang Anda nikmati untuk mengurangi stres dan menjaga keseimbangan mental.
";

const HEALTH_IMPACTS: &str = "\
**Dampak kesehatan dari kualitas udara buruk**
- Dapat menyebabkan masalah pernapasan seperti asma dan bronkitis.
- Meningkatkan risiko penyakit jantung dan paru-paru.
- Mengurangi kapasitas paru-paru dan fungsi pernapasan.
- Meningkatkan risiko kanker paru-paru dalam jangka panjang.

**Saran untuk Menjaga Kesehatan**
- **Gunakan masker pelindung:** Saat kualitas udara sangat buruk, gunakan masker dengan filter HEPA untuk melindungi saluran pernapasan.
- **Batasi aktivitas luar ruangan:** Kurangi waktu di luar ruangan, terutama pada saat kualitas udara sangat buruk.
- **Gunakan pembersih udara:** Pertimbangkan menggunakan pembersih udara di dalam ruangan untuk mengurangi paparan polusi udara.
- **Perbanyak konsumsi makanan kaya antioksidan:** Makanan seperti buah-buahan dan sayuran dapat membantu melawan dampak polusi udara pada tubuh.
- **Hidrasi yang baik:** Minum cukup air untuk membantu tubuh dalam proses detoksifikasi.
";

/// Shown by the country check when the selected country has no rows.
pub const NO_COUNTRY_DATA: &str = "Data untuk negara yang dipilih tidak tersedia.";

/// Which advice block a classification calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceKind {
    /// Everyday tips, for Healthy and Moderate air
    Tips,
    /// Health impacts plus protective advice, for Poor and Toxic air
    Impacts,
    None,
}

impl From<Classification> for AdviceKind {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Healthy | Classification::Moderate => AdviceKind::Tips,
            Classification::Poor | Classification::Toxic => AdviceKind::Impacts,
            Classification::Unknown => AdviceKind::None,
        }
    }
}

pub fn health_advice(classification: Classification) -> &'static str {
    match AdviceKind::from(classification) {
        AdviceKind::Tips => HEALTH_TIPS,
        AdviceKind::Impacts => HEALTH_IMPACTS,
        AdviceKind::None => "",
    }
}

/// Lead-in printed before the advice block on the sensor test page.
pub fn sensor_intro(classification: Classification) -> String {
    match AdviceKind::from(classification) {
        AdviceKind::Tips => format!(
            "Berdasarkan hasil pengukuran sensor, kualitas udara saat ini adalah {}.\n\
             Untuk menjaga kesehatan, berikut beberapa tips yang bisa Anda lakukan:",
            classification
        ),
        AdviceKind::Impacts => format!(
            "Berdasarkan hasil pengukuran sensor, kualitas udara saat ini menunjukkan kondisi {}.\n\
             Berikut dampak kesehatan dari kualitas udara tersebut:",
            classification
        ),
        AdviceKind::None => String::new(),
    }
}

/// Lead-in printed before the advice block on the country check page.
pub fn country_intro(country: &str, user_name: &str, classification: Classification) -> String {
    match AdviceKind::from(classification) {
        AdviceKind::Tips => format!(
            "Berdasarkan hasil tersebut, ada beberapa hal yang bisa Anda lakukan, {}, untuk tetap menjaga kesehatan:",
            user_name
        ),
        AdviceKind::Impacts => format!(
            "Berdasarkan hasil tersebut, kualitas udara di {} menunjukkan kondisi yang berbahaya, {}. \
             Berikut dampak kesehatan dari kualitas udara tersebut:",
            country, user_name
        ),
        AdviceKind::None => String::new(),
    }
}

impl SensorReading {
    /// Checks the reading against the bounds of the input form.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::SensorInput` naming the first field that is
    /// not finite or lies outside its range.
    pub fn validate(&self) -> Result<()> {
        check_range("humidity", self.humidity, 0.0, Some(100.0))?;
        check_range("MQ135", self.mq135_ppm, 0.0, None)?;
        check_range("temperature", self.temperature, 0.0, Some(60.0))?;
        Ok(())
    }

    /// Classifies the MQ135 reading as a ppm concentration.
    pub fn classify(&self) -> Classification {
        classify(self.mq135_ppm, UNIT_PPM)
    }
}

fn check_range(field: &str, value: f64, min: f64, max: Option<f64>) -> Result<()> {
    let within = value.is_finite() && value >= min && max.is_none_or(|max| value <= max);
    if within {
        return Ok(());
    }
    let bound = match max {
        Some(max) => format!("{} to {}", min, max),
        None => format!("at least {}", min),
    };
    Err(DashboardError::SensorInput(format!(
        "{} must be {}, got {}",
        field, bound, value
    )))
}
