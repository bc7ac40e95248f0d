use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::logic::signal::{Modality, SignalDataset};

/// Exports generated datasets as CSV files under a base directory.
pub struct DatasetWriter {
    base_dir: PathBuf,
}

impl DatasetWriter {
    pub fn new() -> Self {
        let base_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iot-security")
            .join("datasets");
        Self::from_path(base_dir)
    }

    pub fn from_path(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write one dataset to a timestamped CSV file, returning its path.
    pub fn export(&self, dataset: &SignalDataset) -> CoreResult<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;

        // timestamp format: YYYY-MM-DD-HHMMSS
        let filename = format!(
            "{}-data-{}.csv",
            dataset.modality.as_str(),
            Utc::now().format("%Y-%m-%d-%H%M%S")
        );
        let path = self.base_dir.join(filename);
        write_csv(&path, dataset)?;

        log::info!(
            "Exported {} {} rows to {}",
            dataset.len(),
            dataset.modality.as_str(),
            path.display()
        );
        Ok(path)
    }
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// COLUMN CONTRACT
// ============================================================================

/// Header row for one modality: scalar modalities expose a single
/// `SignalValue` column, CSI one column per subcarrier.
pub fn column_headers(modality: Modality) -> Vec<String> {
    let mut headers: Vec<String> = match modality {
        Modality::Rssi | Modality::Tof => vec!["SignalValue".to_string()],
        Modality::Csi => (0..modality.value_width())
            .map(|i| format!("Subcarrier_{i}"))
            .collect(),
    };
    headers.push("Label".to_string());
    headers
}

/// Write `dataset` to `path` under the column contract.
pub fn write_csv(path: &Path, dataset: &SignalDataset) -> CoreResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(column_headers(dataset.modality))?;

    for sample in &dataset.samples {
        let mut record: Vec<String> = sample.values.iter().map(|v| v.to_string()).collect();
        record.push(sample.label.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a persisted dataset back as `(rows, labels)`.
///
/// Value columns round-trip exactly: floats are written in shortest
/// form, which re-parses to the identical f32.
pub fn read_csv(path: &Path) -> CoreResult<(Vec<Vec<f32>>, Vec<u8>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for result in reader.records() {
        let record = result?;
        let fields = record.len();
        if fields < 2 {
            return Err(CoreError::Configuration(format!(
                "row with {fields} columns; need at least SignalValue and Label"
            )));
        }

        let mut values = Vec::with_capacity(fields - 1);
        for field in record.iter().take(fields - 1) {
            let value: f32 = field
                .parse()
                .map_err(|_| CoreError::Configuration(format!("bad value field: {field:?}")))?;
            values.push(value);
        }

        let label_field = &record[fields - 1];
        let label: u8 = label_field
            .parse()
            .map_err(|_| CoreError::Configuration(format!("bad label field: {label_field:?}")))?;
        if label > 1 {
            return Err(CoreError::Configuration(format!(
                "label {label} outside the binary 0/1 contract"
            )));
        }

        rows.push(values);
        labels.push(label);
    }

    Ok((rows, labels))
}
