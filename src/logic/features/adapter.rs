use ndarray::{concatenate, Array2, Axis};

use crate::error::{CoreError, CoreResult};
use crate::logic::signal::{SignalDataset, CSI_SUBCARRIERS};

// ============================================================================
// ADAPTER SEAM
// ============================================================================

/// External preprocessing boundary.
///
/// Implementations turn raw per-modality samples into `(features, labels)`
/// where rows align 1:1 with dataset rows and the column count is the same
/// for every modality handed to the same training run.
pub trait FeatureAdapter {
    fn extract(&self, dataset: &SignalDataset) -> CoreResult<(Array2<f32>, Vec<u8>)>;
}

// ============================================================================
// REFERENCE ADAPTER
// ============================================================================

/// Reference harmonization: zero-pad scalar modalities up to a common
/// width, truncate anything wider. Real deployments substitute their own
/// preprocessing behind the same trait.
#[derive(Debug, Clone)]
pub struct WidthAlignAdapter {
    width: usize,
}

impl WidthAlignAdapter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for WidthAlignAdapter {
    fn default() -> Self {
        Self::new(CSI_SUBCARRIERS)
    }
}

impl FeatureAdapter for WidthAlignAdapter {
    fn extract(&self, dataset: &SignalDataset) -> CoreResult<(Array2<f32>, Vec<u8>)> {
        let rows = dataset.len();
        let mut flat = Vec::with_capacity(rows * self.width);
        let mut labels = Vec::with_capacity(rows);

        for sample in &dataset.samples {
            let mut row = vec![0.0f32; self.width];
            for (slot, value) in row.iter_mut().zip(sample.values.iter()) {
                *slot = *value;
            }
            flat.extend_from_slice(&row);
            labels.push(sample.label);
        }

        let matrix = Array2::from_shape_vec((rows, self.width), flat)
            .map_err(|e| CoreError::Configuration(format!("feature matrix shape: {e}")))?;

        Ok((matrix, labels))
    }
}

// ============================================================================
// TRAINING CORPUS
// ============================================================================

/// Row-concatenate per-modality corpora into one training corpus.
///
/// The classifier is modality-agnostic, so every part must share one
/// column width and carry one label per row.
pub fn stack_modalities(parts: &[(Array2<f32>, Vec<u8>)]) -> CoreResult<(Array2<f32>, Vec<u8>)> {
    let Some((first, _)) = parts.first() else {
        return Err(CoreError::EmptyTrainingSet);
    };
    let width = first.ncols();

    for (matrix, labels) in parts {
        if matrix.ncols() != width {
            return Err(CoreError::DimensionMismatch {
                expected: width,
                got: matrix.ncols(),
            });
        }
        if matrix.nrows() != labels.len() {
            return Err(CoreError::DimensionMismatch {
                expected: matrix.nrows(),
                got: labels.len(),
            });
        }
    }

    let views: Vec<_> = parts.iter().map(|(m, _)| m.view()).collect();
    let matrix = concatenate(Axis(0), &views)
        .map_err(|e| CoreError::Configuration(format!("corpus concatenation: {e}")))?;
    let labels: Vec<u8> = parts.iter().flat_map(|(_, l)| l.iter().copied()).collect();

    log::debug!(
        "Stacked {} modality corpora into {} x {} training corpus",
        parts.len(),
        matrix.nrows(),
        matrix.ncols()
    );

    Ok((matrix, labels))
}
