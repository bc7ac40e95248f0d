//! Evaluation metrics.
//!
//! Accuracy plus per-label precision/recall/F1 over the binary contract.
//! A label absent from a run reports zeros rather than raising: partial
//! runs are valid, undefined ratios are not errors.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Metrics for one label value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: u8,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Ground-truth rows carrying this label.
    pub support: usize,
}

/// Aggregate evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f32,
    pub per_class: Vec<ClassMetrics>,
    pub total: usize,
}

impl EvaluationReport {
    pub fn class(&self, label: u8) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|c| c.label == label)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

/// Compare predictions against ground truth.
pub fn evaluate(predictions: &[u8], truth: &[u8]) -> CoreResult<EvaluationReport> {
    if predictions.len() != truth.len() {
        return Err(CoreError::DimensionMismatch {
            expected: truth.len(),
            got: predictions.len(),
        });
    }
    if truth.is_empty() {
        return Err(CoreError::Configuration(
            "cannot evaluate zero predictions".to_string(),
        ));
    }

    let total = truth.len();
    let correct = predictions
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();

    let per_class = [0u8, 1u8]
        .into_iter()
        .map(|label| {
            let tp = predictions
                .iter()
                .zip(truth.iter())
                .filter(|(&p, &t)| p == label && t == label)
                .count();
            let predicted = predictions.iter().filter(|&&p| p == label).count();
            let support = truth.iter().filter(|&&t| t == label).count();

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };

            ClassMetrics {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    Ok(EvaluationReport {
        accuracy: ratio(correct, total),
        per_class,
        total,
    })
}
