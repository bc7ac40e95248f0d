//! Held-out evaluation support.
//!
//! The reference flow scores the model on its own training data; that
//! stays the default. This split is the explicit opt-in for honest
//! generalization measurement and is never wired into `fit`.

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{CoreError, CoreResult};

pub type Corpus = (Array2<f32>, Vec<u8>);

/// Seeded shuffle split into `(train, test)` corpora.
///
/// `test_fraction` must leave at least one row on each side.
pub fn train_test_split(
    features: &Array2<f32>,
    labels: &[u8],
    test_fraction: f32,
    seed: u64,
) -> CoreResult<(Corpus, Corpus)> {
    let rows = features.nrows();
    if labels.len() != rows {
        return Err(CoreError::DimensionMismatch {
            expected: rows,
            got: labels.len(),
        });
    }
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(CoreError::Configuration(format!(
            "test_fraction {test_fraction} not in (0, 1)"
        )));
    }

    let n_test = ((rows as f64) * f64::from(test_fraction)).round() as usize;
    if n_test == 0 || n_test >= rows {
        return Err(CoreError::Configuration(format!(
            "test_fraction {test_fraction} leaves an empty side for {rows} rows"
        )));
    }

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    let pick = |idx: &[usize]| -> Corpus {
        let matrix = features.select(Axis(0), idx);
        let labels = idx.iter().map(|&i| labels[i]).collect();
        (matrix, labels)
    };

    Ok((pick(train_idx), pick(test_idx)))
}
