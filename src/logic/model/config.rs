//! Forest Configuration
//!
//! Reproducibility parameters, not semantic requirements: any tree count
//! or seed yields a valid classifier, these defaults mirror the reference
//! training flow.

use serde::{Deserialize, Serialize};

/// Ensemble training parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Trees in the ensemble.
    pub n_trees: usize,

    /// Seed for bootstrap and feature subsampling. Tree `t` derives its
    /// RNG from `seed + t`, so fits are deterministic end to end.
    pub seed: u64,

    /// Depth cap; `None` grows every tree to purity.
    pub max_depth: Option<usize>,

    /// Minimum rows a node needs before it may split.
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

impl ForestConfig {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            n_trees,
            seed,
            ..Default::default()
        }
    }
}
