//! Bagged decision-tree ensemble.
//!
//! CART trees (gini impurity, sqrt-feature subsampling, bootstrap row
//! sampling) combined by majority vote. Training is deterministic for a
//! fixed `ForestConfig`: tree `t` seeds its own RNG from `seed + t`.
//!
//! The fitted value is self-contained: a serde round-trip yields an
//! equivalent predictor.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use super::config::ForestConfig;

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        label: u8,
    },
}

/// One CART tree stored as a flat node arena; the root is node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn predict_row(&self, row: ArrayView1<f32>) -> u8 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { label } => return *label,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

// ============================================================================
// TREE GROWING
// ============================================================================

struct TreeBuilder<'a> {
    features: &'a Array2<f32>,
    labels: &'a [u8],
    max_depth: Option<usize>,
    min_samples_split: usize,
    m_try: usize,
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f32,
    weighted_impurity: f32,
}

fn gini(positives: usize, total: usize) -> f32 {
    let p1 = positives as f32 / total as f32;
    let p0 = 1.0 - p1;
    1.0 - p0 * p0 - p1 * p1
}

impl<'a> TreeBuilder<'a> {
    fn majority(&self, indices: &[usize]) -> u8 {
        let ones = indices.iter().filter(|&&i| self.labels[i] == 1).count();
        // Ties resolve to label 0.
        u8::from(ones * 2 > indices.len())
    }

    /// Grow the subtree for `indices`, returning its node index.
    fn grow(&mut self, indices: &[usize], depth: usize, rng: &mut StdRng) -> usize {
        let node_index = self.nodes.len();
        self.nodes.push(Node::Leaf { label: 0 });

        let positives = indices.iter().filter(|&&i| self.labels[i] == 1).count();
        let pure = positives == 0 || positives == indices.len();
        let depth_capped = self.max_depth.map_or(false, |d| depth >= d);

        if pure || depth_capped || indices.len() < self.min_samples_split {
            self.nodes[node_index] = Node::Leaf {
                label: self.majority(indices),
            };
            return node_index;
        }

        let Some(best) = self.best_split(indices, rng) else {
            // Every candidate feature was constant over these rows.
            self.nodes[node_index] = Node::Leaf {
                label: self.majority(indices),
            };
            return node_index;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.features[[i, best.feature]] <= best.threshold);

        let left = self.grow(&left_rows, depth + 1, rng);
        let right = self.grow(&right_rows, depth + 1, rng);

        self.nodes[node_index] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_index
    }

    /// Best gini split over a random `m_try`-feature subset, or `None` if
    /// no candidate feature varies across `indices`.
    fn best_split(&self, indices: &[usize], rng: &mut StdRng) -> Option<BestSplit> {
        let n = indices.len();
        let mut best: Option<BestSplit> = None;

        let candidates = rand::seq::index::sample(rng, self.features.ncols(), self.m_try);
        for feature in candidates {
            let mut pairs: Vec<(f32, u8)> = indices
                .iter()
                .map(|&i| (self.features[[i, feature]], self.labels[i]))
                .collect();
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let total_positives = pairs.iter().filter(|p| p.1 == 1).count();
            let mut left_positives = 0usize;

            for i in 1..n {
                if pairs[i - 1].1 == 1 {
                    left_positives += 1;
                }
                let (lower, upper) = (pairs[i - 1].0, pairs[i].0);
                if lower == upper {
                    continue;
                }

                let left_n = i;
                let right_n = n - i;
                let right_positives = total_positives - left_positives;
                let weighted = (left_n as f32 * gini(left_positives, left_n)
                    + right_n as f32 * gini(right_positives, right_n))
                    / n as f32;

                if best
                    .as_ref()
                    .map_or(true, |b| weighted < b.weighted_impurity)
                {
                    // Midpoint, nudged below `upper` so the partition by
                    // `value <= threshold` always leaves both sides
                    // non-empty under f32 rounding.
                    let mid = lower + (upper - lower) / 2.0;
                    let threshold = if mid >= upper { lower } else { mid };
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        weighted_impurity: weighted,
                    });
                }
            }
        }

        best
    }
}

// ============================================================================
// FOREST
// ============================================================================

/// Majority-vote ensemble of CART trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    feature_count: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit an ensemble on the (row-concatenated, modality-agnostic)
    /// training corpus.
    pub fn fit(config: &ForestConfig, features: &Array2<f32>, labels: &[u8]) -> CoreResult<Self> {
        let rows = features.nrows();
        if rows == 0 {
            return Err(CoreError::EmptyTrainingSet);
        }
        if labels.len() != rows {
            return Err(CoreError::DimensionMismatch {
                expected: rows,
                got: labels.len(),
            });
        }
        if features.ncols() == 0 {
            return Err(CoreError::Configuration(
                "feature matrix has zero columns".to_string(),
            ));
        }
        if config.n_trees == 0 {
            return Err(CoreError::Configuration(
                "n_trees must be positive".to_string(),
            ));
        }
        if let Some(bad) = labels.iter().find(|&&l| l > 1) {
            return Err(CoreError::Configuration(format!(
                "label {bad} outside the binary 0/1 contract"
            )));
        }

        let m_try = ((features.ncols() as f64).sqrt().round() as usize)
            .clamp(1, features.ncols());

        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();

                let mut builder = TreeBuilder {
                    features,
                    labels,
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split.max(2),
                    m_try,
                    nodes: Vec::new(),
                };
                builder.grow(&bootstrap, 0, &mut rng);
                DecisionTree {
                    nodes: builder.nodes,
                }
            })
            .collect();

        log::info!(
            "Trained forest: {} trees on {} x {} corpus (seed {})",
            trees.len(),
            rows,
            features.ncols(),
            config.seed
        );

        Ok(Self {
            config: config.clone(),
            feature_count: features.ncols(),
            trees,
        })
    }

    /// Score a feature matrix; width must match the fitted corpus.
    pub fn predict(&self, features: &Array2<f32>) -> CoreResult<Vec<u8>> {
        if features.ncols() != self.feature_count {
            return Err(CoreError::DimensionMismatch {
                expected: self.feature_count,
                got: features.ncols(),
            });
        }

        Ok(features
            .rows()
            .into_iter()
            .map(|row| self.predict_row(row))
            .collect())
    }

    /// Majority vote for one row.
    pub fn predict_row(&self, row: ArrayView1<f32>) -> u8 {
        let ones = self
            .trees
            .iter()
            .filter(|tree| tree.predict_row(row) == 1)
            .count();
        u8::from(ones * 2 > self.trees.len())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}
