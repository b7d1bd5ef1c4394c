//! CART regression tree

use crate::dataset::Dataset;
use crate::error::{MlsimError, Result};
use crate::model::{Model, TreeNode};
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Tree growth limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum tree depth (a lone leaf has depth 0)
    pub max_depth: usize,
    /// Minimum samples a node needs to be considered for splitting
    pub min_samples_split: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            min_samples_split: 2,
        }
    }
}

/// Candidate split for one node, ordered for deterministic selection.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature_idx: usize,
    threshold: f64,
    total_sse: f64,
}

impl SplitCandidate {
    /// True when `self` should be preferred over `other`: lower SSE wins,
    /// ties break to the lower feature index, then the lower threshold.
    /// This ordering makes the chosen split independent of search order.
    fn beats(&self, other: &SplitCandidate) -> bool {
        if self.total_sse != other.total_sse {
            return self.total_sse < other.total_sse;
        }
        if self.feature_idx != other.feature_idx {
            return self.feature_idx < other.feature_idx;
        }
        self.threshold < other.threshold
    }
}

/// Greedy recursive CART trainer minimizing the summed squared error of the
/// two partitions produced by each candidate split. Candidate thresholds are
/// the midpoints between consecutive distinct sorted values of a feature
/// within the node. The per-feature scan fans out over rayon; the merge uses
/// the [`SplitCandidate::beats`] ordering so the result does not depend on
/// execution order.
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeTrainer {
    config: TreeConfig,
}

impl DecisionTreeTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self { config }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.config.min_samples_split = min_samples;
        self
    }

    pub fn train(&self, dataset: &Dataset) -> Result<Model> {
        if self.config.min_samples_split < 2 {
            return Err(MlsimError::Validation(
                "min_samples_split must be at least 2".to_string(),
            ));
        }

        let indices: Vec<usize> = (0..dataset.n_samples()).collect();
        let root = self.build_node(dataset.features(), dataset.targets(), &indices, 0);

        Ok(Model::Tree {
            root,
            n_features: dataset.n_features(),
        })
    }

    fn build_node(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        depth: usize,
    ) -> TreeNode {
        let leaf = || TreeNode::Leaf {
            value: mean(y, indices),
        };

        // All-identical targets terminate immediately regardless of depth
        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || targets_identical(y, indices)
        {
            return leaf();
        }

        let parent_sse = sse(y, indices);
        let best = self.find_best_split(x, y, indices);

        match best {
            // Require strict improvement; a split that leaves the SSE
            // unchanged is no split at all
            Some(split) if split.total_sse < parent_sse => {
                let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| x[[i, split.feature_idx]] <= split.threshold);

                let left = Box::new(self.build_node(x, y, &left_indices, depth + 1));
                let right = Box::new(self.build_node(x, y, &right_indices, depth + 1));

                TreeNode::Split {
                    feature_idx: split.feature_idx,
                    threshold: split.threshold,
                    left,
                    right,
                }
            }
            _ => leaf(),
        }
    }

    /// Scan every feature in parallel; each feature reports its best
    /// candidate, then the candidates are merged deterministically.
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
    ) -> Option<SplitCandidate> {
        let n_features = x.ncols();

        (0..n_features)
            .into_par_iter()
            .filter_map(|feature_idx| best_split_for_feature(x, y, indices, feature_idx))
            .collect::<Vec<_>>()
            .into_iter()
            .fold(None, |best: Option<SplitCandidate>, candidate| match best {
                Some(b) if b.beats(&candidate) => Some(b),
                _ => Some(candidate),
            })
    }
}

/// Best candidate along a single feature, or `None` when the feature is
/// constant within the node.
///
/// Samples are sorted by feature value once, then every midpoint threshold is
/// scored in O(1) from prefix sums: SSE = Σy² − (Σy)²/n per side.
fn best_split_for_feature(
    x: &Array2<f64>,
    y: &Array1<f64>,
    indices: &[usize],
    feature_idx: usize,
) -> Option<SplitCandidate> {
    let n = indices.len();

    let mut order: Vec<usize> = indices.to_vec();
    order.sort_by(|&a, &b| {
        x[[a, feature_idx]]
            .partial_cmp(&x[[b, feature_idx]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut prefix_sum = vec![0.0; n + 1];
    let mut prefix_sq = vec![0.0; n + 1];
    for (pos, &i) in order.iter().enumerate() {
        prefix_sum[pos + 1] = prefix_sum[pos] + y[i];
        prefix_sq[pos + 1] = prefix_sq[pos] + y[i] * y[i];
    }
    let total_sum = prefix_sum[n];
    let total_sq = prefix_sq[n];

    let mut best: Option<SplitCandidate> = None;

    for pos in 1..n {
        let prev = x[[order[pos - 1], feature_idx]];
        let curr = x[[order[pos], feature_idx]];
        if prev == curr {
            continue;
        }
        let threshold = (prev + curr) / 2.0;

        let left_n = pos as f64;
        let right_n = (n - pos) as f64;
        let left_sum = prefix_sum[pos];
        let right_sum = total_sum - left_sum;

        let left_sse = prefix_sq[pos] - left_sum * left_sum / left_n;
        let right_sse = (total_sq - prefix_sq[pos]) - right_sum * right_sum / right_n;

        let candidate = SplitCandidate {
            feature_idx,
            threshold,
            total_sse: left_sse + right_sse,
        };
        match best {
            Some(b) if b.beats(&candidate) => {}
            _ => best = Some(candidate),
        }
    }

    best
}

fn mean(y: &Array1<f64>, indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64
}

fn sse(y: &Array1<f64>, indices: &[usize]) -> f64 {
    let m = mean(y, indices);
    indices.iter().map(|&i| (y[i] - m).powi(2)).sum()
}

fn targets_identical(y: &Array1<f64>, indices: &[usize]) -> bool {
    let first = y[indices[0]];
    indices.iter().all(|&i| y[i] == first)
}
