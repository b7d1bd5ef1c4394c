//! Trained model variants and single-record prediction

use crate::error::{MlsimError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node of a fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node holding the predicted value (mean target of its samples)
    Leaf { value: f64 },
    /// Internal node; samples with `features[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, features: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split { feature_idx, threshold, left, right } => {
                if features[*feature_idx] <= *threshold {
                    left.predict(features)
                } else {
                    right.predict(features)
                }
            }
        }
    }

    /// Depth of the subtree rooted at this node (a lone leaf has depth 0).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves in the subtree rooted at this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// A trained model, closed over the supported kinds.
///
/// Produced once by a trainer and immutable afterwards; reusable across any
/// number of predict/evaluate calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Model {
    /// OLS fit. `weights[0]` is the bias; `weights[1..]` align with features.
    Linear { weights: Array1<f64> },
    /// CART regression tree.
    Tree { root: TreeNode, n_features: usize },
}

impl Model {
    /// Feature count the model was trained with.
    pub fn n_features(&self) -> usize {
        match self {
            Model::Linear { weights } => weights.len().saturating_sub(1),
            Model::Tree { n_features, .. } => *n_features,
        }
    }

    /// Predict the target for a single feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(MlsimError::FeatureLengthMismatch {
                expected,
                actual: features.len(),
            });
        }

        match self {
            Model::Linear { weights } => {
                let mut acc = weights[0];
                for (w, x) in weights.iter().skip(1).zip(features) {
                    acc += w * x;
                }
                Ok(acc)
            }
            Model::Tree { root, .. } => Ok(root.predict(features)),
        }
    }

    /// Serialize to a JSON string. f64 values round-trip losslessly.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the model to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a model from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
