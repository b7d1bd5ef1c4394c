//! Batch prediction pipeline

use crate::error::{MlsimError, Result};
use crate::model::Model;
use rayon::prelude::*;

/// Applies a model to a batch of inputs, preserving input order.
///
/// Validation is atomic: every row is shape-checked before any prediction
/// runs, so a malformed row fails the whole batch with no partial output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor;

impl Predictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict_batch(&self, model: &Model, inputs: &[Vec<f64>]) -> Result<Vec<f64>> {
        let expected = model.n_features();
        for row in inputs {
            if row.len() != expected {
                return Err(MlsimError::FeatureLengthMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }

        // Rows are independent; par_iter keeps positional order in collect
        inputs
            .par_iter()
            .map(|row| model.predict(row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn linear_model() -> Model {
        Model::Linear { weights: array![1.0, 2.0] }
    }

    #[test]
    fn test_batch_preserves_order() {
        let model = linear_model();
        let inputs = vec![vec![0.0], vec![1.0], vec![2.0]];
        let preds = Predictor::new().predict_batch(&model, &inputs).unwrap();
        assert_eq!(preds, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_empty_batch_is_empty() {
        let preds = Predictor::new().predict_batch(&linear_model(), &[]).unwrap();
        assert!(preds.is_empty());
    }

    #[test]
    fn test_malformed_row_fails_whole_batch() {
        let inputs = vec![vec![1.0], vec![1.0, 2.0], vec![3.0]];
        let err = Predictor::new()
            .predict_batch(&linear_model(), &inputs)
            .unwrap_err();
        assert!(matches!(
            err,
            MlsimError::FeatureLengthMismatch { expected: 1, actual: 2 }
        ));
    }
}
