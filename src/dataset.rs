//! Immutable training dataset

use crate::error::{MlsimError, Result};
use ndarray::{Array1, Array2};

/// A single training example: a feature vector and its target value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub features: Vec<f64>,
    pub target: f64,
}

impl Record {
    pub fn new(features: Vec<f64>, target: f64) -> Self {
        Self { features, target }
    }
}

/// Immutable collection of records with a consistent feature shape.
///
/// Validation happens once at construction; afterwards the feature matrix
/// and target vector are exposed read-only.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    /// Build a dataset from records, validating shape consistency.
    pub fn from_records(records: &[Record]) -> Result<Self> {
        if records.is_empty() {
            return Err(MlsimError::EmptyDataset);
        }

        let n_features = records[0].features.len();
        if n_features == 0 {
            return Err(MlsimError::Validation(
                "records must have at least one feature".to_string(),
            ));
        }

        for record in records {
            if record.features.len() != n_features {
                return Err(MlsimError::InconsistentFeatureLength {
                    expected: n_features,
                    actual: record.features.len(),
                });
            }
        }

        let n_samples = records.len();
        let mut features = Array2::zeros((n_samples, n_features));
        let mut targets = Array1::zeros(n_samples);
        for (i, record) in records.iter().enumerate() {
            for (j, &v) in record.features.iter().enumerate() {
                features[[i, j]] = v;
            }
            targets[i] = record.target;
        }

        Ok(Self { features, targets })
    }

    /// Build a dataset directly from a feature matrix and target vector.
    pub fn from_parts(features: Array2<f64>, targets: Array1<f64>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(MlsimError::EmptyDataset);
        }
        if features.ncols() == 0 {
            return Err(MlsimError::Validation(
                "feature matrix must have at least one column".to_string(),
            ));
        }
        if features.nrows() != targets.len() {
            return Err(MlsimError::LengthMismatch {
                predictions: features.nrows(),
                actuals: targets.len(),
            });
        }
        Ok(Self { features, targets })
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let records = vec![
            Record::new(vec![1.0, 2.0], 3.0),
            Record::new(vec![4.0, 5.0], 6.0),
        ];
        let ds = Dataset::from_records(&records).unwrap();
        assert_eq!(ds.n_samples(), 2);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.features()[[1, 0]], 4.0);
        assert_eq!(ds.targets()[1], 6.0);
    }

    #[test]
    fn test_from_parts() {
        use ndarray::array;
        let ds = Dataset::from_parts(array![[1.0], [2.0]], array![3.0, 4.0]).unwrap();
        assert_eq!(ds.n_samples(), 2);
        assert_eq!(ds.n_features(), 1);

        let err = Dataset::from_parts(array![[1.0], [2.0]], array![3.0]).unwrap_err();
        assert!(matches!(err, MlsimError::LengthMismatch { .. }));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = Dataset::from_records(&[]).unwrap_err();
        assert!(matches!(err, MlsimError::EmptyDataset));
    }

    #[test]
    fn test_inconsistent_feature_length_rejected() {
        let records = vec![
            Record::new(vec![1.0, 2.0], 3.0),
            Record::new(vec![4.0], 6.0),
        ];
        let err = Dataset::from_records(&records).unwrap_err();
        assert!(matches!(
            err,
            MlsimError::InconsistentFeatureLength { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_zero_feature_records_rejected() {
        let records = vec![Record::new(vec![], 1.0)];
        let err = Dataset::from_records(&records).unwrap_err();
        assert!(matches!(err, MlsimError::Validation(_)));
    }
}
