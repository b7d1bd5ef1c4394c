//! Regression metrics

use crate::error::{MlsimError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Regression-quality metrics for a prediction run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Coefficient of determination
    pub r2: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
}

impl MetricsReport {
    /// Metric-name to value mapping with keys `r2`, `mae`, `rmse`.
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("r2".to_string(), self.r2),
            ("mae".to_string(), self.mae),
            ("rmse".to_string(), self.rmse),
        ])
    }
}

/// Score predictions against ground truth.
///
/// When all actuals are identical SS_tot is zero and R² is undefined; the
/// policy here is R² = 1.0 for a perfect fit (SS_res = 0) and 0.0 otherwise.
pub fn evaluate(predictions: &[f64], actuals: &[f64]) -> Result<MetricsReport> {
    if predictions.len() != actuals.len() {
        return Err(MlsimError::LengthMismatch {
            predictions: predictions.len(),
            actuals: actuals.len(),
        });
    }
    if predictions.is_empty() {
        return Err(MlsimError::EmptyInput);
    }

    let n = predictions.len() as f64;

    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    for (p, a) in predictions.iter().zip(actuals) {
        let err = p - a;
        abs_sum += err.abs();
        sq_sum += err * err;
    }
    let mae = abs_sum / n;
    let rmse = (sq_sum / n).sqrt();

    let mean_actual = actuals.iter().sum::<f64>() / n;
    let ss_tot: f64 = actuals.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let ss_res = sq_sum;

    let r2 = if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(MetricsReport { r2, mae, rmse })
}
