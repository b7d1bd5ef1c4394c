//! Ordinary least squares linear regression

use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::Model;
use ndarray::{Array1, Array2};
use tracing::warn;

/// Default relative tolerance below which a Cholesky pivot is treated as
/// singular and the regularized fallback kicks in.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Solve the symmetric positive-definite system `A x = b` by Cholesky
/// decomposition. Returns `None` when a pivot falls below `tol` relative to
/// the diagonal scale, i.e. the matrix is singular or near-singular.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>, tol: f64) -> Option<Array1<f64>> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());
    debug_assert_eq!(n, b.len());

    let scale = a.diag().iter().map(|v| v.abs()).fold(0.0f64, f64::max).max(1.0);

    // A = L * L^T
    let mut l = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= tol * scale {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L y = b
    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L^T x = y
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    Some(x)
}

/// Closed-form OLS trainer.
///
/// Solves the normal equations `XᵗX w = Xᵗy` on the feature matrix augmented
/// with a constant-1 bias column. When `XᵗX` is singular (or ill-conditioned
/// beyond the configured tolerance) the trainer does not fail: it logs a
/// warning and re-solves with an escalating ridge term on the diagonal,
/// which behaves like a pseudo-inverse and never produces NaNs. Training is
/// fully deterministic.
#[derive(Debug, Clone)]
pub struct LinearRegressionTrainer {
    singular_tolerance: f64,
}

impl Default for LinearRegressionTrainer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegressionTrainer {
    pub fn new() -> Self {
        Self {
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }

    /// Set the relative tolerance for the singularity check.
    pub fn with_singular_tolerance(mut self, tol: f64) -> Self {
        self.singular_tolerance = tol;
        self
    }

    /// Fit OLS weights; `weights[0]` is the bias term.
    pub fn train(&self, dataset: &Dataset) -> Result<Model> {
        let n_samples = dataset.n_samples();
        let n_features = dataset.n_features();

        // Augment with a constant-1 column for the bias
        let mut x_aug = Array2::ones((n_samples, n_features + 1));
        for i in 0..n_samples {
            for j in 0..n_features {
                x_aug[[i, j + 1]] = dataset.features()[[i, j]];
            }
        }

        let xtx = x_aug.t().dot(&x_aug);
        let xty = x_aug.t().dot(dataset.targets());

        let weights = match cholesky_solve(&xtx, &xty, self.singular_tolerance) {
            Some(w) => w,
            None => {
                warn!(
                    tolerance = self.singular_tolerance,
                    "normal-equation matrix is singular, falling back to regularized least squares"
                );
                self.solve_regularized(&xtx, &xty)
            }
        };

        Ok(Model::Linear { weights })
    }

    /// Ridge-regularized solve for singular `XᵗX`. The diagonal shift starts
    /// tiny and escalates until the system becomes positive definite, which
    /// is guaranteed for a PSD matrix.
    fn solve_regularized(&self, xtx: &Array2<f64>, xty: &Array1<f64>) -> Array1<f64> {
        let n = xtx.nrows();
        let trace_avg = xtx.diag().iter().map(|v| v.abs()).sum::<f64>() / n as f64;
        let base = trace_avg.max(1.0);

        let mut ridge = 1e-8 * base;
        loop {
            let mut regularized = xtx.clone();
            for i in 0..n {
                regularized[[i, i]] += ridge;
            }
            if let Some(w) = cholesky_solve(&regularized, xty, self.singular_tolerance) {
                return w;
            }
            ridge *= 10.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn dataset(rows: &[(&[f64], f64)]) -> Dataset {
        let records: Vec<Record> = rows
            .iter()
            .map(|(f, t)| Record::new(f.to_vec(), *t))
            .collect();
        Dataset::from_records(&records).unwrap()
    }

    #[test]
    fn test_perfect_line() {
        // y = 2x, so weights should be ~[0, 2]
        let ds = dataset(&[(&[1.0], 2.0), (&[2.0], 4.0), (&[3.0], 6.0)]);
        let model = LinearRegressionTrainer::new().train(&ds).unwrap();

        match &model {
            Model::Linear { weights } => {
                assert!(weights[0].abs() < 1e-8, "bias = {}", weights[0]);
                assert!((weights[1] - 2.0).abs() < 1e-8, "slope = {}", weights[1]);
            }
            _ => unreachable!(),
        }
        assert!((model.predict(&[4.0]).unwrap() - 8.0).abs() < 1e-8);
    }

    #[test]
    fn test_residual_mean_near_zero() {
        // OLS residuals sum to zero when a bias term is fitted
        let ds = dataset(&[
            (&[1.0, 2.0], 5.3),
            (&[2.0, 1.0], 4.1),
            (&[3.0, 3.0], 9.9),
            (&[4.0, 0.5], 6.2),
            (&[5.0, 2.5], 11.0),
        ]);
        let model = LinearRegressionTrainer::new().train(&ds).unwrap();

        let mut residual_sum = 0.0;
        for i in 0..ds.n_samples() {
            let row: Vec<f64> = ds.features().row(i).to_vec();
            residual_sum += ds.targets()[i] - model.predict(&row).unwrap();
        }
        assert!(
            (residual_sum / ds.n_samples() as f64).abs() < 1e-8,
            "mean residual = {}",
            residual_sum / ds.n_samples() as f64
        );
    }

    #[test]
    fn test_singular_matrix_falls_back_without_nans() {
        // Duplicated column makes XᵗX singular
        let ds = dataset(&[
            (&[1.0, 1.0], 2.0),
            (&[2.0, 2.0], 4.0),
            (&[3.0, 3.0], 6.0),
            (&[4.0, 4.0], 8.0),
        ]);
        let model = LinearRegressionTrainer::new().train(&ds).unwrap();

        let pred = model.predict(&[5.0, 5.0]).unwrap();
        assert!(pred.is_finite());
        assert!((pred - 10.0).abs() < 1e-2, "pred = {}", pred);
    }

    #[test]
    fn test_deterministic() {
        let ds = dataset(&[(&[1.0], 1.5), (&[2.0], 3.1), (&[3.0], 4.4)]);
        let trainer = LinearRegressionTrainer::new();
        let a = trainer.train(&ds).unwrap();
        let b = trainer.train(&ds).unwrap();
        assert_eq!(
            a.predict(&[7.0]).unwrap().to_bits(),
            b.predict(&[7.0]).unwrap().to_bits()
        );
    }
}
