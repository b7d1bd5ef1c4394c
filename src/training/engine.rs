//! Training dispatch over the supported model kinds

use crate::dataset::Dataset;
use crate::error::{MlsimError, Result};
use crate::evaluate::{evaluate, MetricsReport};
use crate::model::Model;
use crate::predict::Predictor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

use super::decision_tree::{DecisionTreeTrainer, TreeConfig};
use super::linear::LinearRegressionTrainer;

/// The model kinds the engine knows about. `NeuralNetwork` and
/// `RandomForest` are declared for forward compatibility only; requesting
/// them fails with [`MlsimError::UnsupportedModelKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    LinearRegression,
    DecisionTree,
    NeuralNetwork,
    RandomForest,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::LinearRegression => "linear",
            ModelKind::DecisionTree => "tree",
            ModelKind::NeuralNetwork => "neural_network",
            ModelKind::RandomForest => "random_forest",
        };
        f.write_str(name)
    }
}

impl FromStr for ModelKind {
    type Err = MlsimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "linear_regression" => Ok(ModelKind::LinearRegression),
            "tree" | "decision_tree" => Ok(ModelKind::DecisionTree),
            "neural_network" => Ok(ModelKind::NeuralNetwork),
            "random_forest" => Ok(ModelKind::RandomForest),
            other => Err(MlsimError::Validation(format!(
                "unknown model kind '{other}' (expected linear, tree, neural_network or random_forest)"
            ))),
        }
    }
}

/// Train a model of the requested kind on a dataset.
pub fn train_model(dataset: &Dataset, kind: ModelKind, tree_config: TreeConfig) -> Result<Model> {
    let start = Instant::now();

    let model = match kind {
        ModelKind::LinearRegression => LinearRegressionTrainer::new().train(dataset)?,
        ModelKind::DecisionTree => DecisionTreeTrainer::with_config(tree_config).train(dataset)?,
        ModelKind::NeuralNetwork | ModelKind::RandomForest => {
            return Err(MlsimError::UnsupportedModelKind(kind));
        }
    };

    info!(
        kind = %kind,
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "model trained"
    );

    Ok(model)
}

/// Predict over a dataset's records and score the result against its targets.
pub fn evaluate_model(model: &Model, dataset: &Dataset) -> Result<MetricsReport> {
    let inputs: Vec<Vec<f64>> = (0..dataset.n_samples())
        .map(|i| dataset.features().row(i).to_vec())
        .collect();
    let predictions = Predictor::new().predict_batch(model, &inputs)?;
    let actuals: Vec<f64> = dataset.targets().to_vec();
    evaluate(&predictions, &actuals)
}
