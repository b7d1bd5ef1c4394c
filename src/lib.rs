//! mlsim - a small deterministic supervised-learning engine
//!
//! Supports ordinary-least-squares linear regression and a CART regression
//! tree, with a batch prediction pipeline and a regression-metrics evaluator.
//!
//! Pipeline: [`Dataset`](dataset::Dataset) →
//! [`train_model`](training::train_model) → [`Model`](model::Model) →
//! [`Predictor`](predict::Predictor) → [`evaluate`](evaluate::evaluate).
//!
//! # Modules
//! - [`dataset`] - immutable, shape-validated training data
//! - [`training`] - trainers and kind-based dispatch
//! - [`model`] - trained model variants, single-record prediction, persistence
//! - [`predict`] - order-preserving, atomic batch prediction
//! - [`evaluate`] - R², MAE and RMSE
//! - [`cli`] - command-line interface

pub mod error;

pub mod dataset;
pub mod evaluate;
pub mod model;
pub mod predict;
pub mod training;

pub mod cli;

pub use error::{MlsimError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::dataset::{Dataset, Record};
    pub use crate::error::{MlsimError, Result};
    pub use crate::evaluate::{evaluate, MetricsReport};
    pub use crate::model::{Model, TreeNode};
    pub use crate::predict::Predictor;
    pub use crate::training::{
        evaluate_model, train_model, DecisionTreeTrainer, LinearRegressionTrainer, ModelKind,
        TreeConfig,
    };
}
