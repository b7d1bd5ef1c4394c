//! Model training
//!
//! One module per algorithm plus the dispatch engine:
//! - [`linear`] - closed-form OLS with a regularized fallback for singular systems
//! - [`decision_tree`] - CART regression tree with parallel split search
//! - [`engine`] - kind-based dispatch and dataset-level evaluation

mod engine;
pub mod decision_tree;
pub mod linear;

pub use decision_tree::{DecisionTreeTrainer, TreeConfig};
pub use engine::{evaluate_model, train_model, ModelKind};
pub use linear::{LinearRegressionTrainer, DEFAULT_SINGULAR_TOLERANCE};
