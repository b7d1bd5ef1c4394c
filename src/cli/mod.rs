//! Command-line interface
//!
//! Three subcommands mirroring the library pipeline: `train`, `predict`,
//! `evaluate`. CSV files are plain numeric; a header row is detected and
//! skipped when the first row does not parse as floats.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::{Dataset, Record};
use crate::error::{MlsimError, Result};
use crate::evaluate::evaluate;
use crate::model::Model;
use crate::predict::Predictor;
use crate::training::{train_model, ModelKind, TreeConfig};

#[derive(Parser)]
#[command(name = "mlsim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deterministic supervised-learning engine: train, predict, evaluate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train a model on a CSV file (last column is the target)
    Train {
        /// Model kind: linear or tree
        #[arg(short, long)]
        model: String,

        /// Training data CSV
        #[arg(short, long)]
        data: PathBuf,

        /// Output model JSON file
        #[arg(short, long)]
        out: PathBuf,

        /// Maximum tree depth (tree models only)
        #[arg(long, default_value_t = 5)]
        max_depth: usize,

        /// Minimum samples required to split a node (tree models only)
        #[arg(long, default_value_t = 2)]
        min_samples_split: usize,
    },

    /// Predict targets for a CSV of feature rows
    Predict {
        /// Trained model JSON file
        #[arg(short, long)]
        model: PathBuf,

        /// Input features CSV (all columns are features)
        #[arg(short, long)]
        data: PathBuf,

        /// Output predictions CSV (one value per row)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Score predictions against ground truth
    Evaluate {
        /// Predictions CSV (one value per row)
        #[arg(short, long)]
        predictions: PathBuf,

        /// Actuals CSV (one value per row)
        #[arg(short, long)]
        actuals: PathBuf,

        /// Optional metrics JSON output; metrics always print to stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Read a numeric CSV into rows of floats. If the first row contains any
/// field that does not parse as a float it is treated as a header and
/// skipped; every later parse failure is an error.
fn read_numeric_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| MlsimError::Data(format!("{}: {e}", path.display())))?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| MlsimError::Data(format!("{}: {e}", path.display())))?;
        let parsed: std::result::Result<Vec<f64>, _> =
            record.iter().map(|field| field.parse::<f64>()).collect();
        match parsed {
            Ok(row) => rows.push(row),
            Err(_) if line == 0 => continue, // header row
            Err(_) => {
                return Err(MlsimError::Data(format!(
                    "{}: non-numeric value on line {}",
                    path.display(),
                    line + 1
                )));
            }
        }
    }

    if rows.is_empty() {
        return Err(MlsimError::Data(format!(
            "{}: no data rows",
            path.display()
        )));
    }
    Ok(rows)
}

/// Read a single-column CSV as a flat vector.
fn read_column_csv(path: &Path) -> Result<Vec<f64>> {
    let rows = read_numeric_csv(path)?;
    rows.into_iter()
        .map(|row| match row.as_slice() {
            [value] => Ok(*value),
            _ => Err(MlsimError::Data(format!(
                "{}: expected exactly one column, got {}",
                path.display(),
                row.len()
            ))),
        })
        .collect()
}

/// Build a training dataset from CSV rows: last column is the target.
fn dataset_from_rows(rows: Vec<Vec<f64>>) -> Result<Dataset> {
    let records: Vec<Record> = rows
        .into_iter()
        .map(|mut row| {
            let target = row.pop().ok_or_else(|| {
                MlsimError::Data("training rows must have at least two columns".to_string())
            })?;
            if row.is_empty() {
                return Err(MlsimError::Data(
                    "training rows must have at least two columns".to_string(),
                ));
            }
            Ok(Record::new(row, target))
        })
        .collect::<Result<_>>()?;
    Dataset::from_records(&records)
}

pub fn cmd_train(
    model: &str,
    data: &Path,
    out: &Path,
    max_depth: usize,
    min_samples_split: usize,
) -> Result<()> {
    let kind: ModelKind = model.parse()?;
    let dataset = dataset_from_rows(read_numeric_csv(data)?)?;
    let tree_config = TreeConfig {
        max_depth,
        min_samples_split,
    };

    let trained = train_model(&dataset, kind, tree_config)?;
    trained.save(out)?;
    info!(path = %out.display(), "model saved");
    println!("trained {kind} model on {} samples -> {}", dataset.n_samples(), out.display());
    Ok(())
}

pub fn cmd_predict(model: &Path, data: &Path, out: &Path) -> Result<()> {
    let model = Model::load(model)?;
    let inputs = read_numeric_csv(data)?;
    let predictions = Predictor::new().predict_batch(&model, &inputs)?;

    let mut file = std::fs::File::create(out)?;
    for p in &predictions {
        writeln!(file, "{p}")?;
    }
    info!(rows = predictions.len(), path = %out.display(), "predictions written");
    println!("wrote {} predictions -> {}", predictions.len(), out.display());
    Ok(())
}

pub fn cmd_evaluate(predictions: &Path, actuals: &Path, out: Option<&Path>) -> Result<()> {
    let predictions = read_column_csv(predictions)?;
    let actuals = read_column_csv(actuals)?;
    let report = evaluate(&predictions, &actuals)?;

    for (name, value) in report.as_map() {
        println!("{name}: {value}");
    }
    if let Some(path) = out {
        std::fs::write(path, serde_json::to_string_pretty(&report.as_map())?)?;
        info!(path = %path.display(), "metrics written");
    }
    Ok(())
}
