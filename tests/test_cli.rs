//! Integration test: CSV-driven CLI commands end-to-end

use mlsim::cli::{cmd_evaluate, cmd_predict, cmd_train};
use mlsim::error::MlsimError;
use std::fs;

#[test]
fn test_train_predict_evaluate_via_files() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("train.csv");
    let model = dir.path().join("model.json");
    let features = dir.path().join("features.csv");
    let predictions = dir.path().join("predictions.csv");
    let actuals = dir.path().join("actuals.csv");
    let metrics = dir.path().join("metrics.json");

    // y = 2x with a header row
    fs::write(&data, "x,y\n1.0,2.0\n2.0,4.0\n3.0,6.0\n").unwrap();
    cmd_train("linear", &data, &model, 5, 2).unwrap();
    assert!(model.exists());

    fs::write(&features, "4.0\n5.0\n").unwrap();
    cmd_predict(&model, &features, &predictions).unwrap();

    let written = fs::read_to_string(&predictions).unwrap();
    let values: Vec<f64> = written.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(values.len(), 2);
    assert!((values[0] - 8.0).abs() < 1e-8);
    assert!((values[1] - 10.0).abs() < 1e-8);

    fs::write(&actuals, "8.0\n10.0\n").unwrap();
    cmd_evaluate(&predictions, &actuals, Some(&metrics)).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metrics).unwrap()).unwrap();
    assert!((report["r2"].as_f64().unwrap() - 1.0).abs() < 1e-8);
    assert!(report["mae"].as_f64().unwrap() < 1e-8);
    assert!(report["rmse"].as_f64().unwrap() < 1e-8);
}

#[test]
fn test_train_tree_respects_depth_flags() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("train.csv");
    let model_path = dir.path().join("model.json");

    fs::write(&data, "1.0,0.0\n2.0,0.0\n8.0,10.0\n9.0,10.0\n").unwrap();
    cmd_train("tree", &data, &model_path, 1, 2).unwrap();

    let model = mlsim::model::Model::load(&model_path).unwrap();
    match model {
        mlsim::model::Model::Tree { root, .. } => {
            assert_eq!(root.depth(), 1);
            assert_eq!(root.n_leaves(), 2);
        }
        _ => panic!("expected a tree model"),
    }
}

#[test]
fn test_unsupported_kind_maps_to_exit_code_2() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("train.csv");
    let model = dir.path().join("model.json");
    fs::write(&data, "1.0,2.0\n2.0,4.0\n").unwrap();

    let err = cmd_train("random_forest", &data, &model, 5, 2).unwrap_err();
    assert!(matches!(err, MlsimError::UnsupportedModelKind(_)));
    assert_eq!(err.exit_code(), 2);

    // Unknown strings are plain validation failures
    let err = cmd_train("svm", &data, &model, 5, 2).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_evaluate_length_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    let predictions = dir.path().join("predictions.csv");
    let actuals = dir.path().join("actuals.csv");
    fs::write(&predictions, "1.0\n2.0\n").unwrap();
    fs::write(&actuals, "1.0\n").unwrap();

    let err = cmd_evaluate(&predictions, &actuals, None).unwrap_err();
    assert!(matches!(err, MlsimError::LengthMismatch { .. }));
    assert_eq!(err.exit_code(), 1);
}
