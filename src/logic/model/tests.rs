use ndarray::{array, Array2};

use super::config::ForestConfig;
use super::forest::RandomForest;
use super::metrics::evaluate;
use super::split::train_test_split;
use crate::error::CoreError;
use crate::logic::features::{stack_modalities, FeatureAdapter, WidthAlignAdapter};
use crate::logic::signal::{generate, GeneratorConfig, Modality};

fn toy_corpus() -> (Array2<f32>, Vec<u8>) {
    // Two well-separated clusters, 20 rows each.
    let mut flat = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        flat.extend_from_slice(&[i as f32 * 0.01, 0.5]);
        labels.push(0u8);
    }
    for i in 0..20 {
        flat.extend_from_slice(&[10.0 + i as f32 * 0.01, -0.5]);
        labels.push(1u8);
    }
    (Array2::from_shape_vec((40, 2), flat).unwrap(), labels)
}

fn training_corpus(total_count: usize) -> (Array2<f32>, Vec<u8>) {
    let adapter = WidthAlignAdapter::default();
    let config = GeneratorConfig::new(total_count, 42);
    let parts: Vec<_> = Modality::ALL
        .iter()
        .map(|m| adapter.extract(&generate(*m, &config).unwrap()).unwrap())
        .collect();
    stack_modalities(&parts).unwrap()
}

#[test]
fn test_fit_predict_separable_clusters() {
    let (features, labels) = toy_corpus();
    let forest = RandomForest::fit(&ForestConfig::new(15, 42), &features, &labels).unwrap();

    let predictions = forest.predict(&features).unwrap();
    assert_eq!(predictions, labels);
}

#[test]
fn test_training_accuracy_floor_on_union_corpus() {
    // Reference flow: train and score on the same corpus. The synthetic
    // classes are well-clustered, so the ensemble clears 0.9 comfortably.
    let (features, labels) = training_corpus(400);
    let forest = RandomForest::fit(&ForestConfig::new(15, 42), &features, &labels).unwrap();

    let predictions = forest.predict(&features).unwrap();
    let report = evaluate(&predictions, &labels).unwrap();

    assert!(
        report.accuracy > 0.9,
        "training accuracy {} below regression floor",
        report.accuracy
    );
}

#[test]
fn test_fit_is_deterministic() {
    let (features, labels) = training_corpus(100);
    let config = ForestConfig::new(5, 7);

    let a = RandomForest::fit(&config, &features, &labels).unwrap();
    let b = RandomForest::fit(&config, &features, &labels).unwrap();

    assert_eq!(a.predict(&features).unwrap(), b.predict(&features).unwrap());
}

#[test]
fn test_fit_empty_matrix_fails() {
    let features = Array2::<f32>::zeros((0, 30));
    let err = RandomForest::fit(&ForestConfig::default(), &features, &[]).unwrap_err();
    assert!(matches!(err, CoreError::EmptyTrainingSet));
}

#[test]
fn test_fit_label_count_mismatch_fails() {
    let features = Array2::<f32>::zeros((4, 30));
    let err = RandomForest::fit(&ForestConfig::default(), &features, &[0, 1]).unwrap_err();
    assert!(matches!(
        err,
        CoreError::DimensionMismatch { expected: 4, got: 2 }
    ));
}

#[test]
fn test_fit_rejects_non_binary_labels() {
    let features = Array2::<f32>::zeros((2, 3));
    let err = RandomForest::fit(&ForestConfig::default(), &features, &[0, 3]).unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_fit_rejects_zero_trees() {
    let (features, labels) = toy_corpus();
    let err = RandomForest::fit(&ForestConfig::new(0, 42), &features, &labels).unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_predict_width_mismatch_fails() {
    let (features, labels) = toy_corpus();
    let forest = RandomForest::fit(&ForestConfig::new(5, 42), &features, &labels).unwrap();

    let narrow = Array2::<f32>::zeros((3, 1));
    let err = forest.predict(&narrow).unwrap_err();
    assert!(matches!(
        err,
        CoreError::DimensionMismatch { expected: 2, got: 1 }
    ));
}

#[test]
fn test_serde_round_trip_predicts_identically() {
    let (features, labels) = toy_corpus();
    let forest = RandomForest::fit(&ForestConfig::new(10, 42), &features, &labels).unwrap();

    let json = serde_json::to_string(&forest).unwrap();
    let reloaded: RandomForest = serde_json::from_str(&json).unwrap();

    assert_eq!(reloaded.n_trees(), forest.n_trees());
    assert_eq!(reloaded.feature_count(), forest.feature_count());
    assert_eq!(
        reloaded.predict(&features).unwrap(),
        forest.predict(&features).unwrap()
    );
}

#[test]
fn test_evaluate_perfect_predictions() {
    let truth = vec![0, 0, 1, 1, 1];
    let report = evaluate(&truth, &truth).unwrap();

    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.total, 5);
    for class in &report.per_class {
        assert_eq!(class.precision, 1.0);
        assert_eq!(class.recall, 1.0);
        assert_eq!(class.f1, 1.0);
    }
    assert_eq!(report.class(0).unwrap().support, 2);
    assert_eq!(report.class(1).unwrap().support, 3);
}

#[test]
fn test_evaluate_absent_class_reports_zeros() {
    // No anomalous rows in truth and none predicted: label 1 metrics are
    // zero, never an error.
    let truth = vec![0, 0, 0];
    let report = evaluate(&truth, &truth).unwrap();

    let anomalous = report.class(1).unwrap();
    assert_eq!(anomalous.support, 0);
    assert_eq!(anomalous.precision, 0.0);
    assert_eq!(anomalous.recall, 0.0);
    assert_eq!(anomalous.f1, 0.0);
    assert_eq!(report.accuracy, 1.0);
}

#[test]
fn test_evaluate_mixed_predictions() {
    let truth = vec![0, 0, 1, 1];
    let predictions = vec![0, 1, 1, 1];
    let report = evaluate(&predictions, &truth).unwrap();

    assert_eq!(report.accuracy, 0.75);
    let anomalous = report.class(1).unwrap();
    assert!((anomalous.precision - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(anomalous.recall, 1.0);
}

#[test]
fn test_evaluate_length_mismatch_fails() {
    let err = evaluate(&[0, 1], &[0, 1, 1]).unwrap_err();
    assert!(matches!(err, CoreError::DimensionMismatch { .. }));
}

#[test]
fn test_evaluate_empty_fails() {
    let err = evaluate(&[], &[]).unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_train_test_split_partitions() {
    let (features, labels) = training_corpus(100);
    let rows = features.nrows();

    let ((train_x, train_y), (test_x, test_y)) =
        train_test_split(&features, &labels, 0.25, 42).unwrap();

    assert_eq!(train_x.nrows() + test_x.nrows(), rows);
    assert_eq!(train_x.nrows(), train_y.len());
    assert_eq!(test_x.nrows(), test_y.len());
    assert_eq!(test_x.nrows(), ((rows as f64) * 0.25).round() as usize);
}

#[test]
fn test_train_test_split_is_seeded() {
    let (features, labels) = training_corpus(100);

    let (a_train, _) = train_test_split(&features, &labels, 0.3, 9).unwrap();
    let (b_train, _) = train_test_split(&features, &labels, 0.3, 9).unwrap();
    assert_eq!(a_train.1, b_train.1);
    assert_eq!(a_train.0, b_train.0);
}

#[test]
fn test_train_test_split_rejects_bad_fraction() {
    let (features, labels) = toy_corpus();

    for fraction in [0.0, 1.0, 1.5, -0.2] {
        let err = train_test_split(&features, &labels, fraction, 42).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }
}

#[test]
fn test_held_out_evaluation_path() {
    // The honest path from the design notes: fit on the train side,
    // evaluate on the held-out side. Only the plumbing is asserted here;
    // generalization quality is not a contract.
    let (features, labels) = training_corpus(200);
    let ((train_x, train_y), (test_x, test_y)) =
        train_test_split(&features, &labels, 0.2, 42).unwrap();

    let forest = RandomForest::fit(&ForestConfig::new(10, 42), &train_x, &train_y).unwrap();
    let predictions = forest.predict(&test_x).unwrap();
    let report = evaluate(&predictions, &test_y).unwrap();

    assert_eq!(report.total, test_y.len());
    assert!(report.accuracy > 0.5);
}

#[test]
fn test_forest_handles_constant_features() {
    // All-constant corpus: no split exists, every tree degenerates to the
    // majority leaf.
    let features = Array2::<f32>::ones((10, 3));
    let labels = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

    let forest = RandomForest::fit(&ForestConfig::new(5, 42), &features, &labels).unwrap();
    let predictions = forest.predict(&features).unwrap();
    assert!(predictions.iter().all(|&p| p == 0));
}

#[test]
fn test_single_row_corpus() {
    let features = array![[1.0f32, 2.0, 3.0]];
    let forest = RandomForest::fit(&ForestConfig::new(3, 42), &features, &[1]).unwrap();
    assert_eq!(forest.predict(&features).unwrap(), vec![1]);
}
