mod common;

use std::fs;
use std::path::Path;

use common::{init, model_dir};
use ndarray::{arr1, arr2};
use symptom_check::{ArtifactError, ArtifactStore, ClassifierError, DiseaseClassifier, OnnxClassifier, RuntimeConfig};

/// Three features (fever, cough, fatigue), three classes; fever+cough -> 2.
/// Emits a float `scores` output ahead of the int64 `label` output.
const FLU_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/flu_model.onnx");

#[test]
fn test_feature_names_read_from_metadata() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = OnnxClassifier::from_file(Path::new(FLU_MODEL), &RuntimeConfig::default())?;

    assert_eq!(classifier.feature_names(), &["fever", "cough", "fatigue"]);
    assert_eq!(classifier.feature_count(), 3);
    Ok(())
}

#[test]
fn test_onnx_prediction() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = OnnxClassifier::from_file(Path::new(FLU_MODEL), &RuntimeConfig::default())?;

    assert_eq!(classifier.predict_one(arr1(&[1.0f32, 1.0, 0.0]).view())?, 2);
    assert_eq!(classifier.predict_one(arr1(&[0.0f32, 0.0, 1.0]).view())?, 0);

    let batch = arr2(&[[1.0f32, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]]);
    assert_eq!(classifier.predict_batch(batch.view())?, vec![2, 0, 0]);
    Ok(())
}

#[test]
fn test_onnx_row_length_checked() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = OnnxClassifier::from_file(Path::new(FLU_MODEL), &RuntimeConfig::default())?;

    let result = classifier.predict_one(arr1(&[1.0f32, 1.0]).view());
    assert!(matches!(result, Err(ClassifierError::FeatureMismatch { expected: 3, actual: 2 })));
    Ok(())
}

#[test]
fn test_store_loads_onnx_classifier() {
    init();
    let dir = model_dir();
    fs::copy(FLU_MODEL, dir.path().join("health_model.onnx")).unwrap();

    let config = RuntimeConfig::default().with_intra_threads(1);
    let store = ArtifactStore::builder()
        .with_model_dir(dir.path())
        .with_runtime_config(config)
        .build()
        .expect("Failed to load ONNX artifacts");

    assert_eq!(store.feature_schema().names(), &["fever", "cough", "fatigue"]);
    let vector = store.encoder().encode(["fever", "cough"]);
    assert_eq!(store.classifier_predict(&vector).unwrap(), 2);
    assert_eq!(store.decode_label(2).unwrap(), "Flu");
}

#[test]
fn test_corrupt_onnx_is_fatal() {
    init();
    for contents in [&b""[..], &b"not an onnx model"[..]] {
        let dir = model_dir();
        let path = dir.path().join("health_model.onnx");
        fs::write(&path, contents).unwrap();

        match ArtifactStore::load_dir(dir.path()) {
            Err(ArtifactError::Classifier { path: reported, source: ClassifierError::ModelError(_) }) => {
                assert_eq!(reported, path);
            }
            other => panic!("Expected a classifier load error, got {:?}", other),
        }
    }
}
