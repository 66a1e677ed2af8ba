#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::ArrayView2;
use symptom_check::{ClassifierError, DiseaseClassifier};
use tempfile::TempDir;

pub const LINEAR_MODEL: &str = r#"{
    "feature_names": ["fever", "cough", "fatigue", "headache", "vomiting"],
    "classes": [0, 1, 2, 3],
    "coef": [
        [0.0, 0.0, 1.0, 0.0, 0.0],
        [0.5, 0.0, 0.0, 0.0, 0.0],
        [1.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 1.0]
    ],
    "intercept": [0.1, 0.0, 0.0, 0.0]
}"#;

pub const LABEL_ENCODER: &str = r#"{"classes": ["Anemia", "Common Cold", "Flu", "Migraine"]}"#;

pub const DESCRIPTIONS: &str = "disease,description\n\
\"Flu\",\"Viral infection causing fever and cough.\"\n\
Anemia,\"Low red blood cell count, causing tiredness.\"\n\
migraine,Recurring severe headaches.\n";

pub const PRECAUTIONS: &str = "disease,precaution\n\
Flu,\"Rest, drink fluids, see a doctor if it persists\"\n\
Anemia,Eat iron-rich food\n";

pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// Writes a complete model directory and returns it
pub fn model_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_artifacts(dir.path());
    dir
}

pub fn write_artifacts(dir: &Path) {
    fs::write(dir.join("health_model.json"), LINEAR_MODEL).unwrap();
    fs::write(dir.join("label_encoder.json"), LABEL_ENCODER).unwrap();
    fs::write(dir.join("symptom_description.csv"), DESCRIPTIONS).unwrap();
    fs::write(dir.join("precaution.csv"), PRECAUTIONS).unwrap();
}

/// A classifier that always answers the same label and counts its calls
#[derive(Debug)]
pub struct CountingClassifier {
    pub feature_names: Vec<String>,
    pub label: i64,
    pub calls: Arc<AtomicUsize>,
}

impl CountingClassifier {
    pub fn new(features: &[&str], label: i64) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = Self {
            feature_names: features.iter().map(|s| s.to_string()).collect(),
            label,
            calls: Arc::clone(&calls),
        };
        (classifier, calls)
    }
}

impl DiseaseClassifier for CountingClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_batch(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![self.label; batch.nrows()])
    }
}
