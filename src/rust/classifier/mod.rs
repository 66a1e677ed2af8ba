use std::path::Path;

mod error;
mod label_decoder;
mod linear;
mod model;
mod onnx;
mod utils;

pub use error::ClassifierError;
pub use label_decoder::LabelDecoder;
pub use linear::{LinearClassifier, LinearModelFile};
pub use model::DiseaseClassifier;
pub use onnx::{OnnxClassifier, FEATURE_NAMES_KEY};

use crate::runtime::RuntimeConfig;

/// Export formats a classifier artifact can come in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierFormat {
    /// ONNX graph run through ONNX Runtime
    Onnx,
    /// Linear model coefficients as JSON
    LinearJson,
}

impl ClassifierFormat {
    /// Detects the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "onnx" => Some(Self::Onnx),
            "json" => Some(Self::LinearJson),
            _ => None,
        }
    }
}

/// Loads a classifier, picking the backend from the file extension.
pub fn load_classifier(
    path: &Path,
    runtime_config: &RuntimeConfig,
) -> Result<Box<dyn DiseaseClassifier>, ClassifierError> {
    match ClassifierFormat::from_path(path) {
        Some(ClassifierFormat::Onnx) => Ok(Box::new(OnnxClassifier::from_file(path, runtime_config)?)),
        Some(ClassifierFormat::LinearJson) => Ok(Box::new(LinearClassifier::from_file(path)?)),
        None => Err(ClassifierError::ModelError(format!(
            "Unsupported classifier format: {} (expected .onnx or .json)",
            path.display()
        ))),
    }
}
