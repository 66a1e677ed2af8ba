use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur while running the disease classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// Error occurred while splitting free text into tokens
    TokenizerError(String),
    /// Error occurred while loading or running the ONNX model
    ModelError(String),
    /// Error occurred while making predictions
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
    /// The classifier produced a label the label decoder does not know
    DecodeError(i64),
    /// A symptom vector was built against a different feature schema
    FeatureMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenizerError(msg) => write!(f, "Tokenizer error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::DecodeError(label) => write!(f, "Decode error: label {} was not seen during training", label),
            Self::FeatureMismatch { expected, actual } => write!(
                f,
                "Feature mismatch: classifier expects {} features, vector has {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::ModelError(err.to_string())
    }
}
