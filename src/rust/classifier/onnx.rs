use std::collections::HashMap;
use std::path::Path;
use ndarray::ArrayView2;
use ort::session::Session;
use ort::value::Tensor;
use log::{debug, info};

use super::error::ClassifierError;
use super::model::DiseaseClassifier;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Metadata key under which the exported model stores its ordered feature names
/// as a JSON string array.
pub const FEATURE_NAMES_KEY: &str = "feature_names";

const LABEL_OUTPUT_NAMES: [&str; 2] = ["label", "output_label"];

/// A classifier backed by an ONNX export of the fitted model.
///
/// The model is expected to:
/// - Accept one float input of shape `[batch_size, feature_count]`
/// - Produce an int64 label output, named `label` or `output_label` (the first
///   output is used when neither name is present)
/// - Carry its feature names in the `feature_names` custom metadata property
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Session,
    feature_names: Vec<String>,
    input_name: String,
    label_output: String,
}

impl OnnxClassifier {
    /// Loads an ONNX classifier from disk.
    ///
    /// # Errors
    /// - `ModelError` if the runtime cannot load the file
    /// - `ModelError` if the model has no inputs or outputs
    /// - `ModelError` if the feature names are missing or not a JSON string array
    pub fn from_file(path: &Path, config: &RuntimeConfig) -> Result<Self, ClassifierError> {
        let session = create_session_builder(config)?
            .commit_from_file(path)?;

        Self::validate_model(&session)?;
        info!("Classifier model structure validated successfully");

        let feature_names = Self::read_feature_names(&session)?;
        let input_name = session.inputs[0].name.clone();
        let label_output = session.outputs.iter()
            .map(|o| o.name.as_str())
            .find(|name| LABEL_OUTPUT_NAMES.contains(name))
            .unwrap_or(session.outputs[0].name.as_str())
            .to_string();
        debug!("Classifier input '{}', label output '{}'", input_name, label_output);

        Ok(Self {
            session,
            feature_names,
            input_name,
            label_output,
        })
    }

    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.len() != 1 {
            return Err(ClassifierError::ModelError(
                format!("Model must have exactly 1 input (the symptom matrix), found {}", session.inputs.len())
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for labels".to_string()
            ));
        }
        Ok(())
    }

    fn read_feature_names(session: &Session) -> Result<Vec<String>, ClassifierError> {
        let metadata = session.metadata()?;
        let raw = metadata.custom(FEATURE_NAMES_KEY)?
            .ok_or_else(|| ClassifierError::ModelError(
                format!("Model metadata has no '{}' property", FEATURE_NAMES_KEY)
            ))?;
        serde_json::from_str(&raw).map_err(|e| ClassifierError::ModelError(
            format!("Model metadata '{}' is not a JSON string array: {}", FEATURE_NAMES_KEY, e)
        ))
    }
}

impl DiseaseClassifier for OnnxClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_batch(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        let rows = batch.nrows();
        let input = Tensor::from_array(batch.to_owned())
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), input);

        let outputs = self.session.run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let labels = outputs[self.label_output.as_str()].try_extract_tensor::<i64>()
            .map_err(|e| ClassifierError::PredictionError(format!("Failed to extract label tensor: {}", e)))?;

        let labels: Vec<i64> = labels.iter().copied().collect();
        if labels.len() != rows {
            return Err(ClassifierError::PredictionError(
                format!("Model returned {} labels for {} rows", labels.len(), rows)
            ));
        }
        Ok(labels)
    }
}
