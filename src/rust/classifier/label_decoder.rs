use std::fs;
use std::path::Path;
use serde::Deserialize;

use super::error::ClassifierError;

/// Maps encoded labels back to disease names.
///
/// Encoded label `i` decodes to `classes[i]`, the same convention as a fitted
/// label encoder's `inverse_transform`.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ClassifierError> {
        if classes.is_empty() {
            return Err(ClassifierError::ModelError("Label decoder has no classes".into()));
        }
        Ok(Self { classes })
    }

    /// Loads `{"classes": [...]}` from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifierError::ModelError(format!("Failed to read label decoder {}: {}", path.display(), e))
        })?;
        let decoder: LabelDecoder = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::ModelError(format!("Failed to parse label decoder {}: {}", path.display(), e))
        })?;
        Self::new(decoder.classes)
    }

    pub fn inverse_transform(&self, label: i64) -> Result<&str, ClassifierError> {
        usize::try_from(label)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or(ClassifierError::DecodeError(label))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
