use log::debug;

use crate::artifacts::ArtifactStore;
use crate::classifier::ClassifierError;
use crate::encoder::SymptomVector;

/// Maps an encoded symptom vector to a disease name.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    store: &'a ArtifactStore,
}

impl<'a> Predictor<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    /// Runs the classifier and decodes its label.
    ///
    /// # Errors
    /// - `FeatureMismatch` if `vector` does not match the store's schema; this is a
    ///   caller bug, not a user-facing condition
    /// - `DecodeError` if the classifier emits a label the decoder never saw
    /// - any backend failure from the classifier
    pub fn predict(&self, vector: &SymptomVector) -> Result<&'a str, ClassifierError> {
        let label = self.store.classifier_predict(vector)?;
        let disease = self.store.decode_label(label)?;
        debug!("Classifier label {} decoded to '{}'", label, disease);
        Ok(disease)
    }
}
