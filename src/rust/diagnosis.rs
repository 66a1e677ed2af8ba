use serde::Serialize;
use log::{debug, info};

use crate::artifacts::ArtifactStore;
use crate::classifier::ClassifierError;
use crate::encoder::SymptomVector;
use crate::normalizer::TextNormalizer;
use crate::predictor::Predictor;

/// Conditions that stop a single request from producing a diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    /// Nothing was selected or typed; no prediction was attempted
    #[error("No symptoms were provided")]
    EmptyInput,
    #[error(transparent)]
    Prediction(#[from] ClassifierError),
}

/// The result shown to the user for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub disease: String,
    pub description: String,
    pub precautions: String,
    /// Schema symptoms the input was recognised as, in schema order
    pub matched_symptoms: Vec<String>,
}

/// The shared request pipeline behind both input styles.
///
/// Selection input goes straight to the encoder; free text is normalized first.
/// Each call builds its own vector, so one checker can serve any number of
/// requests against the same store.
#[derive(Debug, Clone)]
pub struct SymptomChecker<'a> {
    store: &'a ArtifactStore,
    normalizer: TextNormalizer,
}

impl<'a> SymptomChecker<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store, normalizer: TextNormalizer::new() }
    }

    /// Diagnoses a list of chosen symptom names.
    ///
    /// An empty selection is refused with `EmptyInput` before anything is encoded.
    /// Names the schema does not know are dropped silently.
    pub fn diagnose_selection<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<Diagnosis, DiagnosisError> {
        if symptoms.is_empty() {
            return Err(DiagnosisError::EmptyInput);
        }
        let vector = self.store.encoder().encode(symptoms);
        self.diagnose_vector(&vector)
    }

    /// Diagnoses a free-text description.
    ///
    /// Only blank text is refused. Text that names no known symptom still reaches
    /// the classifier as an all-zero vector, unlike [`diagnose_selection`](Self::diagnose_selection).
    pub fn diagnose_text(&self, text: &str) -> Result<Diagnosis, DiagnosisError> {
        if text.trim().is_empty() {
            return Err(DiagnosisError::EmptyInput);
        }
        let tokens = self.normalizer.normalize(text)?;
        debug!("Normalized tokens: {:?}", tokens);
        let vector = self.store.encoder().encode(&tokens);
        self.diagnose_vector(&vector)
    }

    /// Predicts and looks up reference text for an already-encoded vector
    pub fn diagnose_vector(&self, vector: &SymptomVector) -> Result<Diagnosis, DiagnosisError> {
        let disease = Predictor::new(self.store).predict(vector)?;
        info!("Predicted '{}' from {} symptom(s)", disease, vector.count_present());

        Ok(Diagnosis {
            disease: disease.to_string(),
            description: self.store.lookup_description(disease).to_string(),
            precautions: self.store.lookup_precaution(disease).to_string(),
            matched_symptoms: self.store.encoder()
                .decode(vector)
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }
}
