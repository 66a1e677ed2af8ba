//! Symptom-to-disease lookup over a pre-fit classifier and static reference tables.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use symptom_check::{ArtifactStore, SymptomChecker};
//!
//! let store = ArtifactStore::builder()
//!     .with_model_dir("model")
//!     .build()?;
//! let checker = SymptomChecker::new(&store);
//!
//! let diagnosis = checker.diagnose_selection(&["itching", "skin_rash"])?;
//! println!("Predicted disease: {}", diagnosis.disease);
//! println!("Description: {}", diagnosis.description);
//!
//! let diagnosis = checker.diagnose_text("I have a headache and vomiting")?;
//! println!("Predicted disease: {}", diagnosis.disease);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The store is immutable once built and can be shared across threads using `Arc`;
//! every request builds its own symptom vector.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use symptom_check::{ArtifactStore, SymptomChecker};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let store = Arc::new(ArtifactStore::load_dir("model")?);
//!
//! let mut handles = vec![];
//! for text in ["fever and chills", "itching"] {
//!     let store = Arc::clone(&store);
//!     handles.push(thread::spawn(move || {
//!         SymptomChecker::new(&store).diagnose_text(text).map(|d| d.disease)
//!     }));
//! }
//!
//! for handle in handles {
//!     println!("{:?}", handle.join().unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact_manager;
pub mod artifacts;
pub mod classifier;
pub mod diagnosis;
pub mod encoder;
pub mod lookup;
pub mod normalizer;
pub mod predictor;
mod runtime;

pub use artifact_manager::{ArtifactManager, ManagerError};
pub use artifacts::{ArtifactError, ArtifactManifest, ArtifactPaths, ArtifactStore, ArtifactStoreBuilder};
pub use classifier::{ClassifierError, DiseaseClassifier, LabelDecoder, LinearClassifier, OnnxClassifier};
pub use diagnosis::{Diagnosis, DiagnosisError, SymptomChecker};
pub use encoder::{FeatureEncoder, FeatureSchema, SymptomVector};
pub use lookup::{LookupService, ReferenceTable, DESCRIPTION_PLACEHOLDER, PRECAUTION_PLACEHOLDER};
pub use normalizer::TextNormalizer;
pub use predictor::Predictor;
pub use runtime::{create_session_builder, RuntimeConfig};

/// Initializes logging from `RUST_LOG`, defaulting to warnings only.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
