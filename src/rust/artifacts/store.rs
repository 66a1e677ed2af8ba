use std::path::{Path, PathBuf};
use log::info;

use super::error::ArtifactError;
use super::manifest::ArtifactManifest;
use super::paths::ArtifactPaths;
use crate::classifier::{load_classifier, ClassifierError, DiseaseClassifier, LabelDecoder};
use crate::encoder::{FeatureEncoder, FeatureSchema, SymptomVector};
use crate::lookup::{LookupService, ReferenceTable, DESCRIPTION_COLUMN, PRECAUTION_COLUMN};
use crate::runtime::RuntimeConfig;

/// The immutable artifacts every request reads from: the classifier, its feature
/// schema, the label decoder and the two reference tables.
///
/// # Thread Safety
///
/// Nothing is mutated after [`build`](ArtifactStoreBuilder::build), and every
/// field is `Send + Sync`, so one store can be shared behind an `Arc` by any
/// number of request handlers without locking.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use symptom_check::ArtifactStore;
///
/// let store = ArtifactStore::builder()
///     .with_model_dir("model")
///     .build()?;
/// println!("{} symptoms known", store.feature_schema().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ArtifactStore {
    classifier: Box<dyn DiseaseClassifier>,
    schema: FeatureSchema,
    label_decoder: LabelDecoder,
    lookup: LookupService,
    paths: Option<ArtifactPaths>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ArtifactStore>();
    }
};

impl ArtifactStore {
    /// Creates a new ArtifactStoreBuilder for fluent construction
    pub fn builder() -> ArtifactStoreBuilder {
        ArtifactStoreBuilder::new()
    }

    /// Loads every artifact from the standard file names in `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        Self::builder().with_model_dir(dir).build()
    }

    pub fn feature_schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encoder(&self) -> FeatureEncoder<'_> {
        FeatureEncoder::new(&self.schema)
    }

    /// Runs the classifier on one encoded vector.
    ///
    /// # Errors
    /// `FeatureMismatch` if the vector was not built against this store's schema;
    /// otherwise whatever the classifier backend reports.
    pub fn classifier_predict(&self, vector: &SymptomVector) -> Result<i64, ClassifierError> {
        if vector.len() != self.schema.len() {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.schema.len(),
                actual: vector.len(),
            });
        }
        self.classifier.predict_one(vector.to_array().view())
    }

    pub fn decode_label(&self, label: i64) -> Result<&str, ClassifierError> {
        self.label_decoder.inverse_transform(label)
    }

    pub fn lookup_description(&self, disease: &str) -> &str {
        self.lookup.describe(disease)
    }

    pub fn lookup_precaution(&self, disease: &str) -> &str {
        self.lookup.precautions(disease)
    }

    pub fn lookup(&self) -> &LookupService {
        &self.lookup
    }

    pub fn label_decoder(&self) -> &LabelDecoder {
        &self.label_decoder
    }

    /// File locations the store was loaded from; `None` when every part was
    /// supplied in memory
    pub fn paths(&self) -> Option<&ArtifactPaths> {
        self.paths.as_ref()
    }
}

/// A builder for constructing an [`ArtifactStore`].
///
/// Parts not supplied in memory are loaded from disk, from explicit
/// [`ArtifactPaths`], else the standard names inside the model directory, else the
/// default model directory.
#[derive(Debug)]
pub struct ArtifactStoreBuilder {
    model_dir: Option<PathBuf>,
    paths: Option<ArtifactPaths>,
    runtime_config: RuntimeConfig,
    verify_manifest: bool,
    classifier: Option<Box<dyn DiseaseClassifier>>,
    label_decoder: Option<LabelDecoder>,
    lookup: Option<LookupService>,
}

impl Default for ArtifactStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStoreBuilder {
    pub fn new() -> Self {
        Self {
            model_dir: None,
            paths: None,
            runtime_config: RuntimeConfig::default(),
            verify_manifest: true,
            classifier: None,
            label_decoder: None,
            lookup: None,
        }
    }

    pub fn with_model_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.model_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Uses explicit file locations instead of a model directory
    pub fn with_paths(mut self, paths: ArtifactPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Sets the runtime configuration for ONNX classifiers
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Skips the integrity manifest even when one is present
    pub fn skip_manifest(mut self) -> Self {
        self.verify_manifest = false;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn DiseaseClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_label_decoder(mut self, decoder: LabelDecoder) -> Self {
        self.label_decoder = Some(decoder);
        self
    }

    pub fn with_lookup(mut self, lookup: LookupService) -> Self {
        self.lookup = Some(lookup);
        self
    }

    fn resolve_paths(&mut self) -> ArtifactPaths {
        if let Some(paths) = self.paths.take() {
            return paths;
        }
        match self.model_dir.take() {
            Some(dir) => ArtifactPaths::in_dir(dir),
            None => ArtifactPaths::default(),
        }
    }

    /// Loads and validates everything, failing on the first missing or malformed
    /// artifact.
    ///
    /// # Errors
    /// - `HashMismatch` if a manifest is present and a file differs from it
    /// - `NotFound` if a required file does not exist
    /// - `Classifier` if the classifier or label decoder cannot be loaded
    /// - `InvalidArtifact` if the classifier's feature names are empty or repeated
    /// - `Csv` / `MissingColumn` if a reference table is malformed
    pub fn build(mut self) -> Result<ArtifactStore, ArtifactError> {
        let all_in_memory = self.classifier.is_some()
            && self.label_decoder.is_some()
            && self.lookup.is_some();
        let paths = (!all_in_memory).then(|| self.resolve_paths());

        if let Some(paths) = &paths {
            if self.verify_manifest {
                if let Some(manifest_path) = &paths.manifest {
                    let manifest = ArtifactManifest::from_file(manifest_path)?;
                    let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
                    manifest.verify_dir(dir)?;
                }
            }
        }

        let classifier = match (self.classifier.take(), &paths) {
            (Some(classifier), _) => classifier,
            (None, Some(paths)) => {
                require_file(&paths.classifier)?;
                let classifier = load_classifier(&paths.classifier, &self.runtime_config)
                    .map_err(|source| ArtifactError::Classifier { path: paths.classifier.clone(), source })?;
                info!("Classifier loaded from {}", paths.classifier.display());
                classifier
            }
            (None, None) => return Err(ArtifactError::Unconfigured("classifier")),
        };

        let schema = FeatureSchema::new(classifier.feature_names().to_vec()).map_err(|e| {
            ArtifactError::InvalidArtifact {
                path: paths.as_ref().map(|p| p.classifier.clone()).unwrap_or_default(),
                reason: e.to_string(),
            }
        })?;

        let label_decoder = match (self.label_decoder.take(), &paths) {
            (Some(decoder), _) => decoder,
            (None, Some(paths)) => {
                require_file(&paths.label_decoder)?;
                LabelDecoder::from_file(&paths.label_decoder)
                    .map_err(|source| ArtifactError::Classifier { path: paths.label_decoder.clone(), source })?
            }
            (None, None) => return Err(ArtifactError::Unconfigured("label decoder")),
        };

        let lookup = match (self.lookup.take(), &paths) {
            (Some(lookup), _) => lookup,
            (None, Some(paths)) => {
                require_file(&paths.descriptions)?;
                require_file(&paths.precautions)?;
                LookupService::new(
                    ReferenceTable::from_csv_path(&paths.descriptions, DESCRIPTION_COLUMN)?,
                    ReferenceTable::from_csv_path(&paths.precautions, PRECAUTION_COLUMN)?,
                )
            }
            (None, None) => return Err(ArtifactError::Unconfigured("reference tables")),
        };

        info!(
            "Artifacts ready: {} symptoms, {} diseases, {} descriptions, {} precautions",
            schema.len(),
            label_decoder.len(),
            lookup.descriptions().len(),
            lookup.precaution_table().len()
        );

        Ok(ArtifactStore {
            classifier,
            schema,
            label_decoder,
            lookup,
            paths,
        })
    }
}

fn require_file(path: &Path) -> Result<(), ArtifactError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ArtifactError::NotFound(path.to_path_buf()))
    }
}
