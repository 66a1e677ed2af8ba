use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the model directory
pub const MODEL_DIR_ENV: &str = "SYMPTOM_CHECK_MODEL_DIR";

pub const CLASSIFIER_ONNX_FILE: &str = "health_model.onnx";
pub const CLASSIFIER_JSON_FILE: &str = "health_model.json";
pub const LABEL_DECODER_FILE: &str = "label_encoder.json";
pub const DESCRIPTION_FILE: &str = "symptom_description.csv";
pub const PRECAUTION_FILE: &str = "precaution.csv";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Locations of the four startup artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub label_decoder: PathBuf,
    pub descriptions: PathBuf,
    pub precautions: PathBuf,
    /// Integrity manifest, checked before anything is parsed when present
    pub manifest: Option<PathBuf>,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`. The ONNX classifier is preferred over the
    /// JSON export when both exist.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let onnx = dir.join(CLASSIFIER_ONNX_FILE);
        let classifier = if onnx.exists() || !dir.join(CLASSIFIER_JSON_FILE).exists() {
            onnx
        } else {
            dir.join(CLASSIFIER_JSON_FILE)
        };
        let manifest = dir.join(MANIFEST_FILE);

        Self {
            classifier,
            label_decoder: dir.join(LABEL_DECODER_FILE),
            descriptions: dir.join(DESCRIPTION_FILE),
            precautions: dir.join(PRECAUTION_FILE),
            manifest: manifest.exists().then_some(manifest),
        }
    }

    /// Returns the default model directory path
    pub fn default_model_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(MODEL_DIR_ENV) {
            return PathBuf::from(path);
        }

        // 2. A model directory next to where we run
        let local = PathBuf::from("model");
        if local.is_dir() {
            return local;
        }

        // 3. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("symptom-check").join("model");
        }

        // 4. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("symptom-check").join("model");
        }

        // 5. If all else fails, use system temp directory
        env::temp_dir().join("symptom-check").join("model")
    }

    /// The four required artifacts with a short name for each
    pub fn required(&self) -> [(&'static str, &Path); 4] {
        [
            ("classifier", self.classifier.as_path()),
            ("label decoder", self.label_decoder.as_path()),
            ("description table", self.descriptions.as_path()),
            ("precaution table", self.precautions.as_path()),
        ]
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(Self::default_model_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_in_dir_prefers_onnx() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(CLASSIFIER_JSON_FILE), "{}")?;
        assert_eq!(ArtifactPaths::in_dir(dir.path()).classifier, dir.path().join(CLASSIFIER_JSON_FILE));

        fs::write(dir.path().join(CLASSIFIER_ONNX_FILE), "")?;
        assert_eq!(ArtifactPaths::in_dir(dir.path()).classifier, dir.path().join(CLASSIFIER_ONNX_FILE));
        Ok(())
    }

    #[test]
    fn test_manifest_only_when_present() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let paths = ArtifactPaths::in_dir(dir.path());
        assert!(paths.manifest.is_none());
        assert_eq!(paths.label_decoder, dir.path().join(LABEL_DECODER_FILE));

        fs::write(dir.path().join(MANIFEST_FILE), r#"{"files": {}}"#)?;
        assert!(ArtifactPaths::in_dir(dir.path()).manifest.is_some());
        Ok(())
    }

    #[test]
    fn test_default_model_dir_env() {
        env::set_var(MODEL_DIR_ENV, "/tmp/test-symptom-check/model");
        let path = ArtifactPaths::default_model_dir();
        env::remove_var(MODEL_DIR_ENV);
        assert_eq!(path, PathBuf::from("/tmp/test-symptom-check/model"));
    }
}
