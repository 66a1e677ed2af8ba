use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use log::{debug, info};

use super::error::ArtifactError;

/// SHA-256 digests of the files in a model directory, keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub files: BTreeMap<String, String>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn sha256_file(path: &Path) -> Result<String, ArtifactError> {
    let bytes = fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    Ok(sha256_hex(&bytes))
}

impl ArtifactManifest {
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
        Self::from_json(&content).map_err(|source| ArtifactError::Json { path: path.to_path_buf(), source })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Records the current digest of each named file in `dir`
    pub fn from_dir(dir: &Path, names: &[&str]) -> Result<Self, ArtifactError> {
        let mut files = BTreeMap::new();
        for name in names {
            files.insert(name.to_string(), sha256_file(&dir.join(name))?);
        }
        Ok(Self { files })
    }

    /// Checks every listed file in `dir` against its recorded digest.
    ///
    /// # Errors
    /// - `NotFound` if a listed file is missing
    /// - `HashMismatch` for the first file whose digest differs
    pub fn verify_dir(&self, dir: &Path) -> Result<(), ArtifactError> {
        for (name, expected) in &self.files {
            let actual = sha256_file(&dir.join(name))?;
            debug!("Verifying {}: expected {}, got {}", name, expected, actual);
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(ArtifactError::HashMismatch {
                    file: name.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        info!("Verified {} artifact(s) against manifest", self.files.len());
        Ok(())
    }
}
