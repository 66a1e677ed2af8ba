use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::artifacts::{sha256_file, sha256_hex, ArtifactError, ArtifactManifest, MANIFEST_FILE};

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Artifact error: {0}")]
    ArtifactError(#[from] ArtifactError),
    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),
    #[error("Refusing to write manifest entry outside the model directory: {0}")]
    UnsafeFileName(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

/// Downloads and verifies the artifact bundle for a model directory.
///
/// A bundle is a `manifest.json` listing file names and their SHA-256 digests,
/// served next to the files it lists.
#[derive(Clone)]
pub struct ArtifactManager {
    model_dir: PathBuf,
    client: reqwest::Client,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactManager {
    pub fn new<P: AsRef<Path>>(model_dir: P) -> io::Result<Self> {
        let model_dir = model_dir.as_ref().to_path_buf();
        fs::create_dir_all(&model_dir)?;
        Ok(Self {
            model_dir,
            client: reqwest::Client::new(),
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.model_dir.join(name)
    }

    /// Reads the manifest already stored in the model directory, if any
    pub fn local_manifest(&self) -> Result<Option<ArtifactManifest>, ManagerError> {
        let path = self.artifact_path(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(ArtifactManifest::from_file(&path)?))
    }

    pub fn is_downloaded(&self, manifest: &ArtifactManifest) -> bool {
        let missing: Vec<&String> = manifest.files.keys()
            .filter(|name| !self.artifact_path(name).exists())
            .collect();
        log::info!("Checking artifacts in {:?}: {} missing", self.model_dir, missing.len());
        missing.is_empty()
    }

    /// Whether every listed file exists and matches its digest
    pub fn verify(&self, manifest: &ArtifactManifest) -> Result<bool, ManagerError> {
        for (name, expected) in &manifest.files {
            let path = self.artifact_path(name);
            if !path.exists() {
                log::info!("{} does not exist", name);
                return Ok(false);
            }
            if !self.verify_file(&path, expected)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ManagerError> {
        let hash = sha256_file(path)?;
        log::debug!("Verifying {:?}: expected {}, got {}", path, expected_hash, hash);
        Ok(hash.eq_ignore_ascii_case(expected_hash))
    }

    /// Fetches the bundle published at `base_url` into the model directory.
    ///
    /// Files already present with the right digest are kept unless `fresh` is set.
    /// If any file fails, every file written by this call is removed again and the
    /// local manifest is left untouched.
    pub async fn fetch(&self, base_url: &str, fresh: bool) -> Result<ArtifactManifest, ManagerError> {
        let _lock = self.download_lock.lock().await;

        let manifest_url = join_url(base_url, MANIFEST_FILE);
        log::info!("Fetching manifest from {}", manifest_url);
        let manifest_bytes = self.download(&manifest_url).await?;
        let manifest: ArtifactManifest = serde_json::from_slice(&manifest_bytes)?;

        for name in manifest.files.keys() {
            check_file_name(name)?;
        }

        let mut written = Vec::new();
        for (name, expected) in &manifest.files {
            let path = self.artifact_path(name);
            if !fresh && path.exists() && self.verify_file(&path, expected)? {
                log::info!("Existing {} verified successfully", name);
                continue;
            }

            match self.download_and_verify_file(&join_url(base_url, name), &path, name, expected).await {
                Ok(()) => written.push(path),
                Err(e) => {
                    log::error!("Failed to fetch {}: {}", name, e);
                    for path in &written {
                        let _ = fs::remove_file(path);
                    }
                    return Err(e);
                }
            }
        }

        fs::write(self.artifact_path(MANIFEST_FILE), &manifest_bytes)?;
        log::info!("Artifact bundle ready in {:?}", self.model_dir);
        Ok(manifest)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ManagerError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        name: &str,
        expected_hash: &str,
    ) -> Result<(), ManagerError> {
        log::info!("Downloading {} from {} to {:?}", name, url, path);
        let bytes = self.download(url).await?;

        let hash = sha256_hex(&bytes);
        if !hash.eq_ignore_ascii_case(expected_hash) {
            log::error!("{} hash mismatch: expected {}, got {}", name, expected_hash, hash);
            return Err(ManagerError::HashMismatch {
                file: name.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        fs::write(path, &bytes)?;
        log::info!("{} downloaded and verified successfully", name);
        Ok(())
    }

    /// Deletes every file listed in `manifest`, and the manifest itself
    pub fn remove_download(&self, manifest: &ArtifactManifest) -> Result<(), ManagerError> {
        for name in manifest.files.keys() {
            check_file_name(name)?;
            let path = self.artifact_path(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        let manifest_path = self.artifact_path(MANIFEST_FILE);
        if manifest_path.exists() {
            fs::remove_file(manifest_path)?;
        }
        Ok(())
    }
}

fn join_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}

fn check_file_name(name: &str) -> Result<(), ManagerError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && name != MANIFEST_FILE;
    if plain {
        Ok(())
    } else {
        Err(ManagerError::UnsafeFileName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_for(dir: &Path, files: &[(&str, &str)]) -> ArtifactManifest {
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        let names: Vec<&str> = files.iter().map(|(n, _)| *n).collect();
        ArtifactManifest::from_dir(dir, &names).unwrap()
    }

    #[test]
    fn test_verify_and_remove() -> Result<(), ManagerError> {
        let dir = tempfile::tempdir()?;
        let manager = ArtifactManager::new(dir.path())?;
        let manifest = manifest_for(dir.path(), &[
            ("label_encoder.json", r#"{"classes": ["Flu"]}"#),
            ("precaution.csv", "disease,precaution\nFlu,Rest\n"),
        ]);

        assert!(manager.is_downloaded(&manifest));
        assert!(manager.verify(&manifest)?);

        // Corrupt file and verify
        fs::write(manager.artifact_path("precaution.csv"), "corrupted data")?;
        assert!(!manager.verify(&manifest)?);

        manager.remove_download(&manifest)?;
        assert!(!manager.is_downloaded(&manifest));
        assert!(!manager.verify(&manifest)?);
        Ok(())
    }

    #[test]
    fn test_local_manifest() -> Result<(), ManagerError> {
        let dir = tempfile::tempdir()?;
        let manager = ArtifactManager::new(dir.path())?;
        assert!(manager.local_manifest()?.is_none());

        fs::write(manager.artifact_path(MANIFEST_FILE), r#"{"files": {"precaution.csv": "00"}}"#)?;
        let manifest = manager.local_manifest()?.unwrap();
        assert_eq!(manifest.files.len(), 1);
        Ok(())
    }

    #[test]
    fn test_file_names_stay_inside_model_dir() {
        assert!(check_file_name("health_model.onnx").is_ok());
        assert!(check_file_name("../etc/passwd").is_err());
        assert!(check_file_name("nested/model.onnx").is_err());
        assert!(check_file_name("..").is_err());
        assert!(check_file_name(MANIFEST_FILE).is_err());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://host/bundle/", "precaution.csv"), "https://host/bundle/precaution.csv");
        assert_eq!(join_url("https://host/bundle", "precaution.csv"), "https://host/bundle/precaution.csv");
    }

    #[tokio::test]
    async fn test_unreachable_host_leaves_directory_untouched() -> Result<(), ManagerError> {
        let dir = tempfile::tempdir()?;
        let manager = ArtifactManager::new(dir.path())?;
        let result = manager.fetch("http://127.0.0.1:9/bundle", false).await;
        assert!(matches!(result, Err(ManagerError::DownloadError(_))));
        assert!(manager.local_manifest()?.is_none());
        Ok(())
    }
}
