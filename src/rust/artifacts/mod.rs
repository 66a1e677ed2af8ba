mod error;
mod manifest;
mod paths;
mod store;

pub use error::ArtifactError;
pub use manifest::{sha256_file, sha256_hex, ArtifactManifest};
pub use paths::{
    ArtifactPaths, CLASSIFIER_JSON_FILE, CLASSIFIER_ONNX_FILE, DESCRIPTION_FILE, LABEL_DECODER_FILE,
    MANIFEST_FILE, MODEL_DIR_ENV, PRECAUTION_FILE,
};
pub use store::{ArtifactStore, ArtifactStoreBuilder};
