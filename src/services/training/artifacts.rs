// Versioned JSON artifacts for the trained vectorizer and classifier.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::LogisticRegression;
use super::error::{TrainingError, TrainingResult};
use super::vectorizer::TfIdfVectorizer;

/// Bumped whenever the artifact layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    /// SHA-256 of the dataset file the artifacts were trained on
    pub dataset_sha256: String,
    pub n_samples: usize,
    /// Held-out accuracy; absent when no test split was evaluated
    pub accuracy: Option<f64>,
}

impl ArtifactMetadata {
    pub fn new(dataset_sha256: String, n_samples: usize, accuracy: Option<f64>) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            trained_at: Utc::now(),
            dataset_sha256,
            n_samples,
            accuracy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub metadata: ArtifactMetadata,
    pub vectorizer: TfIdfVectorizer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ArtifactMetadata,
    pub model: LogisticRegression,
}

/// Hex-encoded SHA-256 of a file's contents
pub fn file_sha256(path: &Path) -> TrainingResult<String> {
    let bytes = fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

pub fn save_artifacts(
    model_path: &Path,
    vectorizer_path: &Path,
    metadata: &ArtifactMetadata,
    model: &LogisticRegression,
    vectorizer: &TfIdfVectorizer,
) -> TrainingResult<()> {
    write_json(
        model_path,
        &ModelArtifact {
            metadata: metadata.clone(),
            model: model.clone(),
        },
    )?;
    write_json(
        vectorizer_path,
        &VectorizerArtifact {
            metadata: metadata.clone(),
            vectorizer: vectorizer.clone(),
        },
    )
}

/// Load both artifacts, rejecting unknown versions and mixed training runs
pub fn load_artifacts(
    model_path: &Path,
    vectorizer_path: &Path,
) -> TrainingResult<(ModelArtifact, VectorizerArtifact)> {
    let model: ModelArtifact = read_json(model_path)?;
    let vectorizer: VectorizerArtifact = read_json(vectorizer_path)?;

    for metadata in [&model.metadata, &vectorizer.metadata] {
        if metadata.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(TrainingError::UnsupportedArtifactVersion {
                expected: ARTIFACT_FORMAT_VERSION,
                found: metadata.format_version,
            });
        }
    }

    if model.metadata.dataset_sha256 != vectorizer.metadata.dataset_sha256
        || model.metadata.trained_at != vectorizer.metadata.trained_at
    {
        return Err(TrainingError::ArtifactMismatch);
    }

    Ok((model, vectorizer))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> TrainingResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> TrainingResult<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
