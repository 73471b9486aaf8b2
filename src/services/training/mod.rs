// Offline URL classifier training
// Standalone batch job: load labeled URLs, vectorize, fit, evaluate, persist.
// Shares no code path with the heuristic detector.

pub mod artifacts;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod vectorizer;

pub use artifacts::{load_artifacts, save_artifacts, ArtifactMetadata, ARTIFACT_FORMAT_VERSION};
pub use classifier::{accuracy_score, LogisticRegression, LogisticRegressionParams};
pub use dataset::{load_dataset, parse_dataset, train_test_split, Label, LabeledUrl};
pub use error::{TrainingError, TrainingResult};
pub use vectorizer::{SparseVector, TfIdfVectorizer};

use std::path::{Path, PathBuf};
use tracing::{info, warn};

// =============================================================================
// CONFIGURATION
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    /// Fraction of samples held out for evaluation, in [0, 1)
    pub test_ratio: f64,
    pub seed: u64,
    pub params: LogisticRegressionParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset/phishing_data.csv"),
            model_path: PathBuf::from("models/phishing_model.json"),
            vectorizer_path: PathBuf::from("models/vectorizer.json"),
            test_ratio: 0.2,
            seed: 42,
            params: LogisticRegressionParams::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> TrainingResult<()> {
        if !(0.0..1.0).contains(&self.test_ratio) {
            return Err(TrainingError::InvalidConfig(format!(
                "test ratio must be in [0, 1), got {}",
                self.test_ratio
            )));
        }
        self.params.validate()
    }
}

// =============================================================================
// TRAINING
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub vocabulary_size: usize,
    pub accuracy: Option<f64>,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
}

/// Run the full pipeline and write both artifacts.
pub fn train_model(config: &TrainingConfig) -> TrainingResult<TrainingReport> {
    config.validate()?;

    info!(dataset = %config.dataset_path.display(), "Loading dataset");
    let samples = load_dataset(&config.dataset_path)?;
    ensure_both_classes(samples.iter().map(|s| s.label))?;

    info!(samples = samples.len(), "Vectorizing URLs");
    let urls: Vec<&str> = samples.iter().map(|s| s.url.as_str()).collect();
    let mut vectorizer = TfIdfVectorizer::new();
    let features = vectorizer.fit_transform(&urls);

    let indices: Vec<usize> = (0..samples.len()).collect();
    let (train_idx, test_idx) = train_test_split(&indices, config.test_ratio, config.seed);

    let train_features: Vec<SparseVector> =
        train_idx.iter().map(|&i| features[i].clone()).collect();
    let train_labels: Vec<Label> = train_idx.iter().map(|&i| samples[i].label).collect();
    ensure_both_classes(train_labels.iter().copied())?;

    info!(
        train = train_idx.len(),
        test = test_idx.len(),
        features = vectorizer.vocabulary_size(),
        "Training classifier"
    );
    let model = LogisticRegression::fit(
        &train_features,
        &train_labels,
        vectorizer.vocabulary_size(),
        &config.params,
    )?;

    let predicted: Vec<Label> = test_idx.iter().map(|&i| model.predict(&features[i])).collect();
    let actual: Vec<Label> = test_idx.iter().map(|&i| samples[i].label).collect();
    let accuracy = accuracy_score(&predicted, &actual);
    match accuracy {
        Some(acc) => info!("Model trained, accuracy: {:.2}%", acc * 100.0),
        None => warn!("Model trained without a held-out split; accuracy not evaluated"),
    }

    let metadata = ArtifactMetadata::new(
        artifacts::file_sha256(&config.dataset_path)?,
        samples.len(),
        accuracy,
    );
    save_artifacts(
        &config.model_path,
        &config.vectorizer_path,
        &metadata,
        &model,
        &vectorizer,
    )?;
    info!(
        model = %config.model_path.display(),
        vectorizer = %config.vectorizer_path.display(),
        "Artifacts saved"
    );

    Ok(TrainingReport {
        n_samples: samples.len(),
        n_train: train_idx.len(),
        n_test: test_idx.len(),
        vocabulary_size: vectorizer.vocabulary_size(),
        accuracy,
        model_path: config.model_path.clone(),
        vectorizer_path: config.vectorizer_path.clone(),
    })
}

fn ensure_both_classes(labels: impl Iterator<Item = Label>) -> TrainingResult<()> {
    let (mut phishing, mut legitimate) = (false, false);
    for label in labels {
        match label {
            Label::Phishing => phishing = true,
            Label::Legitimate => legitimate = true,
        }
    }

    if phishing && legitimate {
        Ok(())
    } else {
        Err(TrainingError::SingleClass)
    }
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Trained vectorizer + classifier pair loaded from disk.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    vectorizer: TfIdfVectorizer,
    model: LogisticRegression,
    metadata: ArtifactMetadata,
}

impl UrlClassifier {
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> TrainingResult<Self> {
        let (model, vectorizer) = load_artifacts(model_path, vectorizer_path)?;
        Ok(Self {
            vectorizer: vectorizer.vectorizer,
            model: model.model,
            metadata: model.metadata,
        })
    }

    /// Probability that `url` is phishing
    pub fn predict_proba(&self, url: &str) -> f64 {
        self.model.probability(&self.vectorizer.transform(url))
    }

    pub fn predict(&self, url: &str) -> Label {
        self.model.predict(&self.vectorizer.transform(url))
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }
}
