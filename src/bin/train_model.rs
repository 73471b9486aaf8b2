// Offline training job for the URL classifier.
// Reads a labeled CSV of URLs, fits a TF-IDF vectorizer and a logistic
// regression model, and writes both as versioned JSON artifacts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_backend::services::training::{
    train_model, LogisticRegressionParams, TrainingConfig,
};

#[derive(Debug, Parser)]
#[command(name = "train-model")]
#[command(about = "Train the PhishGuard URL classifier", long_about = None)]
struct Args {
    /// CSV file with `url` and `label` columns.
    #[arg(long, env = "DATASET_PATH", default_value = "dataset/phishing_data.csv")]
    dataset: PathBuf,

    /// Where to write the trained classifier.
    #[arg(long, env = "MODEL_PATH", default_value = "models/phishing_model.json")]
    model_out: PathBuf,

    /// Where to write the fitted vectorizer.
    #[arg(long, env = "VECTORIZER_PATH", default_value = "models/vectorizer.json")]
    vectorizer_out: PathBuf,

    /// Fraction of samples held out for evaluation.
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Gradient descent passes over the training split.
    #[arg(long, default_value_t = 500)]
    epochs: usize,

    #[arg(long, default_value_t = 0.5)]
    learning_rate: f64,

    /// Inverse L2 regularization strength.
    #[arg(long, default_value_t = 1.0)]
    c: f64,
}

impl From<Args> for TrainingConfig {
    fn from(args: Args) -> Self {
        TrainingConfig {
            dataset_path: args.dataset,
            model_path: args.model_out,
            vectorizer_path: args.vectorizer_out,
            test_ratio: args.test_ratio,
            seed: args.seed,
            params: LogisticRegressionParams {
                c: args.c,
                epochs: args.epochs,
                learning_rate: args.learning_rate,
            },
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TrainingConfig::from(Args::parse());
    let report = train_model(&config)
        .with_context(|| format!("training on {} failed", config.dataset_path.display()))?;

    match report.accuracy {
        Some(accuracy) => info!(
            samples = report.n_samples,
            vocabulary = report.vocabulary_size,
            "Done. Held-out accuracy: {:.2}%",
            accuracy * 100.0
        ),
        None => info!(
            samples = report.n_samples,
            vocabulary = report.vocabulary_size,
            "Done. No held-out split was evaluated"
        ),
    }

    Ok(())
}
