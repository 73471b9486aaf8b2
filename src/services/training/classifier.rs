// Binary logistic regression over sparse TF-IDF features.

use serde::{Deserialize, Serialize};

use super::dataset::Label;
use super::error::{TrainingError, TrainingResult};
use super::vectorizer::SparseVector;

/// Probability at or above which a URL is classified as phishing
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    /// Inverse regularization strength (larger = weaker L2 penalty)
    pub c: f64,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            epochs: 500,
            learning_rate: 0.5,
        }
    }
}

impl LogisticRegressionParams {
    pub fn validate(&self) -> TrainingResult<()> {
        if !(self.c > 0.0) {
            return Err(TrainingError::InvalidConfig(
                "regularization C must be positive".to_string(),
            ));
        }
        if self.epochs == 0 {
            return Err(TrainingError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0) {
            return Err(TrainingError::InvalidConfig(
                "learning rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit by full-batch gradient descent on the mean log-loss with an L2
    /// penalty of `||w||² / (2·C·n)`. The bias is not regularized.
    pub fn fit(
        features: &[SparseVector],
        labels: &[Label],
        n_features: usize,
        params: &LogisticRegressionParams,
    ) -> TrainingResult<Self> {
        params.validate()?;
        if features.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        if features.len() != labels.len() {
            return Err(TrainingError::InvalidConfig(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let n = features.len() as f64;
        let mut model = Self {
            weights: vec![0.0; n_features],
            bias: 0.0,
        };
        let mut gradient = vec![0.0; n_features];

        for _ in 0..params.epochs {
            gradient.iter_mut().for_each(|g| *g = 0.0);
            let mut bias_gradient = 0.0;

            for (row, label) in features.iter().zip(labels) {
                let error = model.probability(row) - label.target();
                for &(idx, value) in row {
                    if idx < n_features {
                        gradient[idx] += error * value;
                    }
                }
                bias_gradient += error;
            }

            for (weight, grad) in model.weights.iter_mut().zip(&gradient) {
                let penalty = *weight / (params.c * n);
                *weight -= params.learning_rate * (grad / n + penalty);
            }
            model.bias -= params.learning_rate * bias_gradient / n;
        }

        Ok(model)
    }

    /// Probability that the row is phishing
    pub fn probability(&self, row: &SparseVector) -> f64 {
        let z = row
            .iter()
            .filter_map(|&(idx, value)| self.weights.get(idx).map(|w| w * value))
            .sum::<f64>()
            + self.bias;
        sigmoid(z)
    }

    pub fn predict(&self, row: &SparseVector) -> Label {
        if self.probability(row) >= DECISION_THRESHOLD {
            Label::Phishing
        } else {
            Label::Legitimate
        }
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Fraction of matching labels; `None` when there is nothing to compare.
pub fn accuracy_score(predicted: &[Label], actual: &[Label]) -> Option<f64> {
    if predicted.is_empty() || predicted.len() != actual.len() {
        return None;
    }

    let correct = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p == a)
        .count();
    Some(correct as f64 / predicted.len() as f64)
}
