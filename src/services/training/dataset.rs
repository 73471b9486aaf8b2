// Labeled URL datasets: CSV loading and the seeded train/test split.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::error::{TrainingError, TrainingResult};

/// Binary class of a training sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    /// Parse the label column. Accepts numeric and common textual spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "1" | "bad" | "phishing" | "malicious" | "true" => Some(Label::Phishing),
            "0" | "good" | "legitimate" | "benign" | "safe" | "false" => Some(Label::Legitimate),
            _ => None,
        }
    }

    /// Regression target: 1.0 for phishing, 0.0 otherwise.
    pub fn target(self) -> f64 {
        match self {
            Label::Phishing => 1.0,
            Label::Legitimate => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledUrl {
    pub url: String,
    pub label: Label,
}

/// Load a dataset from a CSV file with a header row containing `url` and `label`.
pub fn load_dataset(path: &Path) -> TrainingResult<Vec<LabeledUrl>> {
    if !path.exists() {
        return Err(TrainingError::DatasetNotFound(path.to_path_buf()));
    }

    parse_dataset(File::open(path)?)
}

/// Parse CSV data from any reader. Extra columns are ignored.
pub fn parse_dataset<R: Read>(reader: R) -> TrainingResult<Vec<LabeledUrl>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let url_idx = headers.iter().position(|h| h == "url");
    let label_idx = headers.iter().position(|h| h == "label");
    let (Some(url_idx), Some(label_idx)) = (url_idx, label_idx) else {
        return Err(TrainingError::MissingColumns);
    };

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let url = record.get(url_idx).unwrap_or_default();
        let raw_label = record.get(label_idx).unwrap_or_default();

        // Header is line 1
        let label = Label::parse(raw_label).ok_or_else(|| TrainingError::InvalidLabel {
            line: row + 2,
            value: raw_label.to_string(),
        })?;

        samples.push(LabeledUrl {
            url: url.to_string(),
            label,
        });
    }

    if samples.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    Ok(samples)
}

/// Shuffle with a fixed seed, then hold out `ceil(len * test_ratio)` items.
///
/// Returns `(train, test)`.
pub fn train_test_split<T: Clone>(samples: &[T], test_ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut shuffled = samples.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = ((samples.len() as f64) * test_ratio).ceil() as usize;
    let n_test = n_test.min(samples.len());

    let train = shuffled.split_off(n_test);
    (train, shuffled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(Label::parse("1"), Some(Label::Phishing));
        assert_eq!(Label::parse(" Bad "), Some(Label::Phishing));
        assert_eq!(Label::parse("0"), Some(Label::Legitimate));
        assert_eq!(Label::parse("GOOD"), Some(Label::Legitimate));
        assert_eq!(Label::parse("maybe"), None);
    }

    #[test]
    fn test_parse_dataset_with_extra_columns() {
        let csv = "id,url,label\n1,http://paypal-login.example/verify,bad\n2,https://rust-lang.org,good\n";
        let samples = parse_dataset(csv.as_bytes()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].url, "http://paypal-login.example/verify");
        assert_eq!(samples[0].label, Label::Phishing);
        assert_eq!(samples[1].label, Label::Legitimate);
    }

    #[test]
    fn test_parse_dataset_requires_columns() {
        let csv = "link,class\nhttp://a.com,1\n";
        assert!(matches!(
            parse_dataset(csv.as_bytes()),
            Err(TrainingError::MissingColumns)
        ));
    }

    #[test]
    fn test_parse_dataset_reports_bad_label_line() {
        let csv = "url,label\nhttp://a.com,1\nhttp://b.com,unknown\n";
        match parse_dataset(csv.as_bytes()) {
            Err(TrainingError::InvalidLabel { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "unknown");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dataset_rejects_empty() {
        assert!(matches!(
            parse_dataset("url,label\n".as_bytes()),
            Err(TrainingError::EmptyDataset)
        ));
    }

    #[test]
    fn test_split_sizes_and_determinism() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test) = train_test_split(&items, 0.2, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train_again, test_again) = train_test_split(&items, 0.2, 42);
        assert_eq!(train, train_again);
        assert_eq!(test, test_again);

        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, items);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let items: Vec<usize> = (0..7).collect();
        let (train, test) = train_test_split(&items, 0.2, 1);
        assert_eq!(test.len(), 2);
        assert_eq!(train.len(), 5);
    }
}
