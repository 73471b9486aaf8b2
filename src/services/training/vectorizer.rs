// TF-IDF vectorizer for URL text.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Sparse feature vector: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer over slash-separated URL tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: token -> feature index, assigned in sorted token order.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency for each feature.
    idf: Vec<f64>,
    /// Number of documents seen during fit.
    n_documents: usize,
}

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase and split on `/`, dropping empty segments.
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split('/')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Fit the vocabulary and IDF weights on training documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.n_documents = documents.len();
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_tokens: BTreeSet<String> =
                Self::tokenize(doc.as_ref()).into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let n = self.n_documents as f64;
        self.vocabulary = BTreeMap::new();
        self.idf = Vec::with_capacity(document_frequency.len());

        for (idx, (token, df)) in document_frequency.into_iter().enumerate() {
            // IDF = ln((N + 1) / (df + 1)) + 1
            self.idf.push(((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            self.vocabulary.insert(token, idx);
        }
    }

    /// Transform a document into an L2-normalised TF-IDF vector.
    /// Tokens outside the fitted vocabulary are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in Self::tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut features {
                *value /= norm;
            }
        }

        features
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        self.fit(documents);
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn is_fitted(&self) -> bool {
        self.n_documents > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_slash() {
        assert_eq!(
            TfIdfVectorizer::tokenize("HTTP://Example.com/Login/"),
            vec!["http:", "example.com", "login"]
        );
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let documents = vec![
            "http://example.com/login",
            "http://example.com/about",
            "http://10.0.0.1/paypal/verify",
        ];

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&documents);
        assert!(vectorizer.is_fitted());
        // http:, example.com, login, about, 10.0.0.1, paypal, verify
        assert_eq!(vectorizer.vocabulary_size(), 7);

        let features = vectorizer.transform("http://example.com/login");
        assert_eq!(features.len(), 3);
        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rare_tokens_weigh_more() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["http://a.com/x", "http://b.com/x", "http://c.com/y"]);

        let features = vectorizer.transform("http://a.com/x");
        let weight_of = |token: &str| {
            let idx = vectorizer.vocabulary[token];
            features
                .iter()
                .find(|(i, _)| *i == idx)
                .map(|(_, v)| *v)
                .unwrap()
        };

        assert!(weight_of("a.com") > weight_of("x"));
        assert!(weight_of("x") > weight_of("http:"));
    }

    #[test]
    fn test_unknown_tokens_produce_empty_vector() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["http://a.com"]);
        assert!(vectorizer.transform("ftp:/unknown").is_empty());
    }
}
