// Service modules for the PhishGuard backend

pub mod heuristics;
pub mod training;

pub use heuristics::{HeuristicDetector, RiskReport, ScanFailure, ScanOutcome, Verdict};
pub use training::{train_model, TrainingConfig, TrainingError, TrainingReport, UrlClassifier};
