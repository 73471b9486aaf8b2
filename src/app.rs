// Application state and configuration
use std::sync::Arc;

use crate::{app_config::AppConfig, services::HeuristicDetector};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub detector: Arc<HeuristicDetector>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            detector: Arc::new(HeuristicDetector::new()),
        }
    }
}
