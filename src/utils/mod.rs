// Utility modules for the PhishGuard backend

pub mod scan_errors;
pub mod url_normalizer;

pub use scan_errors::{ScanApiError, ScanApiResult, ScanErrorResponse};
pub use url_normalizer::{ensure_scheme, normalize_url, NormalizedUrl, UrlFormatError};
