//! Detection of backend quota / rate-limit exhaustion.
//!
//! The backend signals exhaustion inconsistently (HTTP 429, a
//! `RESOURCE_EXHAUSTED` status in the body, or prose mentioning quota), so
//! the heuristic lives here on its own and callers only ask a yes/no question.

use crate::services::providers::ProviderError;

const QUOTA_MARKERS: [&str; 4] = ["429", "resource_exhausted", "resource exhausted", "quota"];

/// Whether the error means further calls in this request are expected to fail.
pub fn is_quota_exhausted(error: &ProviderError) -> bool {
    match error {
        ProviderError::RateLimited => true,
        other => {
            let message = other.to_string().to_lowercase();
            QUOTA_MARKERS.iter().any(|marker| message.contains(marker))
        }
    }
}
