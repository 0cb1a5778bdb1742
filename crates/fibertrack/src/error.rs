//! Tracker errors
//!
//! Only construction-time contract violations are errors. Dispatch never
//! fails; it under-reports instead.

use fibertrack_css::SelectorError;

/// Tracker error
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid selector {selector:?}: {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("Invalid tracker options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
