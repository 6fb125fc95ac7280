// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// The typed failures a document run can end with. Everything
// here is fatal for the current run; the caller sees it via
// anyhow with extra context attached on the way up.
//
// An external generation call that returns no parseable
// questions is NOT an error — the aggregator handles it with
// its fallback windows and, failing that, simply keeps fewer
// questions for the passage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input produced no usable text (unreadable, empty, scanned)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// An external model service failed, timed out or sent garbage
    #[error("Service '{service}' unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    /// A configuration value is out of range
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn service(service: impl Into<String>, reason: impl ToString) -> Self {
        PipelineError::ServiceUnavailable {
            service: service.into(),
            reason:  reason.to_string(),
        }
    }
}
