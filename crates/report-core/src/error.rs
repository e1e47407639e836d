use thiserror::Error;

/// Failures that abort a whole request.
///
/// Field-level anomalies never show up here: the formatting primitives
/// degrade those to null instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("{0}")]
    Provider(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    MissingInput(String),
}

impl ReportError {
    /// True when the failure originated upstream of the report builder.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ReportError::Provider(_) | ReportError::InvalidResponse(_))
    }
}
