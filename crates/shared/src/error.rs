use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned by the analysis service alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("analysis result rejected: {reason}")]
pub struct InvalidAnalysis {
    pub reason: String,
}

impl InvalidAnalysis {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
