use thiserror::Error;

pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Check the service address and try again.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "The analysis service returned an unreadable response.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service unreachable: {0}")]
    Connectivity(String),
    #[error("service returned HTTP {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Service { status: u16, message: Option<String> },
    #[error("malformed service response: {0}")]
    MalformedResponse(String),
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
    #[error("report could not be saved: {0}")]
    Io(String),
}

impl ServiceError {
    /// Text shown to the user. Server-supplied messages pass through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Connectivity(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            Self::Service {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Service {
                status,
                message: None,
            } => format!("Analysis service error (HTTP {status})."),
            Self::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            Self::InvalidRequest(detail) => format!("Could not prepare the request: {detail}"),
            Self::Io(detail) => format!("Could not save the report: {detail}"),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::MalformedResponse(value.to_string())
        } else if value.is_builder() {
            Self::InvalidRequest(value.to_string())
        } else {
            Self::Connectivity(value.to_string())
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
