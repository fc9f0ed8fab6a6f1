use std::fmt;

/// Errors that can occur while delivering payloads to the inspector API
#[derive(Debug)]
pub enum InspectorForwardError {
    /// Failed to serialize payloads to JSON
    Serialization(serde_json::Error),

    /// Network request failed
    Network(reqwest::Error),

    /// Server answered with anything other than 200
    Server { status: u16, body: String },

    /// Batch response body was not JSON
    InvalidResponse { body: String },

    /// Batch response carried `"ok": false`
    Rejected { body: String },

    /// A configured value cannot be sent as an HTTP header
    InvalidHeader { name: &'static str },
}

impl fmt::Display for InspectorForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectorForwardError::Serialization(e) => {
                write!(f, "Failed to serialize payloads: {}", e)
            }
            InspectorForwardError::Network(e) => write!(f, "Network request failed: {}", e),
            InspectorForwardError::Server { status, body } => {
                write!(f, "Server error {}: {}", status, body)
            }
            InspectorForwardError::InvalidResponse { body } => {
                write!(f, "Unparseable response body: {}", body)
            }
            InspectorForwardError::Rejected { body } => write!(f, "Batch rejected: {}", body),
            InspectorForwardError::InvalidHeader { name } => {
                write!(f, "Invalid value for header '{}'", name)
            }
        }
    }
}

impl std::error::Error for InspectorForwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InspectorForwardError::Serialization(e) => Some(e),
            InspectorForwardError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InspectorForwardError {
    fn from(err: serde_json::Error) -> Self {
        InspectorForwardError::Serialization(err)
    }
}

impl From<reqwest::Error> for InspectorForwardError {
    fn from(err: reqwest::Error) -> Self {
        InspectorForwardError::Network(err)
    }
}

impl InspectorForwardError {
    /// Create a server error from response details
    pub fn server_error(status: u16, body: String) -> Self {
        InspectorForwardError::Server { status, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            InspectorForwardError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for inspector forwarding operations
pub type InspectorForwardResult<T> = Result<T, InspectorForwardError>;
