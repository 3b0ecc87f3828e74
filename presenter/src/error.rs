use thiserror::Error;

/// Failure of a single request to the analysis server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the server's own message when the body
    /// carried one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The body was not the JSON we expected.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// The server's own message when it sent one, otherwise the description.
    pub fn into_message(self) -> String {
        match self {
            FetchError::Status { message, .. } | FetchError::Rejected(message) => message,
            other => other.to_string(),
        }
    }
}

/// Errors surfaced by dashboard operations. The `Display` text is what the
/// user sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("File size exceeds {limit_mb}MB limit")]
    FileTooLarge { size: u64, limit_mb: u64 },

    #[error("Please upload a CSV file")]
    NotCsv,

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    Analysis(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    AffectedRows(String),

    #[error("No analysis to export")]
    NoAnalysis,

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_survives_into_message() {
        let status = FetchError::Status {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(status.into_message(), "quota exceeded");
        assert_eq!(
            FetchError::Network("offline".into()).into_message(),
            "Network error: offline"
        );
    }
}
