/// Failures surfaced by client actions. None of them are fatal; the caller
/// reports the message and stays usable.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} {message}")]
    Service { status: u16, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// A 503 from a catalog-backed endpoint: the price catalog is still loading.
    pub fn is_still_loading(&self) -> bool {
        matches!(self, Self::Service { status: 503, .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_status_and_text() {
        let err = ClientError::Service {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "502 Bad Gateway");
        assert!(!err.is_still_loading());
    }

    #[test]
    fn only_503_counts_as_still_loading() {
        let err = ClientError::Service {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(err.is_still_loading());
        assert!(!ClientError::validation("nope").is_still_loading());
    }
}
