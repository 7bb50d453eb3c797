use thiserror::Error;

/// Failure modes of an assistant call.
///
/// `Display` is the user-facing summary; transport details stay in the
/// variant for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("Not authenticated")]
    Unauthenticated,

    /// The server answered with an error status. Holds the server detail or
    /// a generic message.
    #[error("{0}")]
    RequestFailed(String),

    /// The call never reached the server or never came back.
    #[error("Network error, could not reach the assistant")]
    TransportFailed(String),
}

impl AssistantError {
    /// Diagnostic detail for logs, including transport internals.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Unauthenticated => "no credential available",
            Self::RequestFailed(detail) | Self::TransportFailed(detail) => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_hides_detail() {
        let err = AssistantError::TransportFailed("dns error: no such host".to_string());
        assert_eq!(
            err.to_string(),
            "Network error, could not reach the assistant"
        );
        assert_eq!(err.detail(), "dns error: no such host");
    }

    #[test]
    fn request_failed_shows_server_detail() {
        let err = AssistantError::RequestFailed("overloaded".to_string());
        assert_eq!(err.to_string(), "overloaded");
    }
}
