/// Client error type
///
/// Every failed call resolves to exactly one [`ClientError`]. Its
/// `Display` output is the message callers show to users:
///
/// - validation failures: `"user email is empty or blank"`
/// - server-reported failures: the server's `error` string, verbatim
/// - protocol failures: `"unexpected response status 200 (KO)"`
/// - connection failures: `"could not reach server"`

use pintxopote_shared::validation::FieldError;
use thiserror::Error;

/// Result type for client calls
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A request field failed validation; nothing was sent
    #[error(transparent)]
    Validation(#[from] FieldError),

    /// The server rejected the request with a message
    #[error("{0}")]
    Server(String),

    /// Non-2xx response without an error message
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// 2xx response whose envelope did not report success
    #[error("unexpected response status {code} ({status})")]
    UnexpectedEnvelope { code: u16, status: String },

    /// The server could not be connected to
    #[error("could not reach server")]
    Unreachable,

    /// Any other transport failure
    #[error("{0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The configured base URL cannot address API endpoints
    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::Unreachable
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl ClientError {
    /// Returns true if the call was rejected before reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ClientError::from(FieldError::Missing("user id".into())).to_string(),
            "user id is not a string"
        );
        assert_eq!(
            ClientError::Server("wrong credentials".into()).to_string(),
            "wrong credentials"
        );
        assert_eq!(
            ClientError::UnexpectedEnvelope {
                code: 200,
                status: "KO".into()
            }
            .to_string(),
            "unexpected response status 200 (KO)"
        );
        assert_eq!(ClientError::UnexpectedStatus(502).to_string(), "unexpected response status 502");
        assert_eq!(ClientError::Unreachable.to_string(), "could not reach server");
    }

    #[test]
    fn test_is_validation() {
        assert!(ClientError::from(FieldError::Blank("user name".into())).is_validation());
        assert!(!ClientError::Unreachable.is_validation());
    }
}
