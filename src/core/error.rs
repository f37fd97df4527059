use std::io;

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LookupError {
    /// Only validation failures are meant to reach the caller verbatim.
    pub fn is_validation(&self) -> bool {
        matches!(self, LookupError::Validation(_))
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_connect() || err.is_request() {
            LookupError::Network(err.to_string())
        } else if err.is_status() {
            LookupError::Http(err.to_string())
        } else if err.is_decode() {
            LookupError::Parse(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = LookupError::Validation("Invalid email format".into());
        assert_eq!(err.to_string(), "Invalid email format");
        assert!(err.is_validation());
        assert!(!LookupError::Timeout.is_validation());
    }
}
