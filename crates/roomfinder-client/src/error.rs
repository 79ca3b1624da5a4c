//! Client error types.

use std::fmt;

use roomfinder_core::QueryError;
use roomfinder_providers::{ProviderError, ResolveError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// A provider could not be set up.
    Provider(ProviderError),
    /// The free-room service failed.
    Resolve(ResolveError),
    /// IO error.
    Io(std::io::Error),
    /// Bad command-line input (room number, time, date).
    InvalidInput(String),
    /// Action failed (opening a link).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(err) => write!(f, "provider error: {}", err),
            Self::Resolve(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::Resolve(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<ResolveError> for ClientError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<QueryError> for ClientError {
    fn from(err: QueryError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn resolve_errors_keep_their_message() {
        let err = ClientError::from(ResolveError::UnknownRoom("09-999".to_string()));
        assert_eq!(err.to_string(), "room 09-999 is not in the room catalog");
        assert!(err.source().is_some());
    }

    #[test]
    fn query_errors_are_input_errors() {
        let err = ClientError::from(QueryError::InvalidTime("25:99".to_string()));
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }
}
