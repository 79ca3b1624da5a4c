//! Errors of the feed providers and of the free-room service.
//!
//! A [`ProviderError`] says why one upstream fetch failed (campus API,
//! seat-finder page or a local feed file). The service wraps it into a
//! [`ResolveError`] naming which feed was unavailable.

use roomfinder_core::QueryError;
use thiserror::Error;

/// Why a fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    // Rejected by the upstream service.
    AuthenticationFailed,
    AuthorizationFailed,
    NotFound,
    RateLimited,
    ServerError,
    /// A success status with a body that is not what the feed promises.
    InvalidResponse,

    // Transport.
    NetworkError,
    /// The fetch did not finish within the configured timeout.
    Timeout,

    // Local.
    /// Missing token, bad URL, half-configured file pair.
    ConfigurationError,
    InternalError,
}

impl ProviderErrorCode {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::InvalidResponse,
        }
    }

    /// Whether trying again later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::RateLimited | Self::ServerError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed fetch from one provider.
///
/// Displays as `[provider] code: message`, the provider part only when set.
#[derive(Debug, Error)]
#[error("{}{code}: {message}", provider_prefix(.provider))]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

fn provider_prefix(provider: &Option<String>) -> String {
    provider
        .as_deref()
        .map(|name| format!("[{name}] "))
        .unwrap_or_default()
}

macro_rules! shorthand {
    ($($name:ident => $code:ident),* $(,)?) => {
        $(
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ProviderErrorCode::$code, message)
            }
        )*
    };
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    shorthand! {
        authentication => AuthenticationFailed,
        authorization => AuthorizationFailed,
        not_found => NotFound,
        rate_limited => RateLimited,
        server => ServerError,
        invalid_response => InvalidResponse,
        network => NetworkError,
        timeout => Timeout,
        configuration => ConfigurationError,
        internal => InternalError,
    }

    /// Error for a non-success HTTP status, with whatever detail the body
    /// carried.
    pub fn from_status(status: u16, detail: impl AsRef<str>) -> Self {
        let detail = detail.as_ref().trim();
        let message = if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {detail}")
        };
        Self::new(ProviderErrorCode::from_status(status), message)
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors from the free-room service.
///
/// Fetch failures abort the whole operation; the caller decides on a
/// fallback. Bad individual records never show up here, they are reported
/// as data issues instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("room directory unavailable: {0}")]
    DirectoryUnavailable(#[source] ProviderError),

    #[error("event feed unavailable: {0}")]
    EventFeedUnavailable(#[source] ProviderError),

    /// The origin room for ranking is not in the catalog.
    #[error("origin room {0} is not in the room catalog")]
    UnknownOriginRoom(String),

    #[error("room {0} is not in the room catalog")]
    UnknownRoom(String),

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
}

impl ResolveError {
    /// The failed fetch behind an `*Unavailable` error.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::DirectoryUnavailable(e) | Self::EventFeedUnavailable(e) => Some(e),
            _ => None,
        }
    }
}
