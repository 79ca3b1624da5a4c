//! Campus API provider configuration.

use std::time::Duration;
use url::Url;

/// Configuration for the campus API provider.
#[derive(Debug, Clone)]
pub struct CampusApiConfig {
    /// Base URL of the API gateway; endpoint paths are joined onto it.
    pub base_url: Url,

    /// Application token sent as `X-ApplicationId`.
    pub token: Option<String>,

    /// Requested response language.
    pub language: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl CampusApiConfig {
    /// Default API gateway.
    pub const DEFAULT_BASE_URL: &'static str = "https://integration.preprod.unisg.ch";

    /// Default response language.
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a new configuration with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let mut parsed = Url::parse(base_url.as_ref())?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed,
            token: None,
            language: Self::DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("roomfinder/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets the application token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the requested response language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Resolves an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }

    /// Returns true if a token is configured.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
