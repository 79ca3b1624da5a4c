//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/roomfinder/config.toml` by default. Every section and field is
//! optional.
//!
//! The API token supports secret references:
//! - `pass::path/in/store` resolved via `pass show`
//! - `env::VAR_NAME` resolved from the environment
//! - plain text used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use roomfinder_core::{
    DEFAULT_FLOOR_SCALE, DistanceRanker, FormatOptions, MapLink, RoomNumber, SizeFilter,
    TimeFormat, Unpositioned,
};
use roomfinder_core::maplink::{DEFAULT_CAMPUS_ID, DEFAULT_POI_TYPE};
use roomfinder_providers::FileProvider;
use serde::{Deserialize, Serialize};

/// Configuration for the roomfinder client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Campus API settings.
    pub api: ApiSettings,

    /// Live occupancy settings.
    pub seatfinder: SeatfinderSettings,

    /// Query defaults.
    pub query: QuerySettings,

    /// Output settings.
    pub display: DisplaySettings,

    /// Indoor map settings.
    pub map: MapSettings,

    /// Offline feed files.
    pub files: FileSettings,
}

/// Campus API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Gateway URL; the built-in default when unset.
    pub base_url: Option<String>,

    /// Application token (supports `pass::` and `env::` prefixes).
    pub token: Option<String>,

    /// Requested response language.
    pub language: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            language: "en".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiSettings {
    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves the token, expanding secret references.
    pub fn resolve_token(&self) -> Result<Option<String>, String> {
        self.token
            .as_deref()
            .map(|raw| {
                crate::secret::resolve(raw).map_err(|e| format!("failed to resolve api.token: {}", e))
            })
            .transpose()
    }

    /// Converts to provider configuration.
    #[cfg(feature = "campus")]
    pub fn to_provider_config(
        &self,
    ) -> Result<roomfinder_providers::campus::CampusApiConfig, String> {
        use roomfinder_providers::campus::CampusApiConfig;

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(CampusApiConfig::DEFAULT_BASE_URL);
        let mut config = CampusApiConfig::new(base_url)
            .map_err(|e| format!("invalid api.base_url {:?}: {}", base_url, e))?
            .with_language(&self.language)
            .with_timeout(self.timeout());

        if let Some(token) = self.resolve_token()? {
            config = config.with_token(token);
        }

        Ok(config)
    }
}

/// Live occupancy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatfinderSettings {
    /// Page URL; the public seat-finder when unset.
    pub url: Option<String>,

    /// When false, fallback numbers are shown without fetching.
    pub enabled: bool,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SeatfinderSettings {
    fn default() -> Self {
        Self {
            url: None,
            enabled: true,
            timeout_secs: 10,
        }
    }
}

/// Defaults applied to every free-room query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Largest acceptable room capacity.
    pub max_seats: Option<u32>,

    /// Room to rank distances from.
    pub origin_room: Option<String>,

    /// Weight of one floor against one unit of horizontal distance.
    pub floor_scale: f64,

    /// Where rooms without map position go when ranking.
    pub unpositioned: Unpositioned,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            max_seats: None,
            origin_room: None,
            floor_scale: DEFAULT_FLOOR_SCALE,
            unpositioned: Unpositioned::Last,
        }
    }
}

impl QuerySettings {
    pub fn size_filter(&self) -> SizeFilter {
        SizeFilter::from_max_seats(self.max_seats)
    }

    pub fn ranker(&self) -> DistanceRanker {
        DistanceRanker::new()
            .with_floor_scale(self.floor_scale)
            .with_unpositioned(self.unpositioned)
    }

    /// Parses the configured origin room.
    pub fn origin(&self) -> Result<Option<RoomNumber>, String> {
        self.origin_room
            .as_deref()
            .map(|raw| RoomNumber::parse(raw).map_err(|e| format!("query.origin_room: {}", e)))
            .transpose()
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print JSON instead of text.
    pub json: bool,

    /// Maximum number of rooms to print.
    pub limit: Option<usize>,

    /// Link room numbers to map directions (OSC8).
    pub hyperlinks: bool,

    /// Maximum subject length (truncated with ellipsis).
    pub max_subject_length: Option<usize>,

    /// Separator between hours and minutes.
    pub hour_separator: String,

    /// `h24` or `h12`.
    pub time_format: TimeFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            json: false,
            limit: None,
            hyperlinks: false,
            max_subject_length: None,
            hour_separator: ":".to_string(),
            time_format: TimeFormat::H24,
        }
    }
}

impl DisplaySettings {
    /// Builds formatter options; `origin_map_id` enables route links.
    pub fn format_options(&self, map: MapLink, origin_map_id: Option<u64>) -> FormatOptions {
        FormatOptions {
            max_subject_length: self.max_subject_length,
            hyperlinks: self.hyperlinks,
            hour_separator: self.hour_separator.clone(),
            time_format: self.time_format,
            limit: self.limit,
            origin_map_id,
            map,
        }
    }
}

/// Indoor map settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub campus_id: u32,
    pub poi_type: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            campus_id: DEFAULT_CAMPUS_ID,
            poi_type: DEFAULT_POI_TYPE,
        }
    }
}

impl MapSettings {
    pub fn link(&self) -> MapLink {
        MapLink::new(self.campus_id, self.poi_type)
    }
}

/// Offline feed files, used instead of the campus API when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// JSON array of directory records.
    pub rooms: Option<PathBuf>,

    /// JSON array of event records.
    pub events: Option<PathBuf>,
}

impl FileSettings {
    /// Returns the file provider, if configured.
    ///
    /// # Errors
    ///
    /// Setting only one of the two files is an error.
    pub fn provider(&self) -> Result<Option<FileProvider>, String> {
        match (&self.rooms, &self.events) {
            (Some(rooms), Some(events)) => Ok(Some(FileProvider::new(rooms, events))),
            (None, None) => Ok(None),
            _ => Err("files.rooms and files.events must be set together".to_string()),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomfinder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api.language, "en");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert!(config.seatfinder.enabled);
        assert_eq!(config.query.size_filter(), SizeFilter::Unbounded);
        assert_eq!(config.map.link(), MapLink::default());
        assert!(config.files.provider().unwrap().is_none());
    }

    #[test]
    fn parses_every_section() {
        let content = r#"
[api]
base_url = "https://api.example.com"
token = "abc"
timeout_secs = 3

[seatfinder]
enabled = false

[query]
max_seats = 40
origin_room = "09-010"
floor_scale = 2.5
unpositioned = "exclude"

[display]
json = true
limit = 5
time_format = "h12"

[map]
campus_id = 1

[files]
rooms = "/tmp/rooms.json"
events = "/tmp/events.json"
"#;
        let config: ClientConfig = toml::from_str(content).unwrap();

        assert_eq!(config.api.resolve_token().unwrap(), Some("abc".to_string()));
        assert_eq!(config.api.language, "en");
        assert!(!config.seatfinder.enabled);
        assert_eq!(config.query.size_filter(), SizeFilter::AtMost(40));
        assert_eq!(config.query.unpositioned, Unpositioned::Exclude);
        assert_eq!(
            config.query.origin().unwrap().map(|n| n.to_string()),
            Some("09-010".to_string())
        );
        assert!(config.display.json);
        assert_eq!(config.display.time_format, TimeFormat::H12);
        assert_eq!(config.map.link(), MapLink::new(1, DEFAULT_POI_TYPE));
        assert!(config.files.provider().unwrap().is_some());
    }

    #[test]
    fn token_from_env_reference() {
        unsafe {
            std::env::set_var("_ROOMFINDER_CONFIG_TEST_TOKEN", "env-token");
        }
        let config: ClientConfig =
            toml::from_str("[api]\ntoken = \"env::_ROOMFINDER_CONFIG_TEST_TOKEN\"\n").unwrap();
        assert_eq!(
            config.api.resolve_token().unwrap(),
            Some("env-token".to_string())
        );
        unsafe {
            std::env::remove_var("_ROOMFINDER_CONFIG_TEST_TOKEN");
        }
    }

    #[test]
    fn invalid_origin_is_reported() {
        let config: ClientConfig = toml::from_str("[query]\norigin_room = \"Aula\"\n").unwrap();
        assert!(config.query.origin().is_err());
    }

    #[test]
    fn half_configured_files_are_an_error() {
        let config: ClientConfig = toml::from_str("[files]\nrooms = \"rooms.json\"\n").unwrap();
        assert!(config.files.provider().is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nlimit = 3\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.display.limit, Some(3));
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\n").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(err.contains("failed to parse"));
    }

    #[cfg(feature = "campus")]
    #[test]
    fn provider_config_uses_default_gateway() {
        let config = ApiSettings::default().to_provider_config().unwrap();
        assert_eq!(
            config.base_url.as_str(),
            "https://integration.preprod.unisg.ch/"
        );
        assert!(!config.has_token());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = ClientConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.display.hour_separator, ":");
    }
}
