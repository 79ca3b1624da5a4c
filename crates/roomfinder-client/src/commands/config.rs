//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let setup = check(config).map_err(ClientError::Config)?;
    println!("{}", setup);
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

/// Checks every section that can be wrong without contacting a server.
///
/// Returns a description of the effective data source.
fn check(config: &ClientConfig) -> Result<String, String> {
    config.query.origin()?;
    if config.query.floor_scale < 0.0 {
        return Err("query.floor_scale must not be negative".to_string());
    }

    if let Some(files) = config.files.provider()? {
        return Ok(format!(
            "Using offline files {} and {}.",
            files.rooms_path().display(),
            files.events_path().display()
        ));
    }

    api_note(config)
}

#[cfg(feature = "campus")]
fn api_note(config: &ClientConfig) -> Result<String, String> {
    let api = config.api.to_provider_config()?;
    if !api.has_token() {
        return Err("api.token is required for the campus API".to_string());
    }
    Ok(format!("Using campus API at {}.", api.base_url))
}

#[cfg(not(feature = "campus"))]
fn api_note(_config: &ClientConfig) -> Result<String, String> {
    Err("built without campus API support; set files.rooms and files.events".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_files() -> ClientConfig {
        let mut config = ClientConfig::default();
        config.files.rooms = Some("rooms.json".into());
        config.files.events = Some("events.json".into());
        config
    }

    #[test]
    fn offline_files_are_valid() {
        assert_eq!(
            check(&with_files()).unwrap(),
            "Using offline files rooms.json and events.json."
        );
    }

    #[test]
    fn bad_origin_is_reported() {
        let mut config = with_files();
        config.query.origin_room = Some("Aula".to_string());
        assert!(check(&config).is_err());
    }

    #[test]
    fn negative_floor_scale() {
        let mut config = with_files();
        config.query.floor_scale = -1.0;
        assert_eq!(
            check(&config).unwrap_err(),
            "query.floor_scale must not be negative"
        );
    }

    #[cfg(feature = "campus")]
    #[test]
    fn campus_api_needs_token() {
        let config = ClientConfig::default();
        assert_eq!(
            check(&config).unwrap_err(),
            "api.token is required for the campus API"
        );

        let mut config = ClientConfig::default();
        config.api.token = Some("secret".to_string());
        assert_eq!(
            check(&config).unwrap(),
            "Using campus API at https://integration.preprod.unisg.ch/."
        );
    }
}
