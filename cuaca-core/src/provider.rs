use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::SearchError,
    model::{Coordinates, Location, WeatherReport},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteo;

/// Resolves place names to coordinates and back.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best match for `name`. `name` must already be trimmed and non-empty.
    async fn search(&self, name: &str) -> Result<Location, SearchError>;

    async fn reverse(&self, coords: Coordinates) -> Result<Location, SearchError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn forecast(&self, coords: Coordinates) -> Result<WeatherReport, SearchError>;
}

/// Construct the Open-Meteo client described by `config`.
pub fn open_meteo_from_config(config: &Config) -> Result<OpenMeteo, SearchError> {
    OpenMeteo::new(
        &config.geocoding_url,
        &config.forecast_url,
        config.language,
        &config.timezone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;

    #[test]
    fn open_meteo_from_config_uses_config_values() {
        let cfg = Config { language: Language::English, ..Config::default() };
        let client = open_meteo_from_config(&cfg).expect("client must build");
        assert_eq!(client.language(), Language::English);
        assert_eq!(client.timezone(), "Asia/Jakarta");
    }

    #[test]
    fn open_meteo_trims_trailing_slash_from_base_urls() {
        let cfg = Config {
            geocoding_url: "http://localhost:1234/v1/".into(),
            ..Config::default()
        };
        let client = open_meteo_from_config(&cfg).expect("client must build");
        assert_eq!(client.geocoding_url(), "http://localhost:1234/v1");
    }
}
