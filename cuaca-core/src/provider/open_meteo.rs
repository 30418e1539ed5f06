use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::SearchError,
    locale::Language,
    model::{Coordinates, CurrentConditions, DailyForecastEntry, Location, WeatherReport},
};

use super::{Geocoder, WeatherSource};

const USER_AGENT: &str = concat!("cuaca/", env!("CARGO_PKG_VERSION"));

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,\
weather_code,surface_pressure,wind_speed_10m,wind_direction_10m";
const HOURLY_FIELDS: &str = "visibility";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Days shown after today.
pub const FORECAST_DAYS: usize = 7;

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: Language,
    timezone: String,
}

impl OpenMeteo {
    pub fn new(
        geocoding_url: &str,
        forecast_url: &str,
        language: Language,
        timezone: &str,
    ) -> Result<Self, SearchError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
            language,
            timezone: timezone.to_string(),
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn geocoding_url(&self) -> &str {
        &self.geocoding_url
    }

    async fn get_body(&self, url: &str, query: &[(&str, String)], what: &str) -> Result<String, SearchError> {
        tracing::debug!(url, ?query, "Requesting {what}");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SearchError::Network(format!("Failed to send {what} request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| SearchError::Network(format!("Failed to read {what} response body: {e}")))?;

        if !status.is_success() {
            return Err(SearchError::Network(format!(
                "Open-Meteo {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        Ok(body)
    }

    async fn geocode(&self, query: Vec<(&str, String)>, label: &str) -> Result<Location, SearchError> {
        let url = format!("{}/search", self.geocoding_url);
        let body = self.get_body(&url, &query, "geocoding").await?;

        let parsed: OmGeocodeResponse = serde_json::from_str(&body)?;

        let first = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::NotFound { query: label.to_string() })?;

        let location = Location {
            name: first.name,
            country: first.country,
            latitude: first.latitude,
            longitude: first.longitude,
        };
        tracing::info!(
            name = %location.name,
            lat = location.latitude,
            lon = location.longitude,
            "Geocoded '{label}'"
        );
        Ok(location)
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn search(&self, name: &str) -> Result<Location, SearchError> {
        let query = vec![
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.as_str().to_string()),
        ];
        self.geocode(query, name).await
    }

    async fn reverse(&self, coords: Coordinates) -> Result<Location, SearchError> {
        let query = vec![
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.as_str().to_string()),
        ];
        self.geocode(query, &coords.label()).await
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn forecast(&self, coords: Coordinates) -> Result<WeatherReport, SearchError> {
        let url = format!("{}/forecast", self.forecast_url);
        let query = vec![
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.timezone.clone()),
        ];
        let body = self.get_body(&url, &query, "forecast").await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)?;
        into_report(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    results: Option<Vec<OmGeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    #[serde(default)]
    hourly: OmHourly,
    #[serde(default)]
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    surface_pressure: f64,
    wind_speed_10m: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OmHourly {
    #[serde(default)]
    visibility: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct OmDaily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    sunrise: Vec<Option<String>>,
    #[serde(default)]
    sunset: Vec<Option<String>>,
}

fn into_report(parsed: OmForecastResponse) -> Result<WeatherReport, SearchError> {
    let OmForecastResponse { current, hourly, daily } = parsed;

    let visibility_m = hourly.visibility.first().copied().flatten();
    let sunrise = first_time(&daily.sunrise);
    let sunset = first_time(&daily.sunset);

    let mut forecast = Vec::with_capacity(FORECAST_DAYS);
    for (i, day) in daily.time.iter().enumerate().skip(1).take(FORECAST_DAYS) {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|e| SearchError::Network(format!("malformed daily date '{day}': {e}")))?;

        forecast.push(DailyForecastEntry {
            date,
            weather_code: daily.weather_code.get(i).copied().flatten().unwrap_or(0),
            temp_max_c: daily.temperature_2m_max.get(i).copied().flatten(),
            temp_min_c: daily.temperature_2m_min.get(i).copied().flatten(),
        });
    }

    if visibility_m.is_none() {
        tracing::warn!("Forecast payload has no visibility value");
    }

    Ok(WeatherReport {
        current: CurrentConditions {
            temperature_c: current.temperature_2m,
            apparent_temperature_c: current.apparent_temperature,
            humidity_pct: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
            pressure_hpa: current.surface_pressure,
            visibility_m,
            weather_code: current.weather_code,
            sunrise,
            sunset,
        },
        forecast,
    })
}

/// Today's entry of a local-time series; unparsable values count as missing.
fn first_time(series: &[Option<String>]) -> Option<NaiveDateTime> {
    let raw = series.first()?.as_deref()?;
    parse_local_time(raw)
}

fn parse_local_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn payload(days: usize) -> serde_json::Value {
        let time: Vec<String> = (0..days).map(|d| format!("2026-10-{:02}", 18 + d)).collect();
        json!({
            "current": {
                "time": "2026-10-18T14:00",
                "temperature_2m": 31.4,
                "relative_humidity_2m": 70,
                "apparent_temperature": 35.2,
                "precipitation": 0.0,
                "weather_code": 3,
                "surface_pressure": 1008.4,
                "wind_speed_10m": 11.6,
                "wind_direction_10m": 220
            },
            "hourly": { "time": ["2026-10-18T00:00"], "visibility": [24140.0] },
            "daily": {
                "time": time,
                "weather_code": vec![61; days],
                "temperature_2m_max": vec![32.6; days],
                "temperature_2m_min": vec![24.2; days],
                "sunrise": vec!["2026-10-18T05:41"; days],
                "sunset": vec!["2026-10-18T17:52"; days]
            }
        })
    }

    fn parse(value: serde_json::Value) -> WeatherReport {
        let parsed: OmForecastResponse = serde_json::from_value(value).expect("valid payload");
        into_report(parsed).expect("report")
    }

    #[test]
    fn full_payload_yields_seven_days_excluding_today() {
        let report = parse(payload(8));
        assert_eq!(report.forecast.len(), 7);
        assert_eq!(report.forecast[0].date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(report.current.weather_code, 3);
        assert_eq!(report.current.visibility_m, Some(24140.0));
        let sunrise = report.current.sunrise.expect("sunrise");
        assert_eq!((sunrise.hour(), sunrise.minute()), (5, 41));
    }

    #[test]
    fn longer_series_is_clipped_to_seven() {
        let report = parse(payload(16));
        assert_eq!(report.forecast.len(), 7);
        assert_eq!(report.forecast[6].date, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
    }

    #[test]
    fn three_days_yield_two_cards() {
        let report = parse(payload(3));
        assert_eq!(report.forecast.len(), 2);
    }

    #[test]
    fn missing_optional_fields_degrade() {
        let mut value = payload(2);
        value.as_object_mut().unwrap().remove("hourly");
        value["daily"]["sunrise"] = json!([null, null]);
        value["daily"]["temperature_2m_max"] = json!([30.0]);

        let report = parse(value);
        assert_eq!(report.current.visibility_m, None);
        assert_eq!(report.current.sunrise, None);
        assert!(report.current.sunset.is_some());
        assert_eq!(report.forecast[0].temp_max_c, None);
        assert_eq!(report.forecast[0].temp_min_c, Some(24.2));
    }

    #[test]
    fn missing_current_scalar_is_an_error() {
        let mut value = payload(2);
        value["current"].as_object_mut().unwrap().remove("temperature_2m");
        let result: Result<OmForecastResponse, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_daily_date_is_a_network_error() {
        let mut value = payload(2);
        value["daily"]["time"] = json!(["2026-10-18", "tomorrow"]);
        let parsed: OmForecastResponse = serde_json::from_value(value).unwrap();
        let err = into_report(parsed).unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }

    #[test]
    fn parse_local_time_accepts_seconds() {
        let t = parse_local_time("2026-10-18T05:41:30").expect("parses");
        assert_eq!(t.second(), 30);
        assert!(parse_local_time("05:41").is_none());
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
