//! Turns a [`WeatherReport`] into display-ready strings.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::{
    codes::{self, WeatherCodeEntry},
    locale::Language,
    model::{CurrentConditions, DailyForecastEntry, WeatherReport},
    number::{fixed, round_half_up},
};

const NOT_AVAILABLE: &str = "N/A";
const NO_TIME: &str = "--";

/// Front-end surface the orchestrator writes to.
pub trait WeatherDisplay: Send + Sync {
    fn loading(&self, active: bool);
    fn show_weather(&self, view: &WeatherView);
    fn hide_weather(&self);
    fn show_error(&self, message: &str);
    fn show_recent(&self, searches: &[String]);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Rounded, without unit: `"31"`.
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub day: &'static str,
    /// `"19 Okt"`.
    pub date: String,
    pub icon: &'static str,
    pub color: &'static str,
    /// `"32° / 24°"`.
    pub temperature: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: CurrentView,
    pub forecast: Vec<ForecastCard>,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    language: Language,
}

impl Renderer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn render(&self, location: &str, report: &WeatherReport) -> WeatherView {
        WeatherView {
            current: self.current(location, &report.current),
            forecast: report.forecast.iter().map(|day| self.card(day)).collect(),
        }
    }

    fn current(&self, location: &str, c: &CurrentConditions) -> CurrentView {
        let entry = codes::lookup(c.weather_code);
        CurrentView {
            location: location.to_string(),
            icon: entry.icon,
            color: entry.color,
            description: entry.description(self.language),
            temperature: round(c.temperature_c).to_string(),
            feels_like: format!("{}°C", round(c.apparent_temperature_c)),
            humidity: format!("{}%", round(c.humidity_pct)),
            wind_speed: format!("{} km/h", round(c.wind_speed_kmh)),
            pressure: format!("{} hPa", round(c.pressure_hpa)),
            visibility: c
                .visibility_m
                .map(|m| format!("{} km", fixed(m / 1000.0, 1)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sunrise: self.time_of_day(c.sunrise),
            sunset: self.time_of_day(c.sunset),
        }
    }

    fn card(&self, day: &DailyForecastEntry) -> ForecastCard {
        let entry: &WeatherCodeEntry = codes::lookup(day.weather_code);
        ForecastCard {
            day: self.language.day_name(day.date.weekday().num_days_from_sunday()),
            date: format!("{} {}", day.date.day(), self.language.month_name(day.date.month0())),
            icon: entry.icon,
            color: entry.color,
            temperature: format!("{}° / {}°", degrees(day.temp_max_c), degrees(day.temp_min_c)),
            description: entry.description(self.language),
        }
    }

    fn time_of_day(&self, t: Option<NaiveDateTime>) -> String {
        match t {
            Some(t) => format!(
                "{:02}{}{:02}",
                t.hour(),
                self.language.time_separator(),
                t.minute()
            ),
            None => NO_TIME.to_string(),
        }
    }
}

/// Integer output so `-0.4` prints as `0`, not `-0`.
fn round(value: f64) -> i64 {
    round_half_up(value)
}

fn degrees(value: Option<f64>) -> String {
    value.map(|v| round(v).to_string()).unwrap_or_else(|| NO_TIME.to_string())
}
