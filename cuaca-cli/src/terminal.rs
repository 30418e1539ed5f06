use std::fmt::Write as _;

use cuaca_core::{Language, WeatherDisplay, WeatherView, locale::Label};

const RECENT_HEADER: Label = Label::new("Pencarian Terakhir:", "Recent searches:");
const FEELS_LIKE: Label = Label::new("Terasa seperti", "Feels like");
const HUMIDITY: Label = Label::new("Kelembapan", "Humidity");
const WIND: Label = Label::new("Angin", "Wind");
const PRESSURE: Label = Label::new("Tekanan", "Pressure");
const VISIBILITY: Label = Label::new("Jarak pandang", "Visibility");
const SUNRISE: Label = Label::new("Matahari terbit", "Sunrise");
const SUNSET: Label = Label::new("Matahari terbenam", "Sunset");
const FORECAST: Label = Label::new("Prakiraan 7 Hari", "7-Day Forecast");

/// Writes views to stdout and messages to stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalDisplay {
    language: Language,
}

impl TerminalDisplay {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl WeatherDisplay for TerminalDisplay {
    fn loading(&self, active: bool) {
        tracing::debug!(active, "Loading");
    }

    fn show_weather(&self, view: &WeatherView) {
        print!("{}", format_view(view, self.language));
    }

    /// Printed output cannot be retracted, so there is nothing to hide.
    fn hide_weather(&self) {
        tracing::debug!("Hiding weather panels");
    }

    fn show_error(&self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn show_recent(&self, searches: &[String]) {
        if let Some(line) = format_recent(searches, self.language) {
            println!("{line}");
        }
    }
}

/// Terminal glyph for a code-table icon id.
fn glyph(icon: &str) -> &'static str {
    match icon {
        "fa-sun" => "☀️",
        "fa-cloud-sun" => "⛅",
        "fa-cloud" => "☁️",
        "fa-smog" => "🌫️",
        "fa-cloud-rain" => "🌦️",
        "fa-cloud-showers-heavy" => "🌧️",
        "fa-snowflake" => "❄️",
        "fa-cloud-bolt" => "⛈️",
        _ => "•",
    }
}

pub fn format_view(view: &WeatherView, language: Language) -> String {
    let c = &view.current;
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}", c.location);
    let _ = writeln!(out, "{} {}  {}°C", glyph(c.icon), c.description, c.temperature);
    let _ = writeln!(out, "   {}: {}", FEELS_LIKE.get(language), c.feels_like);
    let _ = writeln!(out, "   {}: {}", HUMIDITY.get(language), c.humidity);
    let _ = writeln!(out, "   {}: {}", WIND.get(language), c.wind_speed);
    let _ = writeln!(out, "   {}: {}", PRESSURE.get(language), c.pressure);
    let _ = writeln!(out, "   {}: {}", VISIBILITY.get(language), c.visibility);
    let _ = writeln!(out, "   {}: {}", SUNRISE.get(language), c.sunrise);
    let _ = writeln!(out, "   {}: {}", SUNSET.get(language), c.sunset);

    if !view.forecast.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", FORECAST.get(language));
        for card in &view.forecast {
            let _ = writeln!(
                out,
                "   {:<9} {:>6}  {} {:<12} {}",
                card.day,
                card.date,
                glyph(card.icon),
                card.temperature,
                card.description
            );
        }
    }

    out
}

pub fn format_recent(searches: &[String], language: Language) -> Option<String> {
    if searches.is_empty() {
        return None;
    }
    Some(format!("🕘 {} {}", RECENT_HEADER.get(language), searches.join(" · ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuaca_core::{CurrentView, ForecastCard};

    fn view(forecast: Vec<ForecastCard>) -> WeatherView {
        WeatherView {
            current: CurrentView {
                location: "Jakarta, Indonesia".into(),
                icon: "fa-cloud",
                color: "#94a3b8",
                description: "Mendung",
                temperature: "31".into(),
                feels_like: "35°C".into(),
                humidity: "70%".into(),
                wind_speed: "12 km/h".into(),
                pressure: "1008 hPa".into(),
                visibility: "N/A".into(),
                sunrise: "05.41".into(),
                sunset: "17.52".into(),
            },
            forecast,
        }
    }

    #[test]
    fn current_panel_lines() {
        let text = format_view(&view(vec![]), Language::Indonesian);
        assert!(text.starts_with("📍 Jakarta, Indonesia\n"));
        assert!(text.contains("☁️ Mendung  31°C"));
        assert!(text.contains("Jarak pandang: N/A"));
        assert!(!text.contains("Prakiraan"));
    }

    #[test]
    fn forecast_section_lists_cards() {
        let card = ForecastCard {
            day: "Monday",
            date: "19 Oct".into(),
            icon: "fa-cloud-rain",
            color: "#60a5fa",
            temperature: "32° / 24°".into(),
            description: "Light rain",
        };
        let text = format_view(&view(vec![card.clone(), card]), Language::English);
        assert!(text.contains("7-Day Forecast"));
        assert_eq!(text.matches("Light rain").count(), 2);
    }

    #[test]
    fn recent_line_is_omitted_when_empty() {
        assert_eq!(format_recent(&[], Language::English), None);
        let line = format_recent(&["Jakarta".into(), "Bandung".into()], Language::English);
        assert_eq!(line.as_deref(), Some("🕘 Recent searches: Jakarta · Bandung"));
    }

    #[test]
    fn unknown_icon_gets_bullet() {
        assert_eq!(glyph("fa-question"), "•");
    }
}
