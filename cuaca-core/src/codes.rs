//! WMO weather code table.
//!
//! Maps the integer `weather_code` returned by Open-Meteo to a label, an icon
//! id and an accent color. See: https://open-meteo.com/en/docs#weathervariables

use crate::locale::{Label, Language};

/// One row of the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub code: i32,
    pub label: Label,
    /// Font Awesome icon id, e.g. `fa-sun`.
    pub icon: &'static str,
    /// CSS hex color.
    pub color: &'static str,
}

impl WeatherCodeEntry {
    pub fn description(&self, language: Language) -> &'static str {
        self.label.get(language)
    }
}

const fn entry(
    code: i32,
    id: &'static str,
    en: &'static str,
    icon: &'static str,
    color: &'static str,
) -> WeatherCodeEntry {
    WeatherCodeEntry { code, label: Label::new(id, en), icon, color }
}

/// Code 0 must stay first: it is the fallback for unknown codes.
pub static WEATHER_CODES: &[WeatherCodeEntry] = &[
    entry(0, "Cerah", "Clear sky", "fa-sun", "#fbbf24"),
    entry(1, "Cerah Berawan", "Mainly clear", "fa-cloud-sun", "#60a5fa"),
    entry(2, "Berawan Sebagian", "Partly cloudy", "fa-cloud-sun", "#60a5fa"),
    entry(3, "Mendung", "Overcast", "fa-cloud", "#94a3b8"),
    entry(45, "Berkabut", "Fog", "fa-smog", "#94a3b8"),
    entry(48, "Kabut Beku", "Depositing rime fog", "fa-smog", "#94a3b8"),
    entry(51, "Gerimis Ringan", "Light drizzle", "fa-cloud-rain", "#60a5fa"),
    entry(53, "Gerimis", "Drizzle", "fa-cloud-rain", "#60a5fa"),
    entry(55, "Gerimis Lebat", "Dense drizzle", "fa-cloud-showers-heavy", "#3b82f6"),
    entry(61, "Hujan Ringan", "Light rain", "fa-cloud-rain", "#60a5fa"),
    entry(63, "Hujan", "Rain", "fa-cloud-showers-heavy", "#3b82f6"),
    entry(65, "Hujan Lebat", "Heavy rain", "fa-cloud-showers-heavy", "#2563eb"),
    entry(71, "Salju Ringan", "Light snow", "fa-snowflake", "#93c5fd"),
    entry(73, "Salju", "Snow", "fa-snowflake", "#60a5fa"),
    entry(75, "Salju Lebat", "Heavy snow", "fa-snowflake", "#3b82f6"),
    entry(80, "Hujan Ringan", "Light showers", "fa-cloud-rain", "#60a5fa"),
    entry(81, "Hujan Deras", "Heavy showers", "fa-cloud-showers-heavy", "#3b82f6"),
    entry(82, "Hujan Sangat Deras", "Violent showers", "fa-cloud-showers-heavy", "#2563eb"),
    entry(85, "Salju Ringan", "Light snow showers", "fa-snowflake", "#93c5fd"),
    entry(86, "Salju Lebat", "Heavy snow showers", "fa-snowflake", "#3b82f6"),
    entry(95, "Badai Petir", "Thunderstorm", "fa-cloud-bolt", "#7c3aed"),
    entry(96, "Badai Petir & Hujan Es", "Thunderstorm with hail", "fa-cloud-bolt", "#6d28d9"),
    entry(99, "Badai Petir Kuat", "Severe thunderstorm", "fa-cloud-bolt", "#5b21b6"),
];

/// Look up a code; unknown codes fall back to the code-0 entry.
pub fn lookup(code: i32) -> &'static WeatherCodeEntry {
    WEATHER_CODES
        .iter()
        .find(|e| e.code == code)
        .unwrap_or(&WEATHER_CODES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_entry_is_code_zero() {
        assert_eq!(WEATHER_CODES[0].code, 0);
    }

    #[test]
    fn known_code_lookup() {
        let e = lookup(63);
        assert_eq!(e.code, 63);
        assert_eq!(e.description(Language::Indonesian), "Hujan");
        assert_eq!(e.description(Language::English), "Rain");
        assert_eq!(e.icon, "fa-cloud-showers-heavy");
    }

    #[test]
    fn unknown_code_falls_back_to_clear() {
        assert_eq!(lookup(100).code, 0);
        assert_eq!(lookup(-1).code, 0);
        assert_eq!(lookup(100).description(Language::Indonesian), "Cerah");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<i32> = WEATHER_CODES.iter().map(|e| e.code).collect();
        let len = codes.len();
        codes.dedup();
        assert_eq!(codes.len(), len);
    }

    #[test]
    fn thunderstorm_codes() {
        for code in [95, 96, 99] {
            assert_eq!(lookup(code).icon, "fa-cloud-bolt");
        }
    }
}
