use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Display language. Drives the geocoding `language` parameter, code table
/// labels, calendar names and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "id")]
    Indonesian,
    #[serde(rename = "en")]
    English,
}

const DAYS_ID: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];
const DAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Language {
    /// ISO 639-1 code, as sent to the geocoding API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Indonesian => "id",
            Language::English => "en",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[Language::Indonesian, Language::English]
    }

    /// Weekday name, `0` = Sunday.
    pub fn day_name(&self, days_from_sunday: u32) -> &'static str {
        let table = match self {
            Language::Indonesian => &DAYS_ID,
            Language::English => &DAYS_EN,
        };
        table[days_from_sunday as usize % 7]
    }

    /// Abbreviated month name, `0` = January.
    pub fn month_name(&self, month0: u32) -> &'static str {
        let table = match self {
            Language::Indonesian => &MONTHS_ID,
            Language::English => &MONTHS_EN,
        };
        table[month0 as usize % 12]
    }

    /// Separator between hours and minutes (`05.41` vs `05:41`).
    pub fn time_separator(&self) -> char {
        match self {
            Language::Indonesian => '.',
            Language::English => ':',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "id" | "indonesian" | "bahasa" => Ok(Language::Indonesian),
            "en" | "english" => Ok(Language::English),
            _ => Err(anyhow::anyhow!(
                "Unknown language '{value}'. Supported languages: id, en."
            )),
        }
    }
}

/// A string available in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub id: &'static str,
    pub en: &'static str,
}

impl Label {
    pub const fn new(id: &'static str, en: &'static str) -> Self {
        Self { id, en }
    }

    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::Indonesian => self.id,
            Language::English => self.en,
        }
    }
}
