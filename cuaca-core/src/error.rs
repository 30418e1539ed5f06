use thiserror::Error;

use crate::locale::{Label, Language};

/// Why a device position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationFailure {
    Unsupported,
    Denied,
}

/// Errors that end a search chain. None of them are retried.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("city name is empty")]
    Validation,

    #[error("no geocoding match for '{query}'")]
    NotFound { query: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("location unavailable: {0:?}")]
    Permission(LocationFailure),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stored value: {0}")]
    Decode(#[from] serde_json::Error),
}

const MSG_VALIDATION: Label =
    Label::new("Masukkan nama kota terlebih dahulu!", "Enter a city name first.");
const MSG_NOT_FOUND: Label = Label::new(
    "Kota tidak ditemukan. Periksa ejaan dan coba lagi.",
    "City not found. Check the spelling and try again.",
);
const MSG_NETWORK: Label = Label::new(
    "Gagal mengambil data cuaca. Silakan coba lagi.",
    "Failed to fetch weather data. Please try again.",
);
const MSG_UNSUPPORTED: Label = Label::new(
    "Geolocation tidak didukung pada perangkat ini.",
    "Geolocation is not supported on this device.",
);
const MSG_DENIED: Label = Label::new(
    "Tidak dapat mengakses lokasi Anda. Pastikan izin lokasi diaktifkan.",
    "Unable to access your location. Make sure location access is enabled.",
);
const MSG_STORAGE: Label = Label::new(
    "Gagal menyimpan data. Silakan coba lagi.",
    "Failed to save data. Please try again.",
);

impl SearchError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self, language: Language) -> &'static str {
        let label = match self {
            SearchError::Validation => MSG_VALIDATION,
            SearchError::NotFound { .. } => MSG_NOT_FOUND,
            SearchError::Network(_) => MSG_NETWORK,
            SearchError::Permission(LocationFailure::Unsupported) => MSG_UNSUPPORTED,
            SearchError::Permission(LocationFailure::Denied) => MSG_DENIED,
            SearchError::Storage(_) => MSG_STORAGE,
        };
        label.get(language)
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        SearchError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Network(format!("malformed payload: {e}"))
    }
}
