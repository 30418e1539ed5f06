//! Core library for the `cuaca` weather lookup.
//!
//! This crate defines:
//! - The WMO weather code table and locale tables
//! - Geocoding and forecast clients (Open-Meteo)
//! - The recent-searches store over a pluggable key/value storage
//! - Rendering of a forecast into display-ready strings
//! - The search orchestrator tying these together
//!
//! It is used by `cuaca-cli`, but the display, storage and position source
//! are traits so other front-ends can reuse it.

pub mod codes;
pub mod config;
pub mod error;
pub mod locale;
pub mod locate;
pub mod model;
mod number;
pub mod orchestrator;
pub mod provider;
pub mod recent;
pub mod render;
pub mod storage;

pub use config::Config;
pub use error::{LocationFailure, SearchError, StorageError};
pub use locale::Language;
pub use locate::{FixedLocator, Locator};
pub use model::{Coordinates, CurrentConditions, DailyForecastEntry, Location, WeatherReport};
pub use orchestrator::{Orchestrator, SearchOutcome, SearchState};
pub use provider::{Geocoder, OpenMeteo, WeatherSource, open_meteo_from_config};
pub use recent::RecentSearches;
pub use render::{CurrentView, ForecastCard, Renderer, WeatherDisplay, WeatherView};
pub use storage::{FileStorage, MemoryStorage, Storage};
