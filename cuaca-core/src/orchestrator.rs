//! Search orchestration: geocode → forecast → render.
//!
//! Each search runs as its own chain of at most two sequential requests.
//! Overlapping chains are not cancelled; instead every chain takes a request
//! token and only the holder of the latest token may write to the display.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    error::SearchError,
    locate::Locator,
    model::Coordinates,
    provider::{Geocoder, WeatherSource},
    recent::RecentSearches,
    render::{Renderer, WeatherDisplay, WeatherView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Rendered(WeatherView),
    /// A newer search started before this one finished; nothing was shown.
    Superseded,
}

pub struct Orchestrator {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    locator: Arc<dyn Locator>,
    recent: RecentSearches,
    display: Arc<dyn WeatherDisplay>,
    renderer: Renderer,
    latest: AtomicU64,
    state: Mutex<SearchState>,
}

impl Orchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherSource>,
        locator: Arc<dyn Locator>,
        recent: RecentSearches,
        display: Arc<dyn WeatherDisplay>,
        renderer: Renderer,
    ) -> Self {
        Self {
            geocoder,
            weather,
            locator,
            recent,
            display,
            renderer,
            latest: AtomicU64::new(0),
            state: Mutex::new(SearchState::Idle),
        }
    }

    pub fn state(&self) -> SearchState {
        *self.state.lock()
    }

    pub fn recent(&self) -> Result<Vec<String>, SearchError> {
        Ok(self.recent.list()?)
    }

    pub fn clear_recent(&self) -> Result<(), SearchError> {
        self.recent.clear()?;
        self.display.show_recent(&[]);
        Ok(())
    }

    /// Push the stored recent searches to the display.
    pub fn load_recent(&self) -> Result<(), SearchError> {
        let searches = self.recent.list()?;
        self.display.show_recent(&searches);
        Ok(())
    }

    /// Search by city name. Blank input is rejected before any request.
    pub async fn search_city(&self, input: &str) -> Result<SearchOutcome, SearchError> {
        let city = input.trim();
        if city.is_empty() {
            let err = SearchError::Validation;
            self.display.show_error(err.user_message(self.renderer.language()));
            return Err(err);
        }

        let token = self.begin();
        tracing::info!(token, city, "Searching by city");
        let result = self.city_chain(token, city).await;
        self.finish(token, result)
    }

    /// Search at the locator's position, labelling it by reverse geocoding.
    pub async fn search_here(&self) -> Result<SearchOutcome, SearchError> {
        let token = self.begin();
        tracing::info!(token, "Searching by device position");
        let result = self.position_chain().await;
        self.finish(token, result)
    }

    async fn city_chain(&self, token: u64, city: &str) -> Result<WeatherView, SearchError> {
        let location = self.geocoder.search(city).await?;
        self.remember(token, &location.name);

        let report = self.weather.forecast(location.coordinates()).await?;
        Ok(self.renderer.render(&location.label(), &report))
    }

    async fn position_chain(&self) -> Result<WeatherView, SearchError> {
        let coords = self.locator.locate().await?;
        let report = self.weather.forecast(coords).await?;
        let label = self.label_for(coords).await;
        Ok(self.renderer.render(&label, &report))
    }

    async fn label_for(&self, coords: Coordinates) -> String {
        match self.geocoder.reverse(coords).await {
            Ok(location) => location.label(),
            Err(e) => {
                tracing::warn!("Reverse geocoding failed, labelling with coordinates: {e}");
                coords.label()
            }
        }
    }

    fn remember(&self, token: u64, name: &str) {
        match self.recent.add(name) {
            Ok(searches) => {
                if self.is_current(token) {
                    self.display.show_recent(&searches);
                }
            }
            Err(e) => tracing::warn!("Failed to record recent search '{name}': {e}"),
        }
    }

    fn begin(&self) -> u64 {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock() = SearchState::Searching;
        self.display.loading(true);
        token
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    fn finish(
        &self,
        token: u64,
        result: Result<WeatherView, SearchError>,
    ) -> Result<SearchOutcome, SearchError> {
        if !self.is_current(token) {
            match &result {
                Ok(_) => tracing::debug!(token, "Discarding superseded result"),
                Err(e) => tracing::debug!(token, "Discarding superseded failure: {e}"),
            }
            return Ok(SearchOutcome::Superseded);
        }

        let outcome = match result {
            Ok(view) => {
                *self.state.lock() = SearchState::Success;
                tracing::info!(token, location = %view.current.location, "Rendering weather");
                self.display.show_weather(&view);
                Ok(SearchOutcome::Rendered(view))
            }
            Err(e) => {
                *self.state.lock() = SearchState::Failed;
                tracing::warn!(token, "Search failed: {e}");
                self.display.hide_weather();
                self.display.show_error(e.user_message(self.renderer.language()));
                Err(e)
            }
        };

        self.display.loading(false);
        *self.state.lock() = SearchState::Idle;
        outcome
    }
}
