//! Device position sources.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::{LocationFailure, SearchError},
    model::Coordinates,
};

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, SearchError>;
}

/// Position taken from the command line or configuration. Without one the
/// device is treated as having no geolocation support.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    position: Option<Coordinates>,
}

impl FixedLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, SearchError> {
        match self.position {
            Some(coords) => {
                tracing::info!("Using position {}, {}", coords.latitude, coords.longitude);
                Ok(coords)
            }
            None => Err(SearchError::Permission(LocationFailure::Unsupported)),
        }
    }
}
