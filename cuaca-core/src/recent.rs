use std::sync::Arc;

use crate::{error::StorageError, storage::Storage};

pub const RECENT_SEARCHES_KEY: &str = "weatherRecentSearches";
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Most-recent-first list of searched city names, unique ignoring case.
#[derive(Debug, Clone)]
pub struct RecentSearches {
    storage: Arc<dyn Storage>,
}

impl RecentSearches {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Stored list. A missing key reads as empty.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        match self.storage.get(RECENT_SEARCHES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Move `city` to the front, dropping any entry equal ignoring case, and
    /// return the updated list.
    pub fn add(&self, city: &str) -> Result<Vec<String>, StorageError> {
        let mut searches = self.list()?;
        let lower = city.to_lowercase();
        searches.retain(|s| s.to_lowercase() != lower);
        searches.insert(0, city.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);

        let json = serde_json::to_string(&searches)?;
        self.storage.set(RECENT_SEARCHES_KEY, &json)?;
        Ok(searches)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(RECENT_SEARCHES_KEY)
    }
}
