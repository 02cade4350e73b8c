//! Zone listing.

use std::sync::Arc;

use zone_map_database::ZoneRepository;
use zone_map_database_models::ZoneQuery;
use zone_map_zone_models::Zone;

use crate::ZoneError;

/// Read-only zone listing.
#[derive(Clone)]
pub struct ZoneQueryService {
    repo: Arc<dyn ZoneRepository>,
}

impl ZoneQueryService {
    /// Creates a service reading from `repo`.
    #[must_use]
    pub fn new(repo: Arc<dyn ZoneRepository>) -> Self {
        Self { repo }
    }

    /// Lists zones newest first, optionally keeping only those whose name
    /// contains `name_filter` (case-insensitive). A filter that is blank
    /// after trimming is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::Storage`] if the repository fails.
    pub async fn list(&self, name_filter: Option<&str>) -> Result<Vec<Zone>, ZoneError> {
        let query = name_filter
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
            .map_or_else(ZoneQuery::all, ZoneQuery::name_contains);

        Ok(self.repo.find_many(&query).await?)
    }
}
