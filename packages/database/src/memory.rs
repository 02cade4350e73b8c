//! Process-local zone storage.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use zone_map_database_models::{NewZone, ZoneOrder, ZoneQuery};
use zone_map_zone_models::Zone;

use crate::{DbError, ZoneRepository};

/// [`ZoneRepository`] that keeps zones in memory.
///
/// Timestamps never go backwards between inserts, so insertion order and
/// `created_at` order agree; equal timestamps list the later insert first.
#[derive(Debug, Default)]
pub struct MemoryZoneRepository {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    zones: Vec<Zone>,
    last_created_at: Option<DateTime<Utc>>,
}

impl MemoryZoneRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ZoneRepository for MemoryZoneRepository {
    async fn create(&self, zone: NewZone) -> Result<Zone, DbError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Utc::now();
        let created_at = state.last_created_at.map_or(now, |last| last.max(now));
        state.last_created_at = Some(created_at);

        let zone = Zone {
            id: uuid::Uuid::new_v4().to_string(),
            name: zone.name,
            zone_type: zone.zone_type,
            geometry: zone.geometry,
            created_at,
        };
        state.zones.push(zone.clone());

        Ok(zone)
    }

    async fn find_many(&self, query: &ZoneQuery) -> Result<Vec<Zone>, DbError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let needle = query.name_contains.as_deref().map(str::to_lowercase);

        let mut zones: Vec<Zone> = state
            .zones
            .iter()
            .rev()
            .filter(|zone| {
                needle
                    .as_deref()
                    .is_none_or(|needle| zone.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        match query.order {
            // Stable sort keeps later inserts first among equal timestamps.
            ZoneOrder::NewestFirst => zones.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(zones)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
