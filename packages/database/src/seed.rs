//! Demo zones for development databases.

use serde_json::{Value, json};
use zone_map_database_models::{NewZone, ZoneQuery};
use zone_map_geometry::Geometry;
use zone_map_zone_models::ZoneType;

use crate::{DbError, ZoneRepository};

/// A zone to seed, with its geometry still in wire form.
struct SeedZone {
    name: &'static str,
    zone_type: ZoneType,
    geometry: Value,
}

fn seed_data() -> Vec<SeedZone> {
    vec![
        SeedZone {
            name: "Zona Residencial Norte (Seed)",
            zone_type: ZoneType::Residencial,
            geometry: json!({ "type": "Point", "coordinates": [-46.6333, -23.5505] }),
        },
        SeedZone {
            name: "Zona Comercial Central (Seed)",
            zone_type: ZoneType::Comercial,
            geometry: json!({
                "type": "Polygon",
                "coordinates": [[
                    [-46.64, -23.55],
                    [-46.63, -23.55],
                    [-46.63, -23.54],
                    [-46.64, -23.54],
                    [-46.64, -23.55]
                ]]
            }),
        },
    ]
}

/// Inserts the demo zones, skipping any whose exact name already exists.
///
/// Every seed geometry is validated before the first insert, so a bad seed
/// leaves storage untouched.
///
/// # Errors
///
/// Returns [`DbError::Conversion`] if a seed geometry is invalid, or any
/// error from the repository.
pub async fn seed_zones(repo: &dyn ZoneRepository) -> Result<u64, DbError> {
    let zones = seed_data()
        .into_iter()
        .map(|seed| {
            Geometry::from_value(&seed.geometry)
                .map(|geometry| NewZone {
                    name: seed.name.to_string(),
                    zone_type: seed.zone_type,
                    geometry,
                })
                .map_err(|e| DbError::Conversion {
                    message: format!("Invalid seed geometry for zone {}: {e}", seed.name),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut inserted = 0u64;

    for zone in zones {
        let existing = repo
            .find_many(&ZoneQuery::name_contains(zone.name.clone()))
            .await?;

        if existing.iter().any(|z| z.name == zone.name) {
            log::debug!("Seed zone {} already exists, skipping", zone.name);
            continue;
        }

        let created = repo.create(zone).await?;
        log::info!("Seeded zone {} ({})", created.name, created.id);
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryZoneRepository;

    #[test]
    fn seed_geometries_are_valid() {
        for seed in seed_data() {
            assert!(
                zone_map_geometry::is_valid_geometry(&seed.geometry),
                "{} has invalid geometry",
                seed.name
            );
        }
    }

    #[tokio::test]
    async fn seeding_twice_inserts_once() {
        let repo = MemoryZoneRepository::new();

        assert_eq!(seed_zones(&repo).await.unwrap(), 2);
        assert_eq!(seed_zones(&repo).await.unwrap(), 0);

        let zones = repo.find_many(&ZoneQuery::all()).await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].name, "Zona Comercial Central (Seed)");
        assert_eq!(zones[1].zone_type, ZoneType::Residencial);
    }
}
