//! Full reload of every collection.
//!
//! Views never patch state in place: after a mutation the caller reloads
//! everything and recomputes. Each collection keeps its repo's ordering
//! (most recent first).

use serde::Serialize;
use th_core::entities::{
    Animal, ClimateLog, FeedingLog, HousingContainer, HousingSlot, SpeciesType, WeightLog,
};

use crate::error::DatabaseError;
use crate::service::ThService;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Collections {
    pub species: Vec<SpeciesType>,
    pub animals: Vec<Animal>,
    pub containers: Vec<HousingContainer>,
    pub slots: Vec<HousingSlot>,
    pub feeding_logs: Vec<FeedingLog>,
    pub weight_logs: Vec<WeightLog>,
    pub climate_logs: Vec<ClimateLog>,
}

impl Collections {
    /// Display name of a species, falling back to its id.
    #[must_use]
    pub fn species_name<'a>(&'a self, species_id: &'a str) -> &'a str {
        self.species
            .iter()
            .find(|s| s.id == species_id)
            .map_or(species_id, SpeciesType::display_name)
    }

    /// Name of an animal, falling back to its id.
    #[must_use]
    pub fn animal_name<'a>(&'a self, animal_id: &'a str) -> &'a str {
        self.animals
            .iter()
            .find(|a| a.id == animal_id && !a.name.is_empty())
            .map_or(animal_id, |a| a.name.as_str())
    }

    /// Name of a container, falling back to its id.
    #[must_use]
    pub fn container_name<'a>(&'a self, container_id: &'a str) -> &'a str {
        self.containers
            .iter()
            .find(|c| c.id == container_id && !c.name.is_empty())
            .map_or(container_id, |c| c.name.as_str())
    }
}

impl ThService {
    /// Reload every collection.
    pub async fn load_collections(&self) -> Result<Collections, DatabaseError> {
        let collections = Collections {
            species: self.list_species().await?,
            animals: self.list_animals().await?,
            containers: self.list_containers().await?,
            slots: self.list_slots(None).await?,
            feeding_logs: self.list_feeding_logs(None).await?,
            weight_logs: self.list_weight_logs(None).await?,
            climate_logs: self.list_climate_logs(None).await?,
        };
        tracing::debug!(
            species = collections.species.len(),
            animals = collections.animals.len(),
            containers = collections.containers.len(),
            slots = collections.slots.len(),
            feeding_logs = collections.feeding_logs.len(),
            weight_logs = collections.weight_logs.len(),
            climate_logs = collections.climate_logs.len(),
            "collections reloaded"
        );
        Ok(collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_animal, seed_cabinet, seed_slot, seed_species, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn empty_database_loads_empty_collections() {
        let svc = test_service().await;
        let collections = svc.load_collections().await.unwrap();
        assert!(collections.species.is_empty());
        assert!(collections.animals.is_empty());
        assert!(collections.climate_logs.is_empty());
    }

    #[tokio::test]
    async fn reload_sees_every_mutation() {
        let svc = test_service().await;
        let species = seed_species(&svc, "玉米蛇").await;
        let cabinet = seed_cabinet(&svc, "A架").await;
        seed_slot(&svc, &cabinet.id, 0, 0).await;
        let animal = seed_animal(&svc, &species.id, "雪蛇", None, &["白化"]).await;

        let collections = svc.load_collections().await.unwrap();
        assert_eq!(collections.species.len(), 1);
        assert_eq!(collections.animals.len(), 1);
        assert_eq!(collections.slots.len(), 1);
        assert_eq!(collections.species_name(&species.id), "玉米蛇");
        assert_eq!(collections.animal_name(&animal.id), "雪蛇");
        assert_eq!(collections.container_name(&cabinet.id), "A架");
        assert_eq!(collections.species_name("spc-gone"), "spc-gone");

        svc.delete_animal(&animal.id).await.unwrap();
        let collections = svc.load_collections().await.unwrap();
        assert!(collections.animals.is_empty());
    }
}
