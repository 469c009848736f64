//! Shared test utilities for th-db.

pub(crate) mod helpers {
    use th_core::entities::{Animal, HousingContainer, HousingSlot, SpeciesType};
    use th_core::enums::{ContainerKind, Sex};

    use crate::ThDb;
    use crate::repos::animal::NewAnimal;
    use crate::service::ThService;

    /// Create an in-memory `ThService`.
    pub async fn test_service() -> ThService {
        let db = ThDb::open_local(":memory:").await.unwrap();
        ThService::from_db(db)
    }

    pub async fn seed_species(svc: &ThService, name: &str) -> SpeciesType {
        svc.create_species(name).await.unwrap()
    }

    pub async fn seed_cabinet(svc: &ThService, name: &str) -> HousingContainer {
        svc.create_container(name, ContainerKind::Cabinet).await.unwrap()
    }

    pub async fn seed_slot(svc: &ThService, container_id: &str, column: u32, row: u32) -> HousingSlot {
        svc.create_slot(container_id, column, row).await.unwrap()
    }

    /// Create an animal with only the required fields plus sex and traits.
    pub async fn seed_animal(
        svc: &ThService,
        species_id: &str,
        name: &str,
        sex: Option<Sex>,
        traits: &[&str],
    ) -> Animal {
        svc.create_animal(NewAnimal {
            name: name.to_string(),
            sex,
            traits: traits.iter().map(|t| (*t).to_string()).collect(),
            species_id: species_id.to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
    }
}
