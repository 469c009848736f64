use th_core::entities::Animal;
use th_db::repos::collections::Collections;
use th_view::dedup::{FilterOption, options_from};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OptionKind;
use crate::context::AppContext;
use crate::output::output;

/// Handle `th options`.
pub async fn handle(kind: OptionKind, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let collections = ctx.service.load_collections().await?;
    output(&build_options(kind, &collections)?, flags.format)
}

/// Dropdown options for one animal filter, deduplicated, in first-seen order.
fn build_options(kind: OptionKind, collections: &Collections) -> anyhow::Result<Vec<FilterOption>> {
    let animals: &[Animal] = &collections.animals;
    let options = match kind {
        OptionKind::Species => options_from(animals, |animal| {
            Some(FilterOption::new(
                collections.species_name(&animal.species_id),
                animal.species_id.as_str(),
            ))
        })?,
        OptionKind::Name => options_from(animals, |animal| {
            (!animal.name.is_empty()).then(|| FilterOption::new(animal.name.as_str(), animal.name.as_str()))
        })?,
        OptionKind::Sex => options_from(animals, |animal| {
            animal.sex.map(|sex| FilterOption::new(sex.label(), sex.as_str()))
        })?,
        OptionKind::Container => options_from(animals, |animal| {
            animal
                .container_id
                .as_deref()
                .map(|id| FilterOption::new(collections.container_name(id), id))
        })?,
    };
    Ok(options)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use th_core::entities::{Animal, SpeciesType};
    use th_core::enums::Sex;
    use th_db::repos::collections::Collections;
    use th_view::dedup::FilterOption;

    use super::build_options;
    use crate::cli::subcommands::OptionKind;

    fn animal(id: &str, species_id: &str, name: &str, sex: Option<Sex>, container: Option<&str>) -> Animal {
        Animal {
            id: id.to_string(),
            name: name.to_string(),
            nickname: None,
            sex,
            traits: Vec::new(),
            species_id: species_id.to_string(),
            container_id: container.map(str::to_string),
            slot_id: None,
            birth_date: None,
            weight: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn collections() -> Collections {
        Collections {
            species: vec![SpeciesType {
                id: String::from("spc-1"),
                name: String::from("玉米蛇"),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }],
            animals: vec![
                animal("ani-1", "spc-1", "雪蛇", Some(Sex::Male), Some("hsg-1")),
                animal("ani-2", "spc-2", "香蕉", None, None),
                animal("ani-3", "spc-1", "雪蛇", Some(Sex::Male), Some("hsg-1")),
            ],
            ..Collections::default()
        }
    }

    #[test]
    fn species_options_fall_back_to_id() {
        let options = build_options(OptionKind::Species, &collections()).expect("options");
        assert_eq!(
            options,
            vec![FilterOption::new("玉米蛇", "spc-1"), FilterOption::new("spc-2", "spc-2")]
        );
    }

    #[test]
    fn names_are_deduplicated() {
        let options = build_options(OptionKind::Name, &collections()).expect("options");
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn unknown_sex_and_missing_container_contribute_nothing() {
        let sex = build_options(OptionKind::Sex, &collections()).expect("options");
        assert_eq!(sex, vec![FilterOption::new("公", "male")]);

        let containers = build_options(OptionKind::Container, &collections()).expect("options");
        assert_eq!(containers, vec![FilterOption::new("hsg-1", "hsg-1")]);
    }
}
