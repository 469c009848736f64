use th_core::enums::Sex;
use th_db::updates::animal::{AnimalUpdate, AnimalUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalUpdateArgs;
use crate::commands::shared::parse::{nullable, parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &AnimalUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let update = build_update(args)?;
    let animal = ctx.service.update_animal(&args.id, update).await?;
    output(&animal, flags.format)
}

fn build_update(args: &AnimalUpdateArgs) -> anyhow::Result<AnimalUpdate> {
    validate_update_args(args)?;

    let mut builder = AnimalUpdateBuilder::new();
    if let Some(name) = &args.name {
        builder = builder.name(name.as_str());
    }
    if let Some(species) = &args.species {
        builder = builder.species_id(species.as_str());
    }
    if let Some(nickname) = &args.nickname {
        builder = builder.nickname(nullable(nickname).map(str::to_string));
    }
    if let Some(sex) = &args.sex {
        let sex = nullable(sex).map(|raw| parse_enum::<Sex>(raw, "sex")).transpose()?;
        builder = builder.sex(sex);
    }
    if args.clear_traits {
        builder = builder.traits(Vec::new());
    } else if !args.traits.is_empty() {
        builder = builder.traits(args.traits.clone());
    }
    if let Some(container) = &args.container {
        builder = builder.container_id(nullable(container).map(str::to_string));
    }
    if let Some(slot) = &args.slot {
        builder = builder.slot_id(nullable(slot).map(str::to_string));
    }
    if let Some(birth_date) = &args.birth_date {
        let date = nullable(birth_date)
            .map(|raw| parse_date(raw, "birth date"))
            .transpose()?;
        builder = builder.birth_date(date);
    }
    if let Some(weight) = &args.weight {
        let weight = nullable(weight)
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|error| anyhow::anyhow!("invalid weight '{raw}': {error}"))
            })
            .transpose()?;
        builder = builder.weight(weight);
    }

    Ok(builder.build())
}

fn validate_update_args(args: &AnimalUpdateArgs) -> anyhow::Result<()> {
    if args.name.is_none()
        && args.species.is_none()
        && args.nickname.is_none()
        && args.sex.is_none()
        && args.traits.is_empty()
        && !args.clear_traits
        && args.container.is_none()
        && args.slot.is_none()
        && args.birth_date.is_none()
        && args.weight.is_none()
    {
        anyhow::bail!(
            "At least one of --name, --species, --nickname, --sex, --trait, --clear-traits, \
             --container, --slot, --birth-date, or --weight must be provided"
        );
    }
    Ok(())
}
