use th_core::enums::Sex;
use th_db::repos::animal::NewAnimal;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnimalCreateArgs;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &AnimalCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = NewAnimal {
        name: args.name.clone(),
        nickname: args.nickname.clone(),
        sex: args
            .sex
            .as_deref()
            .map(|raw| parse_enum::<Sex>(raw, "sex"))
            .transpose()?,
        traits: args.traits.clone(),
        species_id: args.species.clone(),
        container_id: args.container.clone(),
        slot_id: args.slot.clone(),
        birth_date: args
            .birth_date
            .as_deref()
            .map(|raw| parse_date(raw, "birth date"))
            .transpose()?,
        weight: args.weight,
    };

    let animal = ctx.service.create_animal(input).await?;
    output(&animal, flags.format)
}
