use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Species { action } => commands::species::handle(&action, ctx, flags).await,
        Commands::Animal { action } => commands::animal::handle(&action, ctx, flags).await,
        Commands::Container { action } => commands::container::handle(&action, ctx, flags).await,
        Commands::Slot { action } => commands::slot::handle(&action, ctx, flags).await,
        Commands::Feeding { action } => commands::logs::feeding::handle(&action, ctx, flags).await,
        Commands::Weight { action } => commands::logs::weight::handle(&action, ctx, flags).await,
        Commands::Climate { action } => commands::logs::climate::handle(&action, ctx, flags).await,
        Commands::Chart { action } => commands::chart::handle(&action, ctx, flags).await,
        Commands::Cabinet(args) => commands::cabinet::handle(&args, ctx, flags).await,
        Commands::Options { kind } => commands::options::handle(kind, ctx, flags).await,
        Commands::Sync => commands::sync::handle(ctx, flags).await,
        Commands::Init(_) | Commands::Schema(_) => {
            unreachable!("init/schema are pre-dispatched in main")
        }
    }
}
