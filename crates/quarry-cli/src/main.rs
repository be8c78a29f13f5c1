use anyhow::Result;
use clap::Parser;
use quarry_cli::cli::{Cli, Commands};
use quarry_cli::{commands, factories, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = factories::load_config(&cli)?;
    logging::init(&cli, &config.logging);

    tracing::debug!(command = ?cli.command, "Dispatching");

    match cli.command {
        Commands::Ask {
            question,
            history,
            json,
        } => commands::ask::execute(config, question, history, json).await,
        Commands::Chat => commands::chat::execute(config).await,
        Commands::Schema => commands::schema::execute(config).await,
        Commands::Serve { host, port } => commands::serve::execute(config, host, port).await,
    }
}
