use anyhow::Context;
use clap::Parser;
use team_roster::cli::{self, Cli, Command};
use team_roster::infrastructure::logging::init_logging;
use team_roster::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    match cli.command {
        Command::Serve => cli::serve::run(&config).await,
        Command::Migrate => cli::migrate::run(&config).await,
        Command::Token(args) => cli::token::run(&config, &args),
    }
}
