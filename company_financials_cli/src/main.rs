mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "company-financials")]
#[command(about = "Fetch revenue, market cap, industry and sector for listed companies into SQLite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch financials for every company in the source table
    Extract(commands::extract::ExtractArgs),
    /// Print stored financials
    Show(commands::show::ShowArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("company_financials_lib=info".parse()?)
                .add_directive("yahoo_fundamentals_api=warn".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract(args) => commands::extract::run(args).await?,
        Commands::Show(args) => commands::show::run(args)?,
    }

    Ok(())
}
