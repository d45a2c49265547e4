use anyhow::Result;
use clap::Parser;
use sunset_dashboard::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    sunset_dashboard::run(cli).await
}
