use clap::{Parser, Subcommand};

use emporium_app::config::LoggingConfig;

mod promotions;

#[derive(Debug, Parser)]
#[command(name = "emporium-app", about = "Emporium promotion builder", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Promotions(promotions::PromotionsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Promotions(command) => promotions::run(command).await,
        }
    }
}
