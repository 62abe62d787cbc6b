use std::path::PathBuf;

use clap::{Args, Subcommand};

use emporium::prelude::ValidationMode;
use emporium_app::{
    api::{ApiClient, ApiClientConfig},
    config::ApiConfig,
    promotions::{HttpPromotionsService, records::PromotionRecord},
    script::WizardScript,
};

mod create;
mod delete;
mod edit;
mod list;
mod preview;
mod types;

#[derive(Debug, Args)]
pub(crate) struct PromotionsCommand {
    #[command(subcommand)]
    command: PromotionsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromotionsSubcommand {
    /// List the promotion archetypes
    Types(types::TypesArgs),

    /// Replay a wizard script and print the payload without submitting it
    Preview(preview::PreviewArgs),

    /// Replay a wizard script and create the promotion
    Create(create::CreatePromotionArgs),

    /// Load a promotion, replay a wizard script over it and save it
    Edit(edit::EditPromotionArgs),

    /// List a store's promotions
    List(list::ListPromotionsArgs),

    /// Delete a promotion
    Delete(delete::DeletePromotionArgs),
}

pub(crate) async fn run(command: PromotionsCommand) -> Result<(), String> {
    match command.command {
        PromotionsSubcommand::Types(args) => types::run(&args),
        PromotionsSubcommand::Preview(args) => preview::run(&args),
        PromotionsSubcommand::Create(args) => create::run(args).await,
        PromotionsSubcommand::Edit(args) => edit::run(args).await,
        PromotionsSubcommand::List(args) => list::run(args).await,
        PromotionsSubcommand::Delete(args) => delete::run(args).await,
    }
}

/// Wizard script options shared by the scripted commands.
#[derive(Debug, Args)]
pub(crate) struct ScriptArgs {
    /// YAML file of wizard events
    #[arg(long)]
    script: PathBuf,

    /// Block incomplete drafts instead of leaving validation to the API
    #[arg(long)]
    strict: bool,
}

impl ScriptArgs {
    pub(crate) fn load(&self) -> Result<WizardScript, String> {
        WizardScript::load(&self.script).map_err(|error| error.to_string())
    }

    pub(crate) const fn mode(&self) -> ValidationMode {
        if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Permissive
        }
    }
}

pub(crate) fn connect(config: &ApiConfig) -> Result<HttpPromotionsService, String> {
    let token = config
        .access_token()
        .map_err(|error| format!("failed to resolve access token: {error}"))?;

    let api = ApiClient::new(ApiClientConfig {
        base_url: config.api_url.clone(),
        token,
        timeout: config.timeout(),
    })
    .map_err(|error| format!("failed to build API client: {error}"))?;

    Ok(HttpPromotionsService::new(api))
}

pub(crate) fn render_record(record: &PromotionRecord) -> Result<String, String> {
    serde_json::to_string_pretty(record)
        .map_err(|error| format!("failed to render promotion: {error}"))
}
