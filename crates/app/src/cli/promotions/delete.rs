use clap::Args;

use emporium_app::{
    config::ApiConfig,
    promotions::{
        PromotionsService,
        records::{PromotionId, StoreId},
    },
};

use super::connect;

#[derive(Debug, Args)]
pub(crate) struct DeletePromotionArgs {
    #[command(flatten)]
    api: ApiConfig,

    /// Store that owns the promotion
    #[arg(long)]
    store: StoreId,

    /// Promotion to delete
    #[arg(long)]
    promotion: PromotionId,
}

pub(crate) async fn run(args: DeletePromotionArgs) -> Result<(), String> {
    let service = connect(&args.api)?;

    service
        .delete_promotion(args.store, args.promotion.clone())
        .await
        .map_err(|error| format!("failed to delete promotion: {error}"))?;

    println!("deleted promotion {}", args.promotion);

    Ok(())
}
