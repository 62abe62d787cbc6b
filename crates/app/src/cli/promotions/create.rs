use clap::Args;

use emporium::prelude::Wizard;
use emporium_app::{
    config::ApiConfig,
    promotions::{
        PromotionsService,
        records::{PromotionRecord, StoreId},
    },
    script::WizardScript,
};
use tracing::info;

use super::{ScriptArgs, connect, render_record};

#[derive(Debug, Args)]
pub(crate) struct CreatePromotionArgs {
    #[command(flatten)]
    api: ApiConfig,

    /// Store that owns the promotion
    #[arg(long)]
    store: StoreId,

    #[command(flatten)]
    script: ScriptArgs,
}

pub(crate) async fn run(args: CreatePromotionArgs) -> Result<(), String> {
    let service = connect(&args.api)?;
    let script = args.script.load()?;
    let mut wizard = Wizard::new(args.script.mode());

    let record = execute(&service, args.store, &script, &mut wizard).await?;

    println!("{}", render_record(&record)?);

    Ok(())
}

async fn execute(
    service: &dyn PromotionsService,
    store: StoreId,
    script: &WizardScript,
    wizard: &mut Wizard,
) -> Result<PromotionRecord, String> {
    let draft = script.run(wizard).map_err(|error| error.to_string())?;

    info!(store_id = %store, promotion_type = %draft.promotion_type(), "submitting promotion");

    service
        .create_promotion(store, draft)
        .await
        .map_err(|error| format!("failed to create promotion: {error}"))
}

#[cfg(test)]
mod tests {
    use emporium::prelude::{PromotionType, ValidationMode};
    use emporium_app::promotions::{
        MockPromotionsService, PromotionsServiceError, records::PromotionId,
    };
    use testresult::TestResult;

    use super::*;

    const SCRIPT: &str = r"
- action: select_type
  type: fixed_order
- action: continue
- action: set
  field: method
  value: CODE
- action: set
  field: code
  value: WELCOME5
- action: set
  field: currency
  value: eur
- action: set
  field: promotionValue
  value: 5
";

    #[tokio::test]
    async fn submits_replayed_draft() -> TestResult {
        let script = WizardScript::parse(SCRIPT)?;
        let mut service = MockPromotionsService::new();

        service
            .expect_create_promotion()
            .once()
            .withf(|store, draft| {
                store.as_str() == "st_9"
                    && draft.promotion_type() == PromotionType::FixedOrder
                    && draft.shared().effective_code() == Some("WELCOME5")
            })
            .returning(|_, draft| {
                Ok(PromotionRecord {
                    id: PromotionId::new("promo_7"),
                    draft,
                    created_at: None,
                    updated_at: None,
                })
            });

        service.expect_update_promotion().never();

        let mut wizard = Wizard::new(ValidationMode::Strict);
        let record = execute(&service, StoreId::new("st_9"), &script, &mut wizard).await?;

        assert_eq!(record.id.as_str(), "promo_7");

        Ok(())
    }

    #[tokio::test]
    async fn strict_mode_stops_before_submitting() -> TestResult {
        let script = WizardScript::parse(
            r"
- action: select_type
  type: fixed_order
- action: continue
",
        )?;
        let mut service = MockPromotionsService::new();

        service.expect_create_promotion().never();

        let mut wizard = Wizard::new(ValidationMode::Strict);
        let result = execute(&service, StoreId::new("st_9"), &script, &mut wizard).await;

        assert!(matches!(result, Err(message) if message.contains("method is required")));

        Ok(())
    }

    #[tokio::test]
    async fn api_rejection_is_reported() -> TestResult {
        let script = WizardScript::parse(SCRIPT)?;
        let mut service = MockPromotionsService::new();

        service
            .expect_create_promotion()
            .once()
            .returning(|_, _| Err(PromotionsServiceError::Rejected("code taken".to_string())));

        let mut wizard = Wizard::default();
        let result = execute(&service, StoreId::new("st_9"), &script, &mut wizard).await;

        assert_eq!(
            result.err(),
            Some("failed to create promotion: promotion rejected: code taken".to_string())
        );

        Ok(())
    }
}
