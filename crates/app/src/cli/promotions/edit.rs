use clap::Args;

use emporium::prelude::{ValidationMode, Wizard};
use emporium_app::{
    config::ApiConfig,
    promotions::{
        PromotionsService,
        records::{PromotionId, PromotionRecord, StoreId},
    },
    script::WizardScript,
};

use super::{ScriptArgs, connect, render_record};

#[derive(Debug, Args)]
pub(crate) struct EditPromotionArgs {
    #[command(flatten)]
    api: ApiConfig,

    /// Store that owns the promotion
    #[arg(long)]
    store: StoreId,

    /// Promotion to edit
    #[arg(long)]
    promotion: PromotionId,

    #[command(flatten)]
    script: ScriptArgs,
}

pub(crate) async fn run(args: EditPromotionArgs) -> Result<(), String> {
    let service = connect(&args.api)?;
    let script = args.script.load()?;

    let record = execute(
        &service,
        args.store,
        args.promotion,
        &script,
        args.script.mode(),
    )
    .await?;

    println!("{}", render_record(&record)?);

    Ok(())
}

/// Hydrate the stored promotion, enter the wizard on the details step and
/// replay the script over it.
async fn execute(
    service: &dyn PromotionsService,
    store: StoreId,
    promotion: PromotionId,
    script: &WizardScript,
    mode: ValidationMode,
) -> Result<PromotionRecord, String> {
    let existing = service
        .get_promotion(store.clone(), promotion.clone())
        .await
        .map_err(|error| format!("failed to load promotion {promotion}: {error}"))?;

    let mut wizard = Wizard::editing(existing.draft, mode);

    let draft = script
        .run(&mut wizard)
        .map_err(|error| error.to_string())?;

    service
        .update_promotion(store, promotion, draft)
        .await
        .map_err(|error| format!("failed to update promotion: {error}"))
}

#[cfg(test)]
mod tests {
    use emporium::prelude::{FieldChange, Method, PromotionDraft, PromotionType};
    use emporium_app::promotions::{MockPromotionsService, PromotionsServiceError};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn stored(draft: PromotionDraft) -> PromotionRecord {
        PromotionRecord {
            id: PromotionId::new("promo_3"),
            draft,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn replays_script_over_stored_promotion() -> TestResult {
        let existing = PromotionDraft::new(PromotionType::PercentOrder)
            .with_change(FieldChange::Method(Method::Code))?
            .with_change(FieldChange::Code("SPRING".to_string()))?
            .with_change(FieldChange::Percentage(Some(Decimal::TEN)))?;

        let expected = existing.with_change(FieldChange::Percentage(Some(Decimal::from(15))))?;

        let script = WizardScript::parse(
            r"
- action: set
  field: percentage
  value: 15
",
        )?;

        let mut service = MockPromotionsService::new();

        service
            .expect_get_promotion()
            .once()
            .withf(|store, promotion| store.as_str() == "st_1" && promotion.as_str() == "promo_3")
            .return_once(move |_, _| Ok(stored(existing)));

        service
            .expect_update_promotion()
            .once()
            .withf(move |_, promotion, draft| promotion.as_str() == "promo_3" && *draft == expected)
            .returning(|_, _, draft| Ok(stored(draft)));

        let record = execute(
            &service,
            StoreId::new("st_1"),
            PromotionId::new("promo_3"),
            &script,
            ValidationMode::Strict,
        )
        .await?;

        assert_eq!(record.draft.shared().effective_code(), Some("SPRING"));

        Ok(())
    }

    #[tokio::test]
    async fn missing_promotion_is_not_updated() -> TestResult {
        let script = WizardScript::parse("[]")?;
        let mut service = MockPromotionsService::new();

        service
            .expect_get_promotion()
            .once()
            .returning(|_, _| Err(PromotionsServiceError::NotFound));

        service.expect_update_promotion().never();

        let result = execute(
            &service,
            StoreId::new("st_1"),
            PromotionId::new("gone"),
            &script,
            ValidationMode::Permissive,
        )
        .await;

        assert_eq!(
            result.err(),
            Some("failed to load promotion gone: promotion not found".to_string())
        );

        Ok(())
    }
}
