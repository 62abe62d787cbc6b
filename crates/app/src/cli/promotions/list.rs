use clap::Args;
use tabled::{Table, Tabled, settings::Style};

use emporium_app::{
    config::ApiConfig,
    promotions::{
        PromotionsService,
        records::{PromotionRecord, StoreId},
    },
};

use super::connect;

#[derive(Debug, Args)]
pub(crate) struct ListPromotionsArgs {
    #[command(flatten)]
    api: ApiConfig,

    /// Store whose promotions should be listed
    #[arg(long)]
    store: StoreId,
}

#[derive(Debug, Tabled)]
struct PromotionRow {
    id: String,

    #[tabled(rename = "type")]
    promotion_type: &'static str,

    method: String,

    code: String,

    status: String,

    created_at: String,
}

impl From<&PromotionRecord> for PromotionRow {
    fn from(record: &PromotionRecord) -> Self {
        let shared = record.draft.shared();

        Self {
            id: record.id.to_string(),
            promotion_type: record.promotion_type().as_str(),
            method: shared
                .method
                .map_or_else(|| "-".to_string(), |method| method.as_str().to_string()),
            code: shared.effective_code().unwrap_or("-").to_string(),
            status: shared
                .status
                .map_or_else(|| "-".to_string(), |status| status.as_str().to_string()),
            created_at: record
                .created_at
                .map_or_else(|| "-".to_string(), |value| value.to_string()),
        }
    }
}

pub(crate) async fn run(args: ListPromotionsArgs) -> Result<(), String> {
    let service = connect(&args.api)?;

    println!("{}", execute(&service, args.store).await?);

    Ok(())
}

async fn execute(service: &dyn PromotionsService, store: StoreId) -> Result<String, String> {
    let records = service
        .list_promotions(store.clone())
        .await
        .map_err(|error| format!("failed to list promotions: {error}"))?;

    if records.is_empty() {
        return Ok(format!("no promotions found for store {store}"));
    }

    let mut table = Table::new(records.iter().map(PromotionRow::from));

    table.with(Style::modern_rounded());

    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use emporium::prelude::{FieldChange, Method, PromotionDraft, PromotionType};
    use emporium_app::promotions::{MockPromotionsService, records::PromotionId};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn renders_one_row_per_promotion() -> TestResult {
        let draft = PromotionDraft::new(PromotionType::FixedProduct)
            .with_change(FieldChange::Method(Method::Code))?
            .with_change(FieldChange::Code("SHOES10".to_string()))?;

        let mut service = MockPromotionsService::new();

        service
            .expect_list_promotions()
            .once()
            .return_once(move |_| {
                Ok(vec![PromotionRecord {
                    id: PromotionId::new("promo_1"),
                    draft,
                    created_at: None,
                    updated_at: None,
                }])
            });

        let output = execute(&service, StoreId::new("st_1")).await?;

        assert!(output.contains("promo_1"));
        assert!(output.contains("fixed_product"));
        assert!(output.contains("SHOES10"));

        Ok(())
    }

    #[tokio::test]
    async fn empty_store_has_friendly_message() -> TestResult {
        let mut service = MockPromotionsService::new();

        service
            .expect_list_promotions()
            .once()
            .returning(|_| Ok(Vec::new()));

        assert_eq!(
            execute(&service, StoreId::new("st_2")).await?,
            "no promotions found for store st_2"
        );

        Ok(())
    }
}
