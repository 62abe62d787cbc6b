//! Promotions Records

use emporium::prelude::{PromotionDraft, PromotionType};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Store marker for [`StoreId`].
#[derive(Debug)]
pub enum Store {}

/// Store Id
pub type StoreId = TypedId<Store>;

/// Promotion Id
pub type PromotionId = TypedId<PromotionRecord>;

/// Promotion as stored by the marketplace API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    pub id: PromotionId,

    #[serde(flatten)]
    pub draft: PromotionDraft,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl PromotionRecord {
    /// Archetype of the stored promotion.
    #[must_use]
    pub const fn promotion_type(&self) -> PromotionType {
        self.draft.promotion_type()
    }
}

#[cfg(test)]
mod tests {
    use emporium::prelude::{Bucket, Method};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hydrates_draft_from_api_body() -> TestResult {
        let record: PromotionRecord = serde_json::from_value(serde_json::json!({
            "id": "promo_42",
            "type": "buy_x_get_y",
            "method": "AUTOMATIC",
            "quantityX": 2,
            "quantityY": 1,
            "getConditions": [{ "attribute": "tag", "operator": "in", "value": "socks" }],
            "createdAt": "2026-03-01T09:30:00Z"
        }))?;

        assert_eq!(record.id.as_str(), "promo_42");
        assert_eq!(record.promotion_type(), PromotionType::BuyXGetY);
        assert_eq!(record.draft.shared().method, Some(Method::Automatic));
        assert_eq!(
            record
                .draft
                .details()
                .product_conditions(Bucket::Get)
                .map(|conditions| conditions.len()),
            Some(1)
        );
        assert_eq!(
            record.created_at,
            Some("2026-03-01T09:30:00Z".parse::<Timestamp>()?)
        );
        assert_eq!(record.updated_at, None);

        Ok(())
    }
}
