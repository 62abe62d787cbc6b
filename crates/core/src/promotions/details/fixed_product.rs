//! Fixed Amount Off Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::promotions::{
    Allocation,
    attributes::{EligibilityAttribute, ProductAttribute},
    conditions::ConditionList,
    details::render_optional,
    draft::{DraftField, FieldChange},
    numbers,
};

/// Fixed amount off matching products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedProductDetails {
    /// Amount taken off, in major currency units.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "numbers::serialize_option"
    )]
    pub promotion_value: Option<Decimal>,

    /// Per item or once per order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation>,

    /// Cap on discounted line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,

    /// Who may redeem.
    #[serde(default)]
    pub who_conditions: ConditionList<EligibilityAttribute>,

    /// Which products qualify.
    #[serde(default)]
    pub what_conditions: ConditionList<ProductAttribute>,
}

impl FixedProductDetails {
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        match change {
            FieldChange::PromotionValue(value) => self.promotion_value = *value,
            FieldChange::Allocation(allocation) => self.allocation = Some(*allocation),
            FieldChange::MaxQuantity(quantity) => self.max_quantity = *quantity,
            _ => return false,
        }

        true
    }

    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        match field {
            DraftField::PromotionValue => Some(render_optional(self.promotion_value.as_ref())),
            DraftField::Allocation => Some(render_optional(
                self.allocation.map(Allocation::as_str).as_ref(),
            )),
            DraftField::MaxQuantity => Some(render_optional(self.max_quantity.as_ref())),
            _ => None,
        }
    }
}
