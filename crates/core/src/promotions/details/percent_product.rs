//! Percentage Off Products

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

/// Percentage off matching products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentProductDetails {
    /// Percentage taken off, `20` meaning 20%.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "numbers::serialize_option"
    )]
    pub percentage: Option<Decimal>,

    /// Per item or once per order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation>,

    /// Cap on discounted line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,

    /// Who may redeem.
    #[serde(default)]
    pub usage_conditions: ConditionList<EligibilityAttribute>,

    /// Which products qualify.
    #[serde(default)]
    pub item_conditions: ConditionList<ProductAttribute>,
}

impl PercentProductDetails {
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        match change {
            FieldChange::Percentage(percentage) => self.percentage = *percentage,
            FieldChange::Allocation(allocation) => self.allocation = Some(*allocation),
            FieldChange::MaxQuantity(quantity) => self.max_quantity = *quantity,
            _ => return false,
        }

        true
    }

    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        match field {
            DraftField::Percentage => Some(render_optional(self.percentage.as_ref())),
            DraftField::Allocation => Some(render_optional(
                self.allocation.map(Allocation::as_str).as_ref(),
            )),
            DraftField::MaxQuantity => Some(render_optional(self.max_quantity.as_ref())),
            _ => None,
        }
    }
}
