//! Fixed Amount Off Order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::promotions::{
    attributes::EligibilityAttribute,
    conditions::ConditionList,
    details::render_optional,
    draft::{DraftField, FieldChange},
    numbers,
};

/// Fixed amount off the order total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedOrderDetails {
    /// Amount taken off, in major currency units.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "numbers::serialize_option"
    )]
    pub promotion_value: Option<Decimal>,

    /// Who may redeem.
    #[serde(default)]
    pub who_conditions: ConditionList<EligibilityAttribute>,
}

impl FixedOrderDetails {
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        if let FieldChange::PromotionValue(value) = change {
            self.promotion_value = *value;

            return true;
        }

        false
    }

    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        (field == DraftField::PromotionValue).then(|| render_optional(self.promotion_value.as_ref()))
    }
}
