//! Percentage Off Order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::promotions::{
    attributes::EligibilityAttribute,
    conditions::ConditionList,
    details::render_optional,
    draft::{DraftField, FieldChange},
    numbers,
};

/// Percentage off the order total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentOrderDetails {
    /// Percentage taken off, `20` meaning 20%.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "numbers::serialize_option"
    )]
    pub percentage: Option<Decimal>,

    /// Who may redeem.
    #[serde(default)]
    pub usage_conditions: ConditionList<EligibilityAttribute>,
}

impl PercentOrderDetails {
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        if let FieldChange::Percentage(percentage) = change {
            self.percentage = *percentage;

            return true;
        }

        false
    }

    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        (field == DraftField::Percentage).then(|| render_optional(self.percentage.as_ref()))
    }
}
