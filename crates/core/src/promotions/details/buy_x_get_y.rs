//! Buy X Get Y

use serde::{Deserialize, Serialize};

use crate::promotions::{
    attributes::{EligibilityAttribute, ProductAttribute},
    conditions::ConditionList,
    details::render_optional,
    draft::{DraftField, FieldChange},
};

/// Buy `quantity_x` qualifying items, get `quantity_y` items discounted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyXGetYDetails {
    /// Items that must be bought.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_x: Option<u32>,

    /// Items that are discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_y: Option<u32>,

    /// Who may redeem.
    #[serde(default)]
    pub usage_conditions: ConditionList<EligibilityAttribute>,

    /// Products counted towards `quantity_x`.
    #[serde(default)]
    pub buy_conditions: ConditionList<ProductAttribute>,

    /// Products eligible as the discounted `quantity_y`.
    #[serde(default)]
    pub get_conditions: ConditionList<ProductAttribute>,
}

impl BuyXGetYDetails {
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        match change {
            FieldChange::QuantityX(quantity) => self.quantity_x = *quantity,
            FieldChange::QuantityY(quantity) => self.quantity_y = *quantity,
            _ => return false,
        }

        true
    }

    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        match field {
            DraftField::QuantityX => Some(render_optional(self.quantity_x.as_ref())),
            DraftField::QuantityY => Some(render_optional(self.quantity_y.as_ref())),
            _ => None,
        }
    }
}
