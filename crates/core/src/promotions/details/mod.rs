//! Promotion Details
//!
//! One form per archetype. Each variant carries only the scalar fields and
//! condition buckets that mean something for its archetype.

use serde::{Deserialize, Serialize};

use crate::promotions::{
    PromotionType,
    attributes::{EligibilityAttribute, ProductAttribute},
    buckets::Bucket,
    conditions::ConditionList,
    draft::{DraftField, FieldChange},
};

mod buy_x_get_y;
mod fixed_order;
mod fixed_product;
mod percent_order;
mod percent_product;

pub use buy_x_get_y::BuyXGetYDetails;
pub use fixed_order::FixedOrderDetails;
pub use fixed_product::FixedProductDetails;
pub use percent_order::PercentOrderDetails;
pub use percent_product::PercentProductDetails;

/// Archetype-specific details, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionDetails {
    /// Fixed amount off products.
    FixedProduct(FixedProductDetails),

    /// Fixed amount off the order.
    FixedOrder(FixedOrderDetails),

    /// Percentage off products.
    PercentProduct(PercentProductDetails),

    /// Percentage off the order.
    PercentOrder(PercentOrderDetails),

    /// Buy X get Y.
    #[serde(rename = "buy_x_get_y")]
    BuyXGetY(BuyXGetYDetails),
}

impl PromotionDetails {
    /// Empty details for an archetype.
    #[must_use]
    pub fn empty(promotion_type: PromotionType) -> Self {
        match promotion_type {
            PromotionType::FixedProduct => Self::FixedProduct(FixedProductDetails::default()),
            PromotionType::FixedOrder => Self::FixedOrder(FixedOrderDetails::default()),
            PromotionType::PercentProduct => {
                Self::PercentProduct(PercentProductDetails::default())
            }
            PromotionType::PercentOrder => Self::PercentOrder(PercentOrderDetails::default()),
            PromotionType::BuyXGetY => Self::BuyXGetY(BuyXGetYDetails::default()),
        }
    }

    /// Archetype of these details.
    #[must_use]
    pub const fn promotion_type(&self) -> PromotionType {
        match self {
            Self::FixedProduct(_) => PromotionType::FixedProduct,
            Self::FixedOrder(_) => PromotionType::FixedOrder,
            Self::PercentProduct(_) => PromotionType::PercentProduct,
            Self::PercentOrder(_) => PromotionType::PercentOrder,
            Self::BuyXGetY(_) => PromotionType::BuyXGetY,
        }
    }

    /// Eligibility bucket, when this archetype composes it.
    #[must_use]
    pub fn eligibility_conditions(
        &self,
        bucket: Bucket,
    ) -> Option<&ConditionList<EligibilityAttribute>> {
        match (self, bucket) {
            (Self::FixedProduct(details), Bucket::Who) => Some(&details.who_conditions),
            (Self::FixedOrder(details), Bucket::Who) => Some(&details.who_conditions),
            (Self::PercentProduct(details), Bucket::Usage) => Some(&details.usage_conditions),
            (Self::PercentOrder(details), Bucket::Usage) => Some(&details.usage_conditions),
            (Self::BuyXGetY(details), Bucket::Usage) => Some(&details.usage_conditions),
            _ => None,
        }
    }

    /// Product bucket, when this archetype composes it.
    #[must_use]
    pub fn product_conditions(&self, bucket: Bucket) -> Option<&ConditionList<ProductAttribute>> {
        match (self, bucket) {
            (Self::FixedProduct(details), Bucket::What) => Some(&details.what_conditions),
            (Self::PercentProduct(details), Bucket::Item) => Some(&details.item_conditions),
            (Self::BuyXGetY(details), Bucket::Buy) => Some(&details.buy_conditions),
            (Self::BuyXGetY(details), Bucket::Get) => Some(&details.get_conditions),
            _ => None,
        }
    }

    pub(crate) fn eligibility_conditions_mut(
        &mut self,
        bucket: Bucket,
    ) -> Option<&mut ConditionList<EligibilityAttribute>> {
        match (self, bucket) {
            (Self::FixedProduct(details), Bucket::Who) => Some(&mut details.who_conditions),
            (Self::FixedOrder(details), Bucket::Who) => Some(&mut details.who_conditions),
            (Self::PercentProduct(details), Bucket::Usage) => Some(&mut details.usage_conditions),
            (Self::PercentOrder(details), Bucket::Usage) => Some(&mut details.usage_conditions),
            (Self::BuyXGetY(details), Bucket::Usage) => Some(&mut details.usage_conditions),
            _ => None,
        }
    }

    pub(crate) fn product_conditions_mut(
        &mut self,
        bucket: Bucket,
    ) -> Option<&mut ConditionList<ProductAttribute>> {
        match (self, bucket) {
            (Self::FixedProduct(details), Bucket::What) => Some(&mut details.what_conditions),
            (Self::PercentProduct(details), Bucket::Item) => Some(&mut details.item_conditions),
            (Self::BuyXGetY(details), Bucket::Buy) => Some(&mut details.buy_conditions),
            (Self::BuyXGetY(details), Bucket::Get) => Some(&mut details.get_conditions),
            _ => None,
        }
    }

    /// Apply an archetype-specific change; `false` when the field does not
    /// exist on this archetype.
    pub(crate) fn apply(&mut self, change: &FieldChange) -> bool {
        match self {
            Self::FixedProduct(details) => details.apply(change),
            Self::FixedOrder(details) => details.apply(change),
            Self::PercentProduct(details) => details.apply(change),
            Self::PercentOrder(details) => details.apply(change),
            Self::BuyXGetY(details) => details.apply(change),
        }
    }

    /// Rendered value of an archetype-specific field; `None` when the field
    /// does not exist on this archetype.
    pub(crate) fn render(&self, field: DraftField) -> Option<String> {
        match self {
            Self::FixedProduct(details) => details.render(field),
            Self::FixedOrder(details) => details.render(field),
            Self::PercentProduct(details) => details.render(field),
            Self::PercentOrder(details) => details.render(field),
            Self::BuyXGetY(details) => details.render(field),
        }
    }
}

pub(crate) fn render_optional<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
