//! Promotions

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotions::{buckets::Bucket, draft::DraftField};

pub mod attributes;
pub mod buckets;
pub mod conditions;
pub mod currency;
pub mod details;
pub mod draft;
mod numbers;
pub mod validation;

/// Promotion archetype, chosen on the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    /// Fixed amount off matching products.
    FixedProduct,

    /// Fixed amount off the order total.
    FixedOrder,

    /// Percentage off matching products.
    PercentProduct,

    /// Percentage off the order total.
    PercentOrder,

    /// Buy a quantity of some products, get a quantity of others.
    #[serde(rename = "buy_x_get_y")]
    BuyXGetY,
}

impl PromotionType {
    /// Every archetype, in the order the type step lists them.
    pub const ALL: [Self; 5] = [
        Self::FixedProduct,
        Self::FixedOrder,
        Self::PercentProduct,
        Self::PercentOrder,
        Self::BuyXGetY,
    ];

    /// Wire name, as sent in the payload `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FixedProduct => "fixed_product",
            Self::FixedOrder => "fixed_order",
            Self::PercentProduct => "percent_product",
            Self::PercentOrder => "percent_order",
            Self::BuyXGetY => "buy_x_get_y",
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FixedProduct => "Amount off products",
            Self::FixedOrder => "Amount off order",
            Self::PercentProduct => "Percentage off products",
            Self::PercentOrder => "Percentage off order",
            Self::BuyXGetY => "Buy X get Y",
        }
    }

    /// One-line description shown under the label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FixedProduct => "Discount specific products or collections by a fixed amount.",
            Self::FixedOrder => "Take a fixed amount off the whole order.",
            Self::PercentProduct => "Discount specific products or collections by a percentage.",
            Self::PercentOrder => "Take a percentage off the whole order.",
            Self::BuyXGetY => "Customers who buy a set quantity of items get others discounted.",
        }
    }

    /// Scalar fields shown on this archetype's details form, in display order.
    #[must_use]
    pub const fn fields(self) -> &'static [DraftField] {
        use DraftField::{
            Allocation, Code, Currency, IncludeTaxes, MaxQuantity, Method, Percentage,
            PromotionValue, QuantityX, QuantityY, Status,
        };

        match self {
            Self::FixedProduct => &[
                Method,
                Code,
                Status,
                IncludeTaxes,
                Currency,
                PromotionValue,
                Allocation,
                MaxQuantity,
            ],
            Self::FixedOrder => &[Method, Code, Status, IncludeTaxes, Currency, PromotionValue],
            Self::PercentProduct => &[
                Method,
                Code,
                Status,
                IncludeTaxes,
                Currency,
                Percentage,
                Allocation,
                MaxQuantity,
            ],
            Self::PercentOrder => &[Method, Code, Status, IncludeTaxes, Currency, Percentage],
            Self::BuyXGetY => &[
                Method,
                Code,
                Status,
                IncludeTaxes,
                Currency,
                QuantityX,
                QuantityY,
            ],
        }
    }

    /// Condition buckets composed by this archetype's details form.
    #[must_use]
    pub const fn buckets(self) -> &'static [Bucket] {
        match self {
            Self::FixedProduct => &[Bucket::Who, Bucket::What],
            Self::FixedOrder => &[Bucket::Who],
            Self::PercentProduct => &[Bucket::Usage, Bucket::Item],
            Self::PercentOrder => &[Bucket::Usage],
            Self::BuyXGetY => &[Bucket::Usage, Bucket::Buy, Bucket::Get],
        }
    }

    /// Whether the archetype carries a field.
    #[must_use]
    pub fn has_field(self, field: DraftField) -> bool {
        self.fields().contains(&field)
    }

    /// Whether the archetype composes a bucket.
    #[must_use]
    pub fn has_bucket(self, bucket: Bucket) -> bool {
        self.buckets().contains(&bucket)
    }
}

impl Display for PromotionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    /// What was being parsed.
    pub kind: &'static str,

    /// The rejected text.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for PromotionType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|promotion_type| promotion_type.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("promotion type", value))
    }
}

/// How a promotion is redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    /// Customer enters a code at checkout.
    Code,

    /// Applied whenever the conditions match.
    Automatic,
}

impl Method {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl FromStr for Method {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CODE" => Ok(Self::Code),
            "AUTOMATIC" => Ok(Self::Automatic),
            _ => Err(UnknownVariant::new("method", value)),
        }
    }
}

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Saved but not redeemable.
    Draft,

    /// Live.
    Active,
}

impl Status {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
        }
    }
}

impl FromStr for Status {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            _ => Err(UnknownVariant::new("status", value)),
        }
    }
}

/// How a product-scoped discount is spread over matching line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Allocation {
    /// Applied to every matching item.
    Each,

    /// Applied once, regardless of quantity.
    Once,
}

impl Allocation {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Each => "EACH",
            Self::Once => "ONCE",
        }
    }
}

impl FromStr for Allocation {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EACH" => Ok(Self::Each),
            "ONCE" => Ok(Self::Once),
            _ => Err(UnknownVariant::new("allocation", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn promotion_type_round_trips_through_wire_names() -> TestResult {
        for promotion_type in PromotionType::ALL {
            assert_eq!(promotion_type.as_str().parse::<PromotionType>()?, promotion_type);
        }

        Ok(())
    }

    #[test]
    fn buy_x_get_y_serializes_with_underscored_name() -> TestResult {
        let json = serde_json::to_string(&PromotionType::BuyXGetY)?;

        assert_eq!(json, r#""buy_x_get_y""#);

        Ok(())
    }

    #[test]
    fn every_archetype_offers_method_and_code() {
        for promotion_type in PromotionType::ALL {
            assert!(promotion_type.has_field(DraftField::Method));
            assert!(promotion_type.has_field(DraftField::Code));
        }
    }

    #[test]
    fn value_fields_are_mutually_exclusive() {
        for promotion_type in PromotionType::ALL {
            assert!(
                !(promotion_type.has_field(DraftField::PromotionValue)
                    && promotion_type.has_field(DraftField::Percentage)),
                "{promotion_type} carries both value fields"
            );
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        let error = "MANUAL".parse::<Method>().err();

        assert_eq!(
            error.map(|error| error.to_string()),
            Some("unknown method `MANUAL`".to_string())
        );
    }

    #[test]
    fn buckets_hold_between_one_and_three_entries() {
        for promotion_type in PromotionType::ALL {
            let count = promotion_type.buckets().len();

            assert!((1..=3).contains(&count), "{promotion_type} has {count} buckets");
        }
    }
}
