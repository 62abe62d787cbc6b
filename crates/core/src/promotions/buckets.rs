//! Condition Buckets

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::promotions::attributes::{Attribute, EligibilityAttribute, ProductAttribute};

/// Named condition list with one semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Who can use an amount-off promotion.
    Who,

    /// Which products an amount-off promotion targets.
    What,

    /// Who can use a percentage or buy-x-get-y promotion.
    Usage,

    /// Which products a percentage promotion targets.
    Item,

    /// Products that must be bought.
    Buy,

    /// Products that are discounted.
    Get,
}

/// Vocabulary family a bucket draws attributes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketScope {
    /// [`EligibilityAttribute`] vocabulary.
    Eligibility,

    /// [`ProductAttribute`] vocabulary.
    Product,
}

impl Bucket {
    /// Payload key holding this bucket's list.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Who => "whoConditions",
            Self::What => "whatConditions",
            Self::Usage => "usageConditions",
            Self::Item => "itemConditions",
            Self::Buy => "buyConditions",
            Self::Get => "getConditions",
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Who | Self::Usage => "Who can use this promotion",
            Self::What | Self::Item => "What items does this promotion apply to",
            Self::Buy => "What must the customer buy",
            Self::Get => "What does the customer get",
        }
    }

    /// Vocabulary family.
    #[must_use]
    pub const fn scope(self) -> BucketScope {
        match self {
            Self::Who | Self::Usage => BucketScope::Eligibility,
            Self::What | Self::Item | Self::Buy | Self::Get => BucketScope::Product,
        }
    }

    /// Wire names of the attributes allowed in this bucket.
    #[must_use]
    pub fn vocabulary(self) -> Vec<&'static str> {
        match self.scope() {
            BucketScope::Eligibility => EligibilityAttribute::ALL
                .iter()
                .map(|attribute| attribute.as_str())
                .collect(),
            BucketScope::Product => ProductAttribute::ALL
                .iter()
                .map(|attribute| attribute.as_str())
                .collect(),
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_buckets_offer_customer_attributes() {
        assert_eq!(
            Bucket::Usage.vocabulary(),
            vec!["customer_group", "region", "country", "sales_channel", "currency"]
        );
        assert_eq!(Bucket::Who.vocabulary(), Bucket::Usage.vocabulary());
    }

    #[test]
    fn product_buckets_offer_catalogue_attributes() {
        for bucket in [Bucket::What, Bucket::Item, Bucket::Buy, Bucket::Get] {
            assert_eq!(
                bucket.vocabulary(),
                vec!["product", "category", "collection", "type", "tag"]
            );
        }
    }
}
