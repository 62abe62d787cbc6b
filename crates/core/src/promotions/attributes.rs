//! Condition Attributes
//!
//! Each condition bucket draws its attribute from a closed vocabulary.

use std::fmt::Debug;

/// Closed attribute vocabulary for one family of condition buckets.
pub trait Attribute: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every attribute in the vocabulary, in display order.
    const ALL: &'static [Self];

    /// Wire name.
    fn as_str(self) -> &'static str;

    /// Human-readable label.
    fn label(self) -> &'static str;

    /// Look up an attribute by wire name.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.as_str() == value)
    }
}

/// Who may redeem a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EligibilityAttribute {
    /// Customer group membership.
    CustomerGroup,

    /// Shipping region.
    Region,

    /// Shipping country.
    Country,

    /// Sales channel the order comes through.
    SalesChannel,

    /// Order currency.
    Currency,
}

impl Attribute for EligibilityAttribute {
    const ALL: &'static [Self] = &[
        Self::CustomerGroup,
        Self::Region,
        Self::Country,
        Self::SalesChannel,
        Self::Currency,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::CustomerGroup => "customer_group",
            Self::Region => "region",
            Self::Country => "country",
            Self::SalesChannel => "sales_channel",
            Self::Currency => "currency",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::CustomerGroup => "Customer group",
            Self::Region => "Region",
            Self::Country => "Country",
            Self::SalesChannel => "Sales channel",
            Self::Currency => "Currency",
        }
    }
}

/// Which products a promotion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductAttribute {
    /// Specific products.
    Product,

    /// Product category.
    Category,

    /// Product collection.
    Collection,

    /// Product type.
    Type,

    /// Product tag.
    Tag,
}

impl Attribute for ProductAttribute {
    const ALL: &'static [Self] = &[
        Self::Product,
        Self::Category,
        Self::Collection,
        Self::Type,
        Self::Tag,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::Collection => "collection",
            Self::Type => "type",
            Self::Tag => "tag",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Category => "Category",
            Self::Collection => "Collection",
            Self::Type => "Type",
            Self::Tag => "Tag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_wire_name() {
        for attribute in EligibilityAttribute::ALL {
            assert_eq!(EligibilityAttribute::parse(attribute.as_str()), Some(*attribute));
        }

        for attribute in ProductAttribute::ALL {
            assert_eq!(ProductAttribute::parse(attribute.as_str()), Some(*attribute));
        }
    }

    #[test]
    fn vocabularies_do_not_cross() {
        assert_eq!(ProductAttribute::parse("region"), None);
        assert_eq!(EligibilityAttribute::parse("category"), None);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(ProductAttribute::parse("Category"), None);
    }
}
