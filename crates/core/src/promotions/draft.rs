//! Promotion Drafts
//!
//! The in-memory, not yet persisted promotion being authored. Every change
//! produces a new draft; the receiver is never modified.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotions::{
    Allocation, Method, PromotionType, Status,
    buckets::{Bucket, BucketScope},
    conditions::{ConditionEdit, ConditionListError},
    currency::CurrencyCode,
    details::{PromotionDetails, render_optional},
};

/// Scalar field of a draft, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    /// `method`
    Method,

    /// `code`
    Code,

    /// `status`
    Status,

    /// `includeTaxes`
    IncludeTaxes,

    /// `currency`
    Currency,

    /// `promotionValue`
    PromotionValue,

    /// `percentage`
    Percentage,

    /// `maxQuantity`
    MaxQuantity,

    /// `allocation`
    Allocation,

    /// `quantityX`
    QuantityX,

    /// `quantityY`
    QuantityY,
}

impl DraftField {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Code => "code",
            Self::Status => "status",
            Self::IncludeTaxes => "includeTaxes",
            Self::Currency => "currency",
            Self::PromotionValue => "promotionValue",
            Self::Percentage => "percentage",
            Self::MaxQuantity => "maxQuantity",
            Self::Allocation => "allocation",
            Self::QuantityX => "quantityX",
            Self::QuantityY => "quantityY",
        }
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Method => "Method",
            Self::Code => "Code",
            Self::Status => "Status",
            Self::IncludeTaxes => "Include taxes",
            Self::Currency => "Currency",
            Self::PromotionValue => "Promotion value",
            Self::Percentage => "Percentage",
            Self::MaxQuantity => "Maximum quantity",
            Self::Allocation => "Allocation",
            Self::QuantityX => "Buy quantity",
            Self::QuantityY => "Get quantity",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed replacement of one scalar field. `None` clears an optional input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Set `method`.
    Method(Method),

    /// Set `code`; empty text clears it.
    Code(String),

    /// Set `status`.
    Status(Status),

    /// Set `includeTaxes`.
    IncludeTaxes(bool),

    /// Set or clear `currency`.
    Currency(Option<CurrencyCode>),

    /// Set or clear `promotionValue`.
    PromotionValue(Option<Decimal>),

    /// Set or clear `percentage`.
    Percentage(Option<Decimal>),

    /// Set or clear `maxQuantity`.
    MaxQuantity(Option<u32>),

    /// Set `allocation`.
    Allocation(Allocation),

    /// Set or clear `quantityX`.
    QuantityX(Option<u32>),

    /// Set or clear `quantityY`.
    QuantityY(Option<u32>),
}

impl FieldChange {
    /// Field this change targets.
    #[must_use]
    pub const fn field(&self) -> DraftField {
        match self {
            Self::Method(_) => DraftField::Method,
            Self::Code(_) => DraftField::Code,
            Self::Status(_) => DraftField::Status,
            Self::IncludeTaxes(_) => DraftField::IncludeTaxes,
            Self::Currency(_) => DraftField::Currency,
            Self::PromotionValue(_) => DraftField::PromotionValue,
            Self::Percentage(_) => DraftField::Percentage,
            Self::MaxQuantity(_) => DraftField::MaxQuantity,
            Self::Allocation(_) => DraftField::Allocation,
            Self::QuantityX(_) => DraftField::QuantityX,
            Self::QuantityY(_) => DraftField::QuantityY,
        }
    }

    /// Parse a raw form value for `field`.
    ///
    /// Empty input clears optional numeric fields and the currency.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidValue`] when the text does not parse for
    /// the field.
    pub fn parse(field: DraftField, raw: &str) -> Result<Self, DraftError> {
        let value = raw.trim();
        let invalid = || DraftError::InvalidValue {
            field,
            value: raw.to_string(),
        };

        let change = match field {
            DraftField::Method => Self::Method(value.parse().map_err(|_err| invalid())?),
            DraftField::Code => Self::Code(value.to_string()),
            DraftField::Status => Self::Status(value.parse().map_err(|_err| invalid())?),
            DraftField::IncludeTaxes => {
                Self::IncludeTaxes(value.parse().map_err(|_err| invalid())?)
            }
            DraftField::Currency => Self::Currency(parse_optional(value).map_err(|_err| invalid())?),
            DraftField::PromotionValue => {
                Self::PromotionValue(parse_optional(value).map_err(|_err| invalid())?)
            }
            DraftField::Percentage => {
                Self::Percentage(parse_optional(value).map_err(|_err| invalid())?)
            }
            DraftField::MaxQuantity => {
                Self::MaxQuantity(parse_optional(value).map_err(|_err| invalid())?)
            }
            DraftField::Allocation => Self::Allocation(value.parse().map_err(|_err| invalid())?),
            DraftField::QuantityX => {
                Self::QuantityX(parse_optional(value).map_err(|_err| invalid())?)
            }
            DraftField::QuantityY => {
                Self::QuantityY(parse_optional(value).map_err(|_err| invalid())?)
            }
        };

        Ok(change)
    }
}

fn parse_optional<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    if value.is_empty() {
        return Ok(None);
    }

    value.parse().map(Some)
}

/// Draft edit errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Field does not exist on the draft's archetype.
    #[error("{field} does not apply to {promotion_type} promotions")]
    FieldNotApplicable {
        /// Rejected field.
        field: DraftField,

        /// Draft archetype.
        promotion_type: PromotionType,
    },

    /// Bucket is not composed by the draft's archetype.
    #[error("{bucket} does not apply to {promotion_type} promotions")]
    BucketNotApplicable {
        /// Rejected bucket.
        bucket: Bucket,

        /// Draft archetype.
        promotion_type: PromotionType,
    },

    /// Raw form value does not parse for its field.
    #[error("invalid value `{value}` for {field}")]
    InvalidValue {
        /// Target field.
        field: DraftField,

        /// Rejected text.
        value: String,
    },

    /// Condition edit failed.
    #[error("{bucket}: {source}")]
    Conditions {
        /// Edited bucket.
        bucket: Bucket,

        /// Underlying list error.
        #[source]
        source: ConditionListError,
    },
}

/// Fields shared by every archetype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedFields {
    /// Redemption method.
    pub method: Option<Method>,

    /// Redemption code. Kept while hidden so toggling the method back
    /// restores it.
    pub code: Option<String>,

    /// Publication status.
    pub status: Option<Status>,

    /// Whether amounts include taxes.
    pub include_taxes: Option<bool>,

    /// Currency of fixed amounts.
    pub currency: Option<CurrencyCode>,
}

impl SharedFields {
    /// Whether the code input is shown.
    #[must_use]
    pub fn code_visible(&self) -> bool {
        self.method == Some(Method::Code)
    }

    /// Code as it goes on the wire: only for code-redeemed promotions.
    #[must_use]
    pub fn effective_code(&self) -> Option<&str> {
        if self.code_visible() {
            self.code.as_deref()
        } else {
            None
        }
    }

    fn apply(&mut self, change: &FieldChange) -> bool {
        match change {
            FieldChange::Method(method) => self.method = Some(*method),
            FieldChange::Code(code) if code.is_empty() => self.code = None,
            FieldChange::Code(code) => self.code = Some(code.clone()),
            FieldChange::Status(status) => self.status = Some(*status),
            FieldChange::IncludeTaxes(include) => self.include_taxes = Some(*include),
            FieldChange::Currency(currency) => self.currency.clone_from(currency),
            _ => return false,
        }

        true
    }

    fn render(&self, field: DraftField) -> Option<String> {
        let rendered = match field {
            DraftField::Method => render_optional(self.method.map(Method::as_str).as_ref()),
            DraftField::Code => render_optional(self.code.as_ref()),
            DraftField::Status => render_optional(self.status.map(Status::as_str).as_ref()),
            DraftField::IncludeTaxes => render_optional(self.include_taxes.as_ref()),
            DraftField::Currency => render_optional(self.currency.as_ref()),
            _ => return None,
        };

        Some(rendered)
    }
}

/// Rendered form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Field.
    pub field: DraftField,

    /// Current value as shown in the input; empty when unset.
    pub value: String,
}

/// In-progress promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "DraftRepr", from = "DraftRepr")]
pub struct PromotionDraft {
    shared: SharedFields,
    details: PromotionDetails,
}

impl PromotionDraft {
    /// Empty draft for an archetype.
    #[must_use]
    pub fn new(promotion_type: PromotionType) -> Self {
        Self {
            shared: SharedFields::default(),
            details: PromotionDetails::empty(promotion_type),
        }
    }

    /// Assemble a draft from parts.
    #[must_use]
    pub const fn from_parts(shared: SharedFields, details: PromotionDetails) -> Self {
        Self { shared, details }
    }

    /// Archetype.
    #[must_use]
    pub const fn promotion_type(&self) -> PromotionType {
        self.details.promotion_type()
    }

    /// Shared fields.
    #[must_use]
    pub const fn shared(&self) -> &SharedFields {
        &self.shared
    }

    /// Archetype-specific details.
    #[must_use]
    pub const fn details(&self) -> &PromotionDetails {
        &self.details
    }

    /// Draft for another archetype. Shared fields carry over; details are
    /// kept only when the archetype is unchanged.
    #[must_use]
    pub fn retyped(&self, promotion_type: PromotionType) -> Self {
        if promotion_type == self.promotion_type() {
            return self.clone();
        }

        Self {
            shared: self.shared.clone(),
            details: PromotionDetails::empty(promotion_type),
        }
    }

    /// New draft with one field replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::FieldNotApplicable`] when the field does not
    /// exist on this archetype.
    pub fn with_change(&self, change: FieldChange) -> Result<Self, DraftError> {
        let mut next = self.clone();

        if !(next.shared.apply(&change) || next.details.apply(&change)) {
            return Err(DraftError::FieldNotApplicable {
                field: change.field(),
                promotion_type: self.promotion_type(),
            });
        }

        Ok(next)
    }

    /// New draft with one bucket edited.
    ///
    /// # Errors
    ///
    /// Returns an error when the bucket is not composed by this archetype or
    /// the edit itself fails.
    pub fn with_conditions(&self, bucket: Bucket, edit: &ConditionEdit) -> Result<Self, DraftError> {
        let not_applicable = || DraftError::BucketNotApplicable {
            bucket,
            promotion_type: self.promotion_type(),
        };
        let failed = |source| DraftError::Conditions { bucket, source };

        let mut next = self.clone();

        match bucket.scope() {
            BucketScope::Eligibility => {
                let list = next
                    .details
                    .eligibility_conditions_mut(bucket)
                    .ok_or_else(not_applicable)?;

                *list = edit.apply(list).map_err(failed)?;
            }
            BucketScope::Product => {
                let list = next
                    .details
                    .product_conditions_mut(bucket)
                    .ok_or_else(not_applicable)?;

                *list = edit.apply(list).map_err(failed)?;
            }
        }

        Ok(next)
    }

    /// Rendered fields of the details form, in display order. The code input
    /// is omitted unless the method is `CODE`.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<FieldValue> {
        self.promotion_type()
            .fields()
            .iter()
            .copied()
            .filter(|field| *field != DraftField::Code || self.shared.code_visible())
            .filter_map(|field| {
                self.shared
                    .render(field)
                    .or_else(|| self.details.render(field))
                    .map(|value| FieldValue { field, value })
            })
            .collect()
    }
}

/// Wire shape of a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftRepr {
    #[serde(flatten)]
    details: PromotionDetails,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<Method>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_taxes: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<CurrencyCode>,
}

impl From<PromotionDraft> for DraftRepr {
    fn from(draft: PromotionDraft) -> Self {
        let code = draft.shared.effective_code().map(str::to_string);
        let SharedFields {
            method,
            status,
            include_taxes,
            currency,
            ..
        } = draft.shared;

        Self {
            details: draft.details,
            method,
            code,
            status,
            include_taxes,
            currency,
        }
    }
}

impl From<DraftRepr> for PromotionDraft {
    fn from(repr: DraftRepr) -> Self {
        Self {
            shared: SharedFields {
                method: repr.method,
                code: repr.code.filter(|code| !code.is_empty()),
                status: repr.status,
                include_taxes: repr.include_taxes,
                currency: repr.currency,
            },
            details: repr.details,
        }
    }
}
