//! Emporium prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    promotions::{
        Allocation, Method, PromotionType, Status,
        attributes::{Attribute, EligibilityAttribute, ProductAttribute},
        buckets::{Bucket, BucketScope},
        conditions::{
            Condition, ConditionEdit, ConditionField, ConditionList, ConditionListError,
            ConditionUpdate, Operator,
        },
        currency::{CurrencyCode, UnknownCurrency},
        details::{
            BuyXGetYDetails, FixedOrderDetails, FixedProductDetails, PercentOrderDetails,
            PercentProductDetails, PromotionDetails,
        },
        draft::{DraftError, DraftField, FieldChange, FieldValue, PromotionDraft, SharedFields},
        validation::{ValidationErrors, ValidationIssue, ValidationMode, validate},
    },
    wizard::{Wizard, WizardError, WizardStep, events::WizardEvent},
};
