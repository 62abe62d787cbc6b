//! Draft Validation
//!
//! The marketplace API is the authority on promotion rules. Permissive mode
//! forwards every draft and lets the API reject it; strict mode catches
//! incomplete drafts before they leave the wizard.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::promotions::{
    Method, PromotionType,
    attributes::Attribute,
    buckets::Bucket,
    conditions::ConditionList,
    details::PromotionDetails,
    draft::{DraftField, PromotionDraft},
};

/// How much checking happens before a draft may leave the details step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Never block; the API decides.
    #[default]
    Permissive,

    /// Block on any [`ValidationIssue`].
    Strict,
}

/// A single reason a draft is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// A required field is unset.
    #[error("{0} is required")]
    Missing(DraftField),

    /// `method` is `CODE` but no code was entered.
    #[error("a code is required for code-redeemed promotions")]
    MissingCode,

    /// Percentage outside `(0, 100]`.
    #[error("percentage must be greater than 0 and at most 100")]
    PercentageOutOfRange,

    /// A count or amount that must be positive is not.
    #[error("{0} must be greater than 0")]
    NotPositive(DraftField),

    /// A condition row has no attribute selected.
    #[error("{bucket} condition {index} has no attribute")]
    ConditionMissingAttribute {
        /// Bucket holding the row.
        bucket: Bucket,

        /// Row index.
        index: usize,
    },

    /// A condition row has no identifiers.
    #[error("{bucket} condition {index} has no value")]
    ConditionMissingValue {
        /// Bucket holding the row.
        bucket: Bucket,

        /// Row index.
        index: usize,
    },
}

/// Every issue found in a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: SmallVec<[ValidationIssue; 4]>,
}

impl ValidationErrors {
    /// Issues in discovery order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("draft is incomplete: ")?;

        for (position, issue) in self.issues.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{issue}")?;
        }

        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Check a draft under `mode`.
///
/// # Errors
///
/// In [`ValidationMode::Strict`], returns every issue found. Permissive mode
/// never fails.
pub fn validate(draft: &PromotionDraft, mode: ValidationMode) -> Result<(), ValidationErrors> {
    if mode == ValidationMode::Permissive {
        return Ok(());
    }

    let issues = collect_issues(draft);

    if issues.is_empty() {
        return Ok(());
    }

    Err(ValidationErrors { issues })
}

fn collect_issues(draft: &PromotionDraft) -> SmallVec<[ValidationIssue; 4]> {
    let mut issues = SmallVec::new();
    let shared = draft.shared();

    match shared.method {
        None => issues.push(ValidationIssue::Missing(DraftField::Method)),
        Some(Method::Code)
            if shared
                .code
                .as_deref()
                .is_none_or(|code| code.trim().is_empty()) =>
        {
            issues.push(ValidationIssue::MissingCode);
        }
        Some(_) => {}
    }

    if matches!(
        draft.promotion_type(),
        PromotionType::FixedProduct | PromotionType::FixedOrder
    ) && shared.currency.is_none()
    {
        issues.push(ValidationIssue::Missing(DraftField::Currency));
    }

    match draft.details() {
        PromotionDetails::FixedProduct(details) => {
            check_amount(&mut issues, details.promotion_value);
            check_optional_count(&mut issues, DraftField::MaxQuantity, details.max_quantity);
            check_conditions(&mut issues, Bucket::Who, &details.who_conditions);
            check_conditions(&mut issues, Bucket::What, &details.what_conditions);
        }
        PromotionDetails::FixedOrder(details) => {
            check_amount(&mut issues, details.promotion_value);
            check_conditions(&mut issues, Bucket::Who, &details.who_conditions);
        }
        PromotionDetails::PercentProduct(details) => {
            check_percentage(&mut issues, details.percentage);
            check_optional_count(&mut issues, DraftField::MaxQuantity, details.max_quantity);
            check_conditions(&mut issues, Bucket::Usage, &details.usage_conditions);
            check_conditions(&mut issues, Bucket::Item, &details.item_conditions);
        }
        PromotionDetails::PercentOrder(details) => {
            check_percentage(&mut issues, details.percentage);
            check_conditions(&mut issues, Bucket::Usage, &details.usage_conditions);
        }
        PromotionDetails::BuyXGetY(details) => {
            check_required_count(&mut issues, DraftField::QuantityX, details.quantity_x);
            check_required_count(&mut issues, DraftField::QuantityY, details.quantity_y);
            check_conditions(&mut issues, Bucket::Usage, &details.usage_conditions);
            check_conditions(&mut issues, Bucket::Buy, &details.buy_conditions);
            check_conditions(&mut issues, Bucket::Get, &details.get_conditions);
        }
    }

    issues
}

fn check_amount(issues: &mut SmallVec<[ValidationIssue; 4]>, value: Option<Decimal>) {
    match value {
        None => issues.push(ValidationIssue::Missing(DraftField::PromotionValue)),
        Some(value) if value <= Decimal::ZERO => {
            issues.push(ValidationIssue::NotPositive(DraftField::PromotionValue));
        }
        Some(_) => {}
    }
}

fn check_percentage(issues: &mut SmallVec<[ValidationIssue; 4]>, value: Option<Decimal>) {
    match value {
        None => issues.push(ValidationIssue::Missing(DraftField::Percentage)),
        Some(value) if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED => {
            issues.push(ValidationIssue::PercentageOutOfRange);
        }
        Some(_) => {}
    }
}

fn check_required_count(
    issues: &mut SmallVec<[ValidationIssue; 4]>,
    field: DraftField,
    value: Option<u32>,
) {
    match value {
        None => issues.push(ValidationIssue::Missing(field)),
        Some(0) => issues.push(ValidationIssue::NotPositive(field)),
        Some(_) => {}
    }
}

fn check_optional_count(
    issues: &mut SmallVec<[ValidationIssue; 4]>,
    field: DraftField,
    value: Option<u32>,
) {
    if value == Some(0) {
        issues.push(ValidationIssue::NotPositive(field));
    }
}

fn check_conditions<A: Attribute>(
    issues: &mut SmallVec<[ValidationIssue; 4]>,
    bucket: Bucket,
    conditions: &ConditionList<A>,
) {
    for (index, condition) in conditions.iter().enumerate() {
        if condition.attribute.is_none() {
            issues.push(ValidationIssue::ConditionMissingAttribute { bucket, index });
        }

        if condition.identifiers().next().is_none() {
            issues.push(ValidationIssue::ConditionMissingValue { bucket, index });
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::promotions::{
        Status,
        conditions::{ConditionEdit, ConditionField},
        draft::FieldChange,
    };

    use super::*;

    fn issues(draft: &PromotionDraft) -> Vec<ValidationIssue> {
        validate(draft, ValidationMode::Strict)
            .err()
            .map(|errors| errors.issues().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn permissive_mode_accepts_empty_draft() {
        for promotion_type in PromotionType::ALL {
            assert_eq!(
                validate(&PromotionDraft::new(promotion_type), ValidationMode::Permissive),
                Ok(())
            );
        }
    }

    #[test]
    fn strict_mode_lists_missing_fields() {
        assert_eq!(
            issues(&PromotionDraft::new(PromotionType::FixedOrder)),
            vec![
                ValidationIssue::Missing(DraftField::Method),
                ValidationIssue::Missing(DraftField::Currency),
                ValidationIssue::Missing(DraftField::PromotionValue),
            ]
        );
    }

    #[test]
    fn code_method_requires_non_blank_code() -> TestResult {
        let draft = PromotionDraft::new(PromotionType::PercentOrder)
            .with_change(FieldChange::Method(Method::Code))?
            .with_change(FieldChange::Code("   ".to_string()))?
            .with_change(FieldChange::Percentage(Some(Decimal::TEN)))?;

        assert_eq!(issues(&draft), vec![ValidationIssue::MissingCode]);

        Ok(())
    }

    #[test]
    fn percentage_must_be_within_range() -> TestResult {
        let draft = PromotionDraft::new(PromotionType::PercentOrder)
            .with_change(FieldChange::Method(Method::Automatic))?
            .with_change(FieldChange::Percentage(Some(Decimal::new(101, 0))))?;

        assert_eq!(issues(&draft), vec![ValidationIssue::PercentageOutOfRange]);

        Ok(())
    }

    #[test]
    fn incomplete_condition_rows_are_reported() -> TestResult {
        let draft = PromotionDraft::new(PromotionType::BuyXGetY)
            .with_change(FieldChange::Method(Method::Automatic))?
            .with_change(FieldChange::Status(Status::Draft))?
            .with_change(FieldChange::QuantityX(Some(2)))?
            .with_change(FieldChange::QuantityY(Some(1)))?
            .with_conditions(Bucket::Get, &ConditionEdit::Add)?
            .with_conditions(
                Bucket::Get,
                &ConditionEdit::Update {
                    index: 0,
                    field: ConditionField::Value,
                    value: " , ".to_string(),
                },
            )?;

        assert_eq!(
            issues(&draft),
            vec![
                ValidationIssue::ConditionMissingAttribute {
                    bucket: Bucket::Get,
                    index: 0
                },
                ValidationIssue::ConditionMissingValue {
                    bucket: Bucket::Get,
                    index: 0
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn complete_draft_passes_strict_mode() -> TestResult {
        let draft = PromotionDraft::new(PromotionType::FixedProduct)
            .with_change(FieldChange::Method(Method::Code))?
            .with_change(FieldChange::Code("TENOFF".to_string()))?
            .with_change(FieldChange::Currency(Some("USD".parse()?)))?
            .with_change(FieldChange::PromotionValue(Some(Decimal::TEN)))?;

        assert_eq!(validate(&draft, ValidationMode::Strict), Ok(()));

        Ok(())
    }

    #[test]
    fn errors_display_every_issue() {
        let errors = ValidationErrors {
            issues: SmallVec::from_vec(vec![
                ValidationIssue::MissingCode,
                ValidationIssue::NotPositive(DraftField::QuantityY),
            ]),
        };

        assert_eq!(
            errors.to_string(),
            "draft is incomplete: a code is required for code-redeemed promotions; quantityY must be greater than 0"
        );
    }
}
