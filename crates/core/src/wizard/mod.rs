//! Promotion Builder Wizard
//!
//! Owns the step, the selected archetype and the accumulating draft.
//!
//! ```text
//! Type --select + continue--> Details --continue--> Campaign --finish--> draft
//!  ^                            |  ^                    |
//!  +-----------back-------------+  +--------back--------+
//! ```

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::promotions::{
    PromotionType,
    buckets::Bucket,
    conditions::ConditionEdit,
    draft::{DraftError, FieldChange, PromotionDraft},
    validation::{ValidationErrors, ValidationMode, validate},
};

pub mod events;

/// Wizard step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Choose the promotion archetype.
    #[default]
    Type,

    /// Fill in the archetype's form.
    Details,

    /// Review before submission.
    Campaign,
}

impl WizardStep {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Details => "details",
            Self::Campaign => "campaign",
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected wizard interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Continue pressed on the type step with nothing selected.
    #[error("select a promotion type before continuing")]
    NoTypeSelected,

    /// Interaction belongs to a different step.
    #[error("{action} is only available on the {expected} step (currently on {actual})")]
    WrongStep {
        /// Attempted interaction.
        action: &'static str,

        /// Step the interaction belongs to.
        expected: WizardStep,

        /// Current step.
        actual: WizardStep,
    },

    /// Continue pressed on the last step.
    #[error("the campaign step is the last step")]
    NoNextStep,

    /// Back pressed on the first step.
    #[error("the type step is the first step")]
    NoPreviousStep,

    /// Replacement draft is for another archetype.
    #[error("draft is for {found} but the wizard is building {expected}")]
    TypeMismatch {
        /// Selected archetype.
        expected: PromotionType,

        /// Archetype of the rejected draft.
        found: PromotionType,
    },

    /// Strict validation blocked the transition.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Draft edit failed.
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// Promotion builder state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: Option<PromotionDraft>,
    mode: ValidationMode,
}

impl Wizard {
    /// Fresh wizard on the type step.
    #[must_use]
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            step: WizardStep::Type,
            draft: None,
            mode,
        }
    }

    /// Wizard editing an existing promotion; starts on the details step.
    #[must_use]
    pub fn editing(draft: PromotionDraft, mode: ValidationMode) -> Self {
        Self {
            step: WizardStep::Details,
            draft: Some(draft),
            mode,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Validation mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Selected archetype, if any.
    #[must_use]
    pub fn selected_type(&self) -> Option<PromotionType> {
        self.draft.as_ref().map(PromotionDraft::promotion_type)
    }

    /// Current draft, once an archetype is selected.
    #[must_use]
    pub const fn draft(&self) -> Option<&PromotionDraft> {
        self.draft.as_ref()
    }

    /// Whether continue is enabled on the current step.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        match (self.step, &self.draft) {
            (WizardStep::Type, draft) => draft.is_some(),
            (WizardStep::Details, Some(draft)) => validate(draft, self.mode).is_ok(),
            (WizardStep::Details | WizardStep::Campaign, _) => false,
        }
    }

    /// Mark an archetype as selected. Re-selecting the current archetype keeps
    /// the draft; choosing another one resets its details.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside the type step.
    pub fn select_type(&mut self, promotion_type: PromotionType) -> Result<(), WizardError> {
        self.expect_step("select type", WizardStep::Type)?;

        self.draft = Some(match &self.draft {
            Some(draft) => draft.retyped(promotion_type),
            None => PromotionDraft::new(promotion_type),
        });

        Ok(())
    }

    /// Move to the next step.
    ///
    /// # Errors
    ///
    /// Returns an error when no archetype is selected, when strict validation
    /// fails on the details step, or on the last step.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::Type => {
                if self.draft.is_none() {
                    return Err(WizardError::NoTypeSelected);
                }

                WizardStep::Details
            }
            WizardStep::Details => {
                validate(self.current_draft()?, self.mode)?;

                WizardStep::Campaign
            }
            WizardStep::Campaign => return Err(WizardError::NoNextStep),
        };

        Ok(())
    }

    /// Move to the previous step. The draft is kept.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoPreviousStep`] on the type step.
    pub fn retreat(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            WizardStep::Type => return Err(WizardError::NoPreviousStep),
            WizardStep::Details => WizardStep::Type,
            WizardStep::Campaign => WizardStep::Details,
        };

        Ok(())
    }

    /// Replace one field of the draft.
    ///
    /// # Errors
    ///
    /// Returns an error outside the details step or when the field does not
    /// apply to the selected archetype.
    pub fn set_field(&mut self, change: FieldChange) -> Result<(), WizardError> {
        self.expect_step("set field", WizardStep::Details)?;

        let next = self.current_draft()?.with_change(change)?;

        self.draft = Some(next);

        Ok(())
    }

    /// Edit one condition bucket of the draft.
    ///
    /// # Errors
    ///
    /// Returns an error outside the details step, when the bucket does not
    /// apply to the selected archetype, or when the edit fails.
    pub fn edit_conditions(
        &mut self,
        bucket: Bucket,
        edit: &ConditionEdit,
    ) -> Result<(), WizardError> {
        self.expect_step("edit conditions", WizardStep::Details)?;

        let next = self.current_draft()?.with_conditions(bucket, edit)?;

        self.draft = Some(next);

        Ok(())
    }

    /// Replace the whole draft, as a form's change handler does.
    ///
    /// # Errors
    ///
    /// Returns an error outside the details step or when the draft is for a
    /// different archetype.
    pub fn replace_draft(&mut self, draft: PromotionDraft) -> Result<(), WizardError> {
        self.expect_step("replace draft", WizardStep::Details)?;

        let expected = self.current_draft()?.promotion_type();
        let found = draft.promotion_type();

        if expected != found {
            return Err(WizardError::TypeMismatch { expected, found });
        }

        self.draft = Some(draft);

        Ok(())
    }

    /// Hand over the finished draft for submission.
    ///
    /// # Errors
    ///
    /// Returns an error outside the campaign step or when strict validation
    /// fails.
    pub fn finish(&self) -> Result<PromotionDraft, WizardError> {
        self.expect_step("finish", WizardStep::Campaign)?;

        let draft = self.current_draft()?;

        validate(draft, self.mode)?;

        Ok(draft.clone())
    }

    fn expect_step(&self, action: &'static str, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            return Ok(());
        }

        Err(WizardError::WrongStep {
            action,
            expected,
            actual: self.step,
        })
    }

    fn current_draft(&self) -> Result<&PromotionDraft, WizardError> {
        self.draft.as_ref().ok_or(WizardError::NoTypeSelected)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::promotions::{Method, draft::DraftField, validation::ValidationIssue};

    use super::*;

    #[test]
    fn continue_without_type_does_not_advance() {
        let mut wizard = Wizard::default();

        assert!(!wizard.can_continue());
        assert_eq!(wizard.advance(), Err(WizardError::NoTypeSelected));
        assert_eq!(wizard.step(), WizardStep::Type);
    }

    #[test]
    fn selecting_type_does_not_auto_advance() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::PercentOrder)?;

        assert_eq!(wizard.step(), WizardStep::Type);
        assert_eq!(wizard.selected_type(), Some(PromotionType::PercentOrder));
        assert!(wizard.can_continue());

        Ok(())
    }

    #[test]
    fn back_then_same_type_keeps_details() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::FixedOrder)?;
        wizard.advance()?;
        wizard.set_field(FieldChange::PromotionValue(Some(Decimal::TEN)))?;
        wizard.retreat()?;

        assert_eq!(wizard.selected_type(), Some(PromotionType::FixedOrder));

        wizard.select_type(PromotionType::FixedOrder)?;
        wizard.advance()?;

        assert_eq!(
            wizard.draft().map(PromotionDraft::visible_fields).and_then(|fields| {
                fields
                    .into_iter()
                    .find(|field| field.field == DraftField::PromotionValue)
                    .map(|field| field.value)
            }),
            Some("10".to_string())
        );

        Ok(())
    }

    #[test]
    fn back_then_other_type_resets_details_but_keeps_method() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::FixedOrder)?;
        wizard.advance()?;
        wizard.set_field(FieldChange::Method(Method::Automatic))?;
        wizard.set_field(FieldChange::PromotionValue(Some(Decimal::TEN)))?;
        wizard.retreat()?;
        wizard.select_type(PromotionType::PercentOrder)?;

        assert_eq!(
            wizard.draft().and_then(|draft| draft.shared().method),
            Some(Method::Automatic)
        );
        assert_eq!(
            serde_json::to_value(wizard.draft())?,
            serde_json::json!({
                "type": "percent_order",
                "method": "AUTOMATIC",
                "usageConditions": []
            })
        );

        Ok(())
    }

    #[test]
    fn type_is_locked_outside_type_step() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::FixedOrder)?;
        wizard.advance()?;

        assert_eq!(
            wizard.select_type(PromotionType::BuyXGetY),
            Err(WizardError::WrongStep {
                action: "select type",
                expected: WizardStep::Type,
                actual: WizardStep::Details,
            })
        );

        Ok(())
    }

    #[test]
    fn permissive_details_step_always_continues() -> TestResult {
        let mut wizard = Wizard::new(ValidationMode::Permissive);

        wizard.select_type(PromotionType::FixedProduct)?;
        wizard.advance()?;

        assert!(wizard.can_continue());

        wizard.advance()?;

        assert_eq!(wizard.step(), WizardStep::Campaign);

        Ok(())
    }

    #[test]
    fn strict_details_step_blocks_incomplete_draft() -> TestResult {
        let mut wizard = Wizard::new(ValidationMode::Strict);

        wizard.select_type(PromotionType::PercentOrder)?;
        wizard.advance()?;
        wizard.set_field(FieldChange::Method(Method::Code))?;
        wizard.set_field(FieldChange::Percentage(Some(Decimal::TEN)))?;

        assert!(!wizard.can_continue());

        let error = wizard.advance().err();

        assert!(matches!(
            error,
            Some(WizardError::Invalid(errors)) if errors.issues() == [ValidationIssue::MissingCode]
        ));
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.set_field(FieldChange::Code("TENPC".to_string()))?;
        wizard.advance()?;

        assert_eq!(wizard.step(), WizardStep::Campaign);

        Ok(())
    }

    #[test]
    fn finish_only_on_campaign_step() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::PercentOrder)?;
        wizard.advance()?;

        assert!(matches!(
            wizard.finish(),
            Err(WizardError::WrongStep { action: "finish", .. })
        ));

        wizard.advance()?;

        assert_eq!(
            wizard.finish()?,
            PromotionDraft::new(PromotionType::PercentOrder)
        );

        Ok(())
    }

    #[test]
    fn campaign_back_returns_to_details() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.select_type(PromotionType::BuyXGetY)?;
        wizard.advance()?;
        wizard.advance()?;

        assert_eq!(wizard.advance(), Err(WizardError::NoNextStep));

        wizard.retreat()?;

        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.retreat()?;

        assert_eq!(wizard.retreat(), Err(WizardError::NoPreviousStep));

        Ok(())
    }

    #[test]
    fn replace_draft_rejects_other_archetype() -> TestResult {
        let mut wizard = Wizard::editing(
            PromotionDraft::new(PromotionType::FixedProduct),
            ValidationMode::Permissive,
        );

        assert_eq!(
            wizard.replace_draft(PromotionDraft::new(PromotionType::FixedOrder)),
            Err(WizardError::TypeMismatch {
                expected: PromotionType::FixedProduct,
                found: PromotionType::FixedOrder,
            })
        );

        wizard.replace_draft(PromotionDraft::new(PromotionType::FixedProduct))?;

        Ok(())
    }
}
