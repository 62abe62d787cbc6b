//! Wizard Events
//!
//! Serialisable form interactions, so a session can be recorded and
//! replayed.
//!
//! Values may be written as bare YAML scalars. Text inputs (`code` and
//! condition values) reject unquoted decimals, since `1.10` would otherwise
//! arrive as `1.1`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    promotions::{
        PromotionType,
        buckets::Bucket,
        conditions::{ConditionEdit, ConditionField},
        draft::{DraftField, FieldChange},
    },
    wizard::{Wizard, WizardError},
};

/// One user interaction with the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", try_from = "RawEvent")]
pub enum WizardEvent {
    /// Pick an archetype on the type step.
    SelectType {
        /// Archetype.
        #[serde(rename = "type")]
        promotion_type: PromotionType,
    },

    /// Press continue.
    Continue,

    /// Press back.
    Back,

    /// Change a scalar input.
    Set {
        /// Field.
        field: DraftField,

        /// Raw input text.
        value: String,
    },

    /// Append a blank condition row.
    AddCondition {
        /// Target bucket.
        bucket: Bucket,
    },

    /// Change one field of a condition row.
    UpdateCondition {
        /// Target bucket.
        bucket: Bucket,

        /// Row index.
        index: usize,

        /// Field.
        field: ConditionField,

        /// Raw input text.
        value: String,
    },

    /// Remove a condition row.
    RemoveCondition {
        /// Target bucket.
        bucket: Bucket,

        /// Row index.
        index: usize,
    },
}

impl Wizard {
    /// Apply one recorded interaction.
    ///
    /// # Errors
    ///
    /// Returns whatever the corresponding wizard operation returns.
    pub fn dispatch(&mut self, event: &WizardEvent) -> Result<(), WizardError> {
        match event {
            WizardEvent::SelectType { promotion_type } => self.select_type(*promotion_type),
            WizardEvent::Continue => self.advance(),
            WizardEvent::Back => self.retreat(),
            WizardEvent::Set { field, value } => self.set_field(FieldChange::parse(*field, value)?),
            WizardEvent::AddCondition { bucket } => {
                self.edit_conditions(*bucket, &ConditionEdit::Add)
            }
            WizardEvent::UpdateCondition {
                bucket,
                index,
                field,
                value,
            } => self.edit_conditions(
                *bucket,
                &ConditionEdit::Update {
                    index: *index,
                    field: *field,
                    value: value.clone(),
                },
            ),
            WizardEvent::RemoveCondition { bucket, index } => {
                self.edit_conditions(*bucket, &ConditionEdit::Remove { index: *index })
            }
        }
    }
}

/// A decimal written without quotes for a text input.
#[derive(Debug, Error)]
#[error("quote the value {value} for `{field}`: unquoted decimals lose their formatting")]
pub struct UnquotedDecimal {
    field: &'static str,
    value: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Scalar {
    /// Form text for a numeric or choice input.
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(integer) => integer.to_string(),
            Self::Float(float) => float.to_string(),
            Self::Flag(flag) => flag.to_string(),
        }
    }

    /// Form text for a free-text input, where a decimal cannot be rendered
    /// back as typed.
    fn into_exact_text(self, field: &'static str) -> Result<String, UnquotedDecimal> {
        match self {
            Self::Float(value) => Err(UnquotedDecimal { field, value }),
            scalar => Ok(scalar.into_text()),
        }
    }
}

/// Wire shape of [`WizardEvent`] before scalar values become form text.
#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum RawEvent {
    SelectType {
        #[serde(rename = "type")]
        promotion_type: PromotionType,
    },
    Continue,
    Back,
    Set {
        field: DraftField,
        value: Scalar,
    },
    AddCondition {
        bucket: Bucket,
    },
    UpdateCondition {
        bucket: Bucket,
        index: usize,
        field: ConditionField,
        value: Scalar,
    },
    RemoveCondition {
        bucket: Bucket,
        index: usize,
    },
}

impl TryFrom<RawEvent> for WizardEvent {
    type Error = UnquotedDecimal;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawEvent::SelectType { promotion_type } => Self::SelectType { promotion_type },
            RawEvent::Continue => Self::Continue,
            RawEvent::Back => Self::Back,
            RawEvent::Set { field, value } => Self::Set {
                field,
                value: match field {
                    DraftField::Code => value.into_exact_text(field.as_str())?,
                    _ => value.into_text(),
                },
            },
            RawEvent::AddCondition { bucket } => Self::AddCondition { bucket },
            RawEvent::UpdateCondition {
                bucket,
                index,
                field,
                value,
            } => Self::UpdateCondition {
                bucket,
                index,
                field,
                value: value.into_exact_text(field.as_str())?,
            },
            RawEvent::RemoveCondition { bucket, index } => Self::RemoveCondition { bucket, index },
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::wizard::WizardStep;

    use super::*;

    #[test]
    fn parses_recorded_session() -> TestResult {
        let yaml = r"
- action: select_type
  type: fixed_order
- action: continue
- action: set
  field: promotionValue
  value: 7.5
- action: set
  field: includeTaxes
  value: true
- action: add_condition
  bucket: who
- action: update_condition
  bucket: who
  index: 0
  field: attribute
  value: country
";

        let events: Vec<WizardEvent> = serde_norway::from_str(yaml)?;

        assert_eq!(events.len(), 6);
        assert_eq!(
            events.get(2),
            Some(&WizardEvent::Set {
                field: DraftField::PromotionValue,
                value: "7.5".to_string(),
            })
        );
        assert_eq!(
            events.get(3),
            Some(&WizardEvent::Set {
                field: DraftField::IncludeTaxes,
                value: "true".to_string(),
            })
        );

        let mut wizard = Wizard::default();

        for event in &events {
            wizard.dispatch(event)?;
        }

        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(
            serde_json::to_value(wizard.draft())?,
            serde_json::json!({
                "type": "fixed_order",
                "includeTaxes": true,
                "promotionValue": 7.5,
                "whoConditions": [{ "attribute": "country", "operator": "in", "value": "" }]
            })
        );

        Ok(())
    }

    #[test]
    fn text_inputs_keep_quoted_decimals_verbatim() -> TestResult {
        let events: Vec<WizardEvent> = serde_norway::from_str(
            r#"
- action: set
  field: code
  value: "1.10"
- action: update_condition
  bucket: item
  index: 0
  field: value
  value: "2.50"
- action: set
  field: percentage
  value: 12.50
"#,
        )?;

        assert_eq!(
            events,
            vec![
                WizardEvent::Set {
                    field: DraftField::Code,
                    value: "1.10".to_string(),
                },
                WizardEvent::UpdateCondition {
                    bucket: Bucket::Item,
                    index: 0,
                    field: ConditionField::Value,
                    value: "2.50".to_string(),
                },
                WizardEvent::Set {
                    field: DraftField::Percentage,
                    value: "12.5".to_string(),
                },
            ]
        );

        Ok(())
    }

    #[test]
    fn text_inputs_reject_unquoted_decimals() {
        let code: Result<WizardEvent, _> =
            serde_norway::from_str("action: set\nfield: code\nvalue: 1.10\n");

        assert!(
            code.is_err_and(|error| error.to_string().contains("quote the value 1.1 for `code`")),
            "codes are text"
        );

        let condition: Result<WizardEvent, _> = serde_json::from_str(
            r#"{ "action": "update_condition", "bucket": "who", "index": 0, "field": "value", "value": 1.10 }"#,
        );

        assert!(condition.is_err(), "condition identifiers are text");
    }

    #[test]
    fn unquoted_integers_still_read_as_text() -> TestResult {
        let event: WizardEvent = serde_norway::from_str("action: set\nfield: code\nvalue: 2024\n")?;

        assert_eq!(
            event,
            WizardEvent::Set {
                field: DraftField::Code,
                value: "2024".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_action() {
        let result: Result<WizardEvent, _> = serde_json::from_str(r#"{ "action": "submit" }"#);

        assert!(result.is_err(), "submit is not a wizard interaction");
    }

    #[test]
    fn invalid_value_surfaces_as_draft_error() -> TestResult {
        let mut wizard = Wizard::default();

        wizard.dispatch(&WizardEvent::SelectType {
            promotion_type: PromotionType::BuyXGetY,
        })?;
        wizard.dispatch(&WizardEvent::Continue)?;

        let result = wizard.dispatch(&WizardEvent::Set {
            field: DraftField::QuantityX,
            value: "-1".to_string(),
        });

        assert!(matches!(result, Err(WizardError::Draft(_))));

        Ok(())
    }
}
