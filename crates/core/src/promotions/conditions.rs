//! Condition Lists
//!
//! A bucket is an ordered list of `{attribute, operator, value}` rules. Every
//! edit returns a new list and leaves the receiver untouched.

use std::{
    fmt::{self, Display, Formatter},
    slice::Iter,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use thiserror::Error;

use crate::promotions::{UnknownVariant, attributes::Attribute};

/// Set membership operator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Value must be one of the listed identifiers.
    #[default]
    In,

    /// Value must be none of the listed identifiers.
    NotIn,
}

impl Operator {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::NotIn => "not_in",
        }
    }
}

impl FromStr for Operator {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in" => Ok(Self::In),
            "not_in" => Ok(Self::NotIn),
            _ => Err(UnknownVariant {
                kind: "operator",
                value: value.to_string(),
            }),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single eligibility or scoping rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "A: Attribute", deserialize = "A: Attribute"))]
pub struct Condition<A: Attribute> {
    /// Attribute drawn from the bucket's vocabulary; unset while the row is new.
    #[serde(
        default,
        serialize_with = "serialize_attribute",
        deserialize_with = "deserialize_attribute"
    )]
    pub attribute: Option<A>,

    /// Membership operator.
    #[serde(default)]
    pub operator: Operator,

    /// Raw identifier or comma-separated identifier list.
    #[serde(default)]
    pub value: String,
}

impl<A: Attribute> Condition<A> {
    /// Build a complete condition.
    #[must_use]
    pub fn new(attribute: A, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            attribute: Some(attribute),
            operator,
            value: value.into(),
        }
    }

    /// Identifiers in `value`, trimmed, empties dropped.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.value
            .split(',')
            .map(str::trim)
            .filter(|identifier| !identifier.is_empty())
    }

    fn apply(&mut self, update: ConditionUpdate<A>) {
        match update {
            ConditionUpdate::Attribute(attribute) => self.attribute = attribute,
            ConditionUpdate::Operator(operator) => self.operator = operator,
            ConditionUpdate::Value(value) => self.value = value,
        }
    }
}

impl<A: Attribute> Default for Condition<A> {
    fn default() -> Self {
        Self {
            attribute: None,
            operator: Operator::In,
            value: String::new(),
        }
    }
}

#[expect(
    clippy::ref_option,
    reason = "serde's serialize_with passes a reference to the field"
)]
fn serialize_attribute<A, S>(attribute: &Option<A>, serializer: S) -> Result<S::Ok, S::Error>
where
    A: Attribute,
    S: Serializer,
{
    serializer.serialize_str(attribute.map_or("", Attribute::as_str))
}

fn deserialize_attribute<'de, A, D>(deserializer: D) -> Result<Option<A>, D::Error>
where
    A: Attribute,
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();

    if raw.is_empty() {
        return Ok(None);
    }

    A::parse(&raw)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("unknown attribute `{raw}`")))
}

/// Field of a condition addressed by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    /// The `attribute` field.
    Attribute,

    /// The `operator` field.
    Operator,

    /// The `value` field.
    Value,
}

impl ConditionField {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Operator => "operator",
            Self::Value => "value",
        }
    }
}

/// Typed single-field replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionUpdate<A: Attribute> {
    /// Replace the attribute.
    Attribute(Option<A>),

    /// Replace the operator.
    Operator(Operator),

    /// Replace the value.
    Value(String),
}

impl<A: Attribute> ConditionUpdate<A> {
    /// Parse a raw form value for `field`.
    ///
    /// An empty attribute clears it, matching a reset select box.
    ///
    /// # Errors
    ///
    /// Returns an error when the attribute is not in `A`'s vocabulary or the
    /// operator is unknown.
    pub fn parse(field: ConditionField, value: &str) -> Result<Self, ConditionListError> {
        match field {
            ConditionField::Attribute if value.is_empty() => Ok(Self::Attribute(None)),
            ConditionField::Attribute => A::parse(value)
                .map(|attribute| Self::Attribute(Some(attribute)))
                .ok_or_else(|| ConditionListError::UnknownAttribute(value.to_string())),
            ConditionField::Operator => value
                .parse()
                .map(Self::Operator)
                .map_err(|error: UnknownVariant| ConditionListError::UnknownOperator(error.value)),
            ConditionField::Value => Ok(Self::Value(value.to_string())),
        }
    }
}

/// Condition list edit errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionListError {
    /// Index does not address a row of the current list.
    #[error("condition index {index} is out of bounds for a list of {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,

        /// Current list length.
        len: usize,
    },

    /// Attribute is not part of the bucket's vocabulary.
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    /// Operator is neither `in` nor `not_in`.
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
}

/// Ordered list of conditions for one bucket. A `null` list on the wire
/// reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent, bound(serialize = "A: Attribute"))]
pub struct ConditionList<A: Attribute>(Vec<Condition<A>>);

impl<'de, A: Attribute> Deserialize<'de> for ConditionList<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<Condition<A>>>::deserialize(deserializer)
            .map(|conditions| Self(conditions.unwrap_or_default()))
    }
}

impl<A: Attribute> ConditionList<A> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Condition<A>> {
        self.0.get(index)
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> Iter<'_, Condition<A>> {
        self.0.iter()
    }

    /// Rows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Condition<A>] {
        &self.0
    }

    /// Append a blank `in` row.
    #[must_use]
    pub fn add_condition(&self) -> Self {
        let mut conditions = self.0.clone();

        conditions.push(Condition::default());

        Self(conditions)
    }

    /// Replace one field of the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionListError::IndexOutOfBounds`] when `index` does not
    /// address a row.
    pub fn update_condition(
        &self,
        index: usize,
        update: ConditionUpdate<A>,
    ) -> Result<Self, ConditionListError> {
        let mut conditions = self.0.clone();
        let len = conditions.len();

        let condition = conditions
            .get_mut(index)
            .ok_or(ConditionListError::IndexOutOfBounds { index, len })?;

        condition.apply(update);

        Ok(Self(conditions))
    }

    /// Remove the row at `index`; later rows shift down by one.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionListError::IndexOutOfBounds`] when `index` does not
    /// address a row.
    pub fn remove_condition(&self, index: usize) -> Result<Self, ConditionListError> {
        let len = self.0.len();

        if index >= len {
            return Err(ConditionListError::IndexOutOfBounds { index, len });
        }

        let mut conditions = self.0.clone();

        conditions.remove(index);

        Ok(Self(conditions))
    }
}

impl<A: Attribute> Default for ConditionList<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Attribute> From<Vec<Condition<A>>> for ConditionList<A> {
    fn from(conditions: Vec<Condition<A>>) -> Self {
        Self(conditions)
    }
}

impl<A: Attribute> FromIterator<Condition<A>> for ConditionList<A> {
    fn from_iter<I: IntoIterator<Item = Condition<A>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, A: Attribute> IntoIterator for &'a ConditionList<A> {
    type Item = &'a Condition<A>;
    type IntoIter = Iter<'a, Condition<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bucket-agnostic edit, as produced by form events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ConditionEdit {
    /// Append a blank row.
    Add,

    /// Replace one field of a row from its raw form value.
    Update {
        /// Row index.
        index: usize,

        /// Field to replace.
        field: ConditionField,

        /// Raw form value.
        value: String,
    },

    /// Remove a row.
    Remove {
        /// Row index.
        index: usize,
    },
}

impl ConditionEdit {
    /// Apply the edit to a typed list.
    ///
    /// # Errors
    ///
    /// Returns an error when the index is out of bounds or the raw value does
    /// not parse for the list's vocabulary.
    pub fn apply<A: Attribute>(
        &self,
        list: &ConditionList<A>,
    ) -> Result<ConditionList<A>, ConditionListError> {
        match self {
            Self::Add => Ok(list.add_condition()),
            Self::Update {
                index,
                field,
                value,
            } => list.update_condition(*index, ConditionUpdate::parse(*field, value)?),
            Self::Remove { index } => list.remove_condition(*index),
        }
    }
}
