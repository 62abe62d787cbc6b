//! Decimal wire encoding.
//!
//! Whole amounts go out as JSON integers, fractional ones as floats.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serializer, ser::Error as _};

#[expect(
    clippy::ref_option,
    reason = "serde `serialize_with` passes a reference to the field."
)]
pub(crate) fn serialize_option<S: Serializer>(
    value: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize(value, serializer),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }

    let float = value
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("{value} does not fit a JSON number")))?;

    serializer.serialize_f64(float)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Serialize)]
    struct Wrapper(#[serde(serialize_with = "serialize")] Decimal);

    #[test]
    fn whole_values_serialize_as_integers() -> TestResult {
        assert_eq!(serde_json::to_string(&Wrapper(Decimal::new(2000, 2)))?, "20");

        Ok(())
    }

    #[test]
    fn fractional_values_serialize_as_floats() -> TestResult {
        assert_eq!(serde_json::to_string(&Wrapper(Decimal::new(1250, 2)))?, "12.5");

        Ok(())
    }
}
