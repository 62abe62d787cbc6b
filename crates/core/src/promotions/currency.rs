//! Currency Codes

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rusty_money::iso;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use thiserror::Error;

/// ISO 4217 currency code known to the money tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

/// Returned for codes missing from the ISO table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code `{0}`")]
pub struct UnknownCurrency(pub String);

impl CurrencyCode {
    /// Upper-case alphabetic code, e.g. `GBP`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();

        if iso::find(&code).is_none() {
            return Err(UnknownCurrency(value.to_string()));
        }

        Ok(Self(code))
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_normalises_case_and_whitespace() -> TestResult {
        let code: CurrencyCode = " gbp ".parse()?;

        assert_eq!(code.as_str(), "GBP");

        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(
            "XYZ1".parse::<CurrencyCode>(),
            Err(UnknownCurrency("XYZ1".to_string()))
        );
    }

    #[test]
    fn deserialize_validates_code() {
        let result: Result<CurrencyCode, _> = serde_json::from_str(r#""dollars""#);

        assert!(result.is_err(), "free text is not a currency code");
    }
}
