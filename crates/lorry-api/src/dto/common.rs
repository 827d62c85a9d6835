//! Common DTOs used across the API

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of responses that only carry a confirmation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Deserialize a decimal from a JSON number or a numeric string
///
/// The booking and admin forms post amounts either way.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct DecimalOrStringVisitor;

    impl<'de> Visitor<'de> for DecimalOrStringVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string containing a number")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(value))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Decimal::try_from(value).map_err(de::Error::custom)
        }

        fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            value.trim().parse::<Decimal>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(DecimalOrStringVisitor)
}

/// Optional variant of [`deserialize_decimal`]; `null` reads as absent
pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Amount(#[serde(deserialize_with = "deserialize_decimal")] Decimal);

    Ok(Option::<Amount>::deserialize(deserializer)?.map(|Amount(value)| value))
}
