//! Leaf values: literals, durations and metric names.

use std::fmt;

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AstError, AstResult};

/// A scalar constant, kept as an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub value: Decimal,
}

impl NumberLiteral {
    pub fn new(value: impl Into<Decimal>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<Decimal> for NumberLiteral {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

/// Delimiter a string literal was written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quote {
    #[default]
    Double, // "
    Single, // '
    Backtick, // `
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
            Quote::Backtick => '`',
        }
    }
}

impl TryFrom<char> for Quote {
    type Error = AstError;

    fn try_from(ch: char) -> AstResult<Self> {
        match ch {
            '"' => Ok(Quote::Double),
            '\'' => Ok(Quote::Single),
            '`' => Ok(Quote::Backtick),
            other => {
                tracing::debug!(quote = %other, "invalid string quote");
                Err(AstError::InvalidQuote(other))
            }
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A quoted string constant. The value is stored unescaped, the quote is
/// kept so the literal can be written back the way it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringLiteral {
    pub quote: Quote,
    pub value: String,
}

impl StringLiteral {
    pub fn new(quote: Quote, value: impl Into<String>) -> Self {
        Self {
            quote,
            value: value.into(),
        }
    }

    /// Build a literal from the raw quote character found in the source.
    pub fn with_quote_char(quote: char, value: impl Into<String>) -> AstResult<Self> {
        Ok(Self::new(Quote::try_from(quote)?, value))
    }
}

/// A time span such as `5m` or `-1h30m`.
///
/// Negative spans are representable. Values are truncated to whole
/// milliseconds, the finest resolution PromQL durations have, and are
/// serialized as signed milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duration(#[serde(with = "millis")] TimeDelta);

impl Duration {
    /// Sub-millisecond precision is dropped, rounding toward zero.
    pub fn new(value: TimeDelta) -> Self {
        let ms = value.num_milliseconds();
        Self(TimeDelta::try_milliseconds(ms).unwrap_or(value))
    }

    /// `i64::MIN` is outside the range of `TimeDelta` and clamps to
    /// `TimeDelta::MIN`, which is `-i64::MAX` milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        Self(TimeDelta::try_milliseconds(ms).unwrap_or(TimeDelta::MIN))
    }

    pub fn value(&self) -> TimeDelta {
        self.0
    }

    pub fn as_millis(&self) -> i64 {
        self.0.num_milliseconds()
    }
}

impl From<TimeDelta> for Duration {
    fn from(value: TimeDelta) -> Self {
        Self::new(value)
    }
}

mod millis {
    use chrono::TimeDelta;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        TimeDelta::try_milliseconds(ms)
            .ok_or_else(|| de::Error::custom(format!("duration of {ms}ms is out of range")))
    }
}

/// A bare metric name, e.g. `http_requests_total`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricIdentifier {
    pub value: String,
}

impl MetricIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_literal_keeps_exact_decimal() {
        let a = NumberLiteral::new(Decimal::new(1, 1)); // 0.1
        let b = NumberLiteral::new(Decimal::new(2, 1));
        assert_eq!(a.value + b.value, Decimal::new(3, 1));
        assert_eq!(a.value.to_string(), "0.1");
        assert_eq!(NumberLiteral::new(42i64), NumberLiteral::from(Decimal::from(42)));
    }

    #[test]
    fn quote_is_part_of_equality() {
        let double = StringLiteral::new(Quote::Double, "api");
        let single = StringLiteral::with_quote_char('\'', "api").unwrap();
        assert_eq!(single.quote, Quote::Single);
        assert_ne!(double, single);
        assert_eq!(double, StringLiteral::with_quote_char('"', "api").unwrap());
    }

    #[test]
    fn invalid_quote_rejected() {
        let err = StringLiteral::with_quote_char('<', "api").unwrap_err();
        assert_eq!(err, AstError::InvalidQuote('<'));
        assert_eq!(Quote::try_from('`').unwrap().as_char(), '`');
    }

    #[test]
    fn durations() {
        let five_minutes = Duration::from_millis(300_000);
        assert_eq!(five_minutes, Duration::new(TimeDelta::minutes(5)));
        assert_eq!(five_minutes.as_millis(), 300_000);
        assert!(Duration::from_millis(-60_000) < five_minutes);
    }

    #[test]
    fn from_millis_clamps_below_range() {
        let clamped = Duration::from_millis(i64::MIN);
        assert_eq!(clamped.value(), TimeDelta::MIN);
        assert_eq!(clamped.as_millis(), -i64::MAX);
        assert_eq!(clamped, Duration::from_millis(-i64::MAX));
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let d = Duration::new(TimeDelta::microseconds(1_500));
        assert_eq!(d.value(), TimeDelta::milliseconds(1));
        assert_eq!(Duration::from(TimeDelta::microseconds(-2_700)).as_millis(), -2);

        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "1");
        let back: Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn duration_serializes_as_millis() {
        let json = serde_json::to_string(&Duration::from_millis(-90_000)).unwrap();
        assert_eq!(json, "-90000");
        let back: Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), TimeDelta::seconds(-90));
    }

    #[test]
    fn metric_identifier_equality() {
        assert_eq!(MetricIdentifier::new("up"), MetricIdentifier::new("up".to_string()));
        assert_ne!(MetricIdentifier::new("up"), MetricIdentifier::new("down"));
    }
}
