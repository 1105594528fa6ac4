//! Integer parsing for text fields
//!
//! The editing UI keeps every id and sequence number as text. The permissive
//! parser follows the browser's base-10 `parseInt`: leading whitespace and an
//! optional sign are accepted, then the longest run of ASCII digits is read
//! and anything after it is ignored. Text with no leading digits yields the
//! not-a-number sentinel, which serializes as JSON `null`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Result of parsing a text field as an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParsedInt(Option<i64>);

impl ParsedInt {
    /// The not-a-number sentinel
    pub const NAN: ParsedInt = ParsedInt(None);

    /// Wrap a known integer
    pub fn new(value: i64) -> Self {
        ParsedInt(Some(value))
    }

    /// The integer, if the parse succeeded
    pub fn value(&self) -> Option<i64> {
        self.0
    }

    /// Whether this is the not-a-number sentinel
    pub fn is_nan(&self) -> bool {
        self.0.is_none()
    }
}

impl From<i64> for ParsedInt {
    fn from(value: i64) -> Self {
        ParsedInt::new(value)
    }
}

impl Display for ParsedInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("NaN"),
        }
    }
}

impl Serialize for ParsedInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) => serializer.serialize_i64(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ParsedInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(ParsedInt)
    }
}

/// Parse like base-10 `parseInt`
///
/// One deviation: a digit run outside the `i64` range yields the sentinel.
/// `parseInt` would return an imprecise float there, but every field parsed
/// here is an integer id or sequence column, so no exact value exists to
/// send. Clamping or wrapping would submit a different, valid-looking id;
/// `null` lets the service reject the row instead.
pub fn parse_int(text: &str) -> ParsedInt {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return ParsedInt::NAN;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{}", digits).parse::<i64>()
    } else {
        digits.parse::<i64>()
    };

    parsed.map(ParsedInt::new).unwrap_or(ParsedInt::NAN)
}

/// Parse the whole trimmed text as an integer, or nothing
pub fn parse_int_strict(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

/// Whether the trimmed text is one or more ASCII digits
pub fn is_all_digits(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("176", Some(176))]
    #[case("  42", Some(42))]
    #[case("-3", Some(-3))]
    #[case("+5", Some(5))]
    #[case("12abc", Some(12))]
    #[case("1.9", Some(1))]
    #[case("007", Some(7))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("abc", None)]
    #[case("secA", None)]
    #[case("-", None)]
    #[case("0x10", Some(0))]
    #[case("99999999999999999999", None)]
    fn test_parse_int(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int(input).value(), expected);
    }

    #[rstest]
    #[case("176", Some(176))]
    #[case(" 34 ", Some(34))]
    #[case("12abc", None)]
    #[case("1.9", None)]
    #[case("", None)]
    fn test_parse_int_strict(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int_strict(input), expected);
    }

    #[test]
    fn test_sentinel_serializes_as_null() {
        let values = vec![ParsedInt::new(5), ParsedInt::NAN];
        assert_eq!(serde_json::to_string(&values).unwrap(), "[5,null]");

        let back: Vec<ParsedInt> = serde_json::from_str("[5,null]").unwrap();
        assert_eq!(back, values);
        assert_eq!(ParsedInt::NAN.to_string(), "NaN");
    }

    #[test]
    fn test_overflow_is_sentinel_not_clamped() {
        assert_eq!(parse_int("9223372036854775807"), ParsedInt::new(i64::MAX));
        assert!(parse_int("9223372036854775808").is_nan());
        assert!(parse_int("99999999999999999999").is_nan());
        assert_eq!(parse_int("-9223372036854775808"), ParsedInt::new(i64::MIN));
        assert_eq!(
            serde_json::to_string(&parse_int("99999999999999999999")).unwrap(),
            "null"
        );
    }

    #[test]
    fn test_is_all_digits() {
        assert!(is_all_digits("123"));
        assert!(is_all_digits(" 123 "));
        assert!(!is_all_digits(""));
        assert!(!is_all_digits("-1"));
        assert!(!is_all_digits("1a"));
    }
}
