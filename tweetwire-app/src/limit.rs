//! Validation of the optional `limit` query parameter.
//!
//! Error wording follows the field-error bodies API clients already parse:
//! `{"limit": ["Ensure this value is less than or equal to 100."]}`.
use std::collections::BTreeMap;

use tweetwire_config::MAX_LIMIT;

pub const MIN_LIMIT: u32 = 1;

pub const INVALID_INTEGER: &str = "A valid integer is required.";

/// Field name -> messages, serialized as-is into a 400 body.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// Pick the effective page size from raw query pairs.
///
/// Absent or empty `limit` means `default`; whitespace alone is not empty and
/// fails as a non-integer. When the key repeats, the last occurrence wins.
/// Integers may carry surrounding whitespace, a sign, or a trailing `.0`.
pub fn resolve_limit(pairs: &[(String, String)], default: u32) -> Result<u32, FieldErrors> {
    let raw = pairs
        .iter()
        .rev()
        .find(|(k, _)| k == "limit")
        .map(|(_, v)| v.as_str());

    match raw {
        None => Ok(default),
        Some("") => Ok(default),
        Some(v) => check_limit(v).map_err(|msg| {
            let mut errors = FieldErrors::new();
            errors.insert("limit", vec![msg]);
            errors
        }),
    }
}

fn check_limit(raw: &str) -> Result<u32, String> {
    let value = parse_integer(raw).ok_or_else(|| INVALID_INTEGER.to_string())?;
    if value < i128::from(MIN_LIMIT) {
        return Err(format!(
            "Ensure this value is greater than or equal to {MIN_LIMIT}."
        ));
    }
    if value > i128::from(MAX_LIMIT) {
        return Err(format!(
            "Ensure this value is less than or equal to {MAX_LIMIT}."
        ));
    }
    u32::try_from(value).map_err(|_| INVALID_INTEGER.to_string())
}

/// Parse an integer literal, saturating absurdly long digit runs so they still
/// report as out of range instead of malformed.
fn parse_integer(raw: &str) -> Option<i128> {
    let mut s = raw.trim();
    if let Some(dot) = s.find('.') {
        if s[dot + 1..].chars().all(|c| c == '0') {
            s = &s[..dot];
        } else {
            return None;
        }
    }

    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<i128>().unwrap_or(i128::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(v: &str) -> Vec<(String, String)> {
        vec![("limit".to_string(), v.to_string())]
    }

    fn message(err: FieldErrors) -> String {
        err["limit"][0].clone()
    }

    #[test]
    fn missing_or_empty_limit_uses_default() {
        assert_eq!(resolve_limit(&[], 30), Ok(30));
        assert_eq!(resolve_limit(&q(""), 30), Ok(30));
        let other = vec![("page".to_string(), "2".to_string())];
        assert_eq!(resolve_limit(&other, 30), Ok(30));
    }

    #[test]
    fn accepts_bounds_and_lenient_forms() {
        assert_eq!(resolve_limit(&q("1"), 30), Ok(1));
        assert_eq!(resolve_limit(&q("100"), 30), Ok(100));
        assert_eq!(resolve_limit(&q(" 12 "), 30), Ok(12));
        assert_eq!(resolve_limit(&q("+7"), 30), Ok(7));
        assert_eq!(resolve_limit(&q("12.0"), 30), Ok(12));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            message(resolve_limit(&q("0"), 30).unwrap_err()),
            "Ensure this value is greater than or equal to 1."
        );
        assert_eq!(
            message(resolve_limit(&q("-1"), 30).unwrap_err()),
            "Ensure this value is greater than or equal to 1."
        );
        assert_eq!(
            message(resolve_limit(&q("101"), 30).unwrap_err()),
            "Ensure this value is less than or equal to 100."
        );
        assert_eq!(
            message(resolve_limit(&q("99999999999999999999999999999999999999999"), 30).unwrap_err()),
            "Ensure this value is less than or equal to 100."
        );
    }

    #[test]
    fn rejects_non_integers() {
        for bad in ["abc", "1.5", "12a", "-", "0x10", "1e2", "  ", "\t"] {
            assert_eq!(
                message(resolve_limit(&q(bad), 30).unwrap_err()),
                INVALID_INTEGER,
                "{bad}"
            );
        }
    }

    #[test]
    fn last_repeated_value_wins() {
        let pairs = vec![
            ("limit".to_string(), "500".to_string()),
            ("limit".to_string(), "5".to_string()),
        ];
        assert_eq!(resolve_limit(&pairs, 30), Ok(5));
    }
}
