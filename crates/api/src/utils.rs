// utils.rs - readers for loosely typed JSON request fields

use serde_json::{Number, Value};

// Request fields arrive as raw JSON so that a wrongly typed field fails its own check
// instead of rejecting the whole body.

pub fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

pub fn positive_integer(value: Option<&Value>) -> Option<u64> {
    let number = as_number(value)?;
    let integer = match number.as_u64() {
        Some(n) => Some(n),
        // 5.0 is still the integer 5
        None => number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64),
    };
    integer.filter(|n| *n > 0)
}

pub fn positive_number(value: Option<&Value>) -> Option<Number> {
    as_number(value)
        .filter(|n| n.as_f64().map_or(false, |f| f > 0.0))
        .cloned()
}

// Path ids are read the way a JSON number is: "1", "01", "1.0" and "1e0" all name id 1
pub fn path_id(raw: &str) -> Option<u64> {
    if let Ok(id) = raw.parse::<u64>() {
        return Some(id).filter(|id| *id > 0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && *f > 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn as_number(value: Option<&Value>) -> Option<&Number> {
    match value {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_must_be_non_empty() {
        assert_eq!(non_empty_str(Some(&json!("USD"))), Some("USD"));
        assert_eq!(non_empty_str(Some(&json!(""))), None);
        assert_eq!(non_empty_str(Some(&json!(7))), None);
        assert_eq!(non_empty_str(Some(&Value::Null)), None);
        assert_eq!(non_empty_str(None), None);
    }

    #[test]
    fn integers_must_be_positive() {
        assert_eq!(positive_integer(Some(&json!(5))), Some(5));
        assert_eq!(positive_integer(Some(&json!(5.0))), Some(5));
        assert_eq!(positive_integer(Some(&json!(0))), None);
        assert_eq!(positive_integer(Some(&json!(-3))), None);
        assert_eq!(positive_integer(Some(&json!(1.5))), None);
        assert_eq!(positive_integer(Some(&json!("5"))), None);
        assert_eq!(positive_integer(None), None);
    }

    #[test]
    fn numbers_must_be_positive() {
        assert_eq!(positive_number(Some(&json!(10))), Some(Number::from(10)));
        assert!(positive_number(Some(&json!(0.01))).is_some());
        assert_eq!(positive_number(Some(&json!(0))), None);
        assert_eq!(positive_number(Some(&json!(-1))), None);
        assert_eq!(positive_number(Some(&json!("10"))), None);
        assert_eq!(positive_number(Some(&Value::Null)), None);
    }

    #[test]
    fn path_ids_accept_numeric_spellings() {
        assert_eq!(path_id("1"), Some(1));
        assert_eq!(path_id("01"), Some(1));
        assert_eq!(path_id("1.0"), Some(1));
        assert_eq!(path_id("1e0"), Some(1));
        assert_eq!(path_id("1.5"), None);
        assert_eq!(path_id("0"), None);
        assert_eq!(path_id("-1"), None);
        assert_eq!(path_id("NaN"), None);
        assert_eq!(path_id("inf"), None);
        assert_eq!(path_id("abc"), None);
    }
}
