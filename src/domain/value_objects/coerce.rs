//! Numeric coercion for loosely-typed price fields.
//!
//! Backend product JSON mixes numbers, numeric strings and nulls. These
//! helpers reproduce the browser's coercion rules (`parseFloat`, `Number()`,
//! truthiness) so a record prices identically on every surface.

use serde_json::Value;

/// Returns the value unless it is JSON `null`.
pub fn present(value: &Option<Value>) -> Option<&Value> {
    value.as_ref().filter(|v| !v.is_null())
}

pub fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Total numeric normalisation: nullish, unparseable and non-finite values
/// all become `0`.
pub fn to_number(value: Option<&Value>) -> f64 {
    let n = loose_number(value);
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Like [`to_number`] but keeps `NaN`/`±Infinity` so callers can tell a
/// failed parse from a zero.
pub fn loose_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::String(s)) => parse_float(s),
        Some(other) => js_number(other),
    }
}

/// `Number(value)` for a present value. Missing values are `NaN`, as
/// `Number(undefined)` is.
pub fn js_number_opt(value: Option<&Value>) -> f64 {
    value.map_or(f64::NAN, js_number)
}

/// `Number(value)`: strict whole-string conversion.
pub fn js_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        // Arrays convert through their comma-joined string form.
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [Value::String(s)] => string_to_number(s),
            [single @ (Value::Number(_) | Value::Array(_))] => js_number(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// `parseFloat`: the longest decimal prefix after leading whitespace.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start_matches(is_js_whitespace);
    match decimal_prefix(s) {
        Some((value, _)) => value,
        None => f64::NAN,
    }
}

fn string_to_number(input: &str) -> f64 {
    let s = input.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return 0.0;
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }
    match decimal_prefix(s) {
        Some((value, len)) if len == s.len() => value,
        _ => f64::NAN,
    }
}

fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Scans `[sign] (Infinity | digits [. digits] [e [sign] digits])` at the
/// start of `s`, returning the value and the number of bytes consumed.
fn decimal_prefix(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let value = if negative { f64::NEG_INFINITY } else { f64::INFINITY };
        return Some((value, end + "Infinity".len()));
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        } else if int_digits > 0 {
            end += 1;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            end = j + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().map(|value| (value, end))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_to_number_nullish() {
        assert_eq!(to_number(None), 0.0);
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
    }

    #[test]
    fn test_to_number_strings() {
        assert_eq!(to_number(Some(&json!("1500"))), 1500.0);
        assert_eq!(to_number(Some(&json!("  12.5kg"))), 12.5);
        assert_eq!(to_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(to_number(Some(&json!(".5"))), 0.5);
        assert_eq!(to_number(Some(&json!("-7."))), -7.0);
        assert_eq!(to_number(Some(&json!("3.e2x"))), 300.0);
        assert_eq!(to_number(Some(&json!("2e"))), 2.0);
        assert_eq!(to_number(Some(&json!("abc"))), 0.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&json!("Infinity"))), 0.0);
        assert_eq!(to_number(Some(&json!("1e400"))), 0.0);
        assert_eq!(to_number(Some(&json!("Rs. 100"))), 0.0);
    }

    #[test]
    fn test_to_number_other_types() {
        assert_eq!(to_number(Some(&json!(42))), 42.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!(false))), 0.0);
        assert_eq!(to_number(Some(&json!([]))), 0.0);
        assert_eq!(to_number(Some(&json!(["7"]))), 7.0);
        assert_eq!(to_number(Some(&json!([[3]]))), 3.0);
        assert_eq!(to_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(to_number(Some(&json!({ "amount": 5 }))), 0.0);
    }

    #[test]
    fn test_number_is_strict() {
        assert_eq!(js_number(&json!(" 12 ")), 12.0);
        assert_eq!(js_number(&json!("")), 0.0);
        assert_eq!(js_number(&json!("0x10")), 16.0);
        assert!(js_number(&json!("12abc")).is_nan());
        assert!(js_number(&json!("inf")).is_nan());
        assert!(js_number_opt(None).is_nan());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(is_truthy(Some(&json!("0"))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!(0.5))));
    }

    fn any_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<f64>().prop_map(|f| serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)),
            any::<i64>().prop_map(|i| json!(i)),
            any::<String>().prop_map(Value::String),
            "[ +-]?[0-9]{0,4}(\\.[0-9]{0,3})?([eE][+-]?[0-9]{1,4})?[a-z]{0,2}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::hash_map("[a-z]{1,3}", inner, 0..3)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn test_to_number_is_total(value in any_json()) {
            prop_assert!(to_number(Some(&value)).is_finite());
        }

        #[test]
        fn test_parse_float_never_panics(s in any::<String>()) {
            let _ = parse_float(&s);
            let _ = string_to_number(&s);
        }
    }
}
