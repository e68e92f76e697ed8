//! Field-level coercion of untrusted JSON values.
//!
//! Raw outlines come from a language model, so nothing about their shape is
//! trusted. Each helper here inspects one field and returns `None` when it is
//! unusable; callers decide the fallback.

use serde_json::Value;

/// Trimmed, non-empty string content.
pub fn text(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// An integer read from a JSON number or a numeric string, truncated toward zero.
///
/// Non-finite values and anything that is not a number or numeric string yield `None`.
pub fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().and_then(finite_trunc)
            }
        }
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(finite_trunc),
        _ => None,
    }
}

fn finite_trunc(f: f64) -> Option<i64> {
    if f.is_finite() {
        // `as` saturates at the i64 bounds
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Clamp `n` into `[lo, hi]` and narrow to a heading level.
pub fn clamp_level(n: i64, lo: u8, hi: u8) -> u8 {
    n.clamp(i64::from(lo), i64::from(hi)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_trims_and_rejects_blank() {
        assert_eq!(text(Some(&json!("  Intro "))).as_deref(), Some("Intro"));
        assert_eq!(text(Some(&json!("   "))), None);
        assert_eq!(text(Some(&json!(""))), None);
        assert_eq!(text(Some(&json!(3))), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn integer_accepts_numbers_and_numeric_strings() {
        assert_eq!(integer(Some(&json!(3))), Some(3));
        assert_eq!(integer(Some(&json!(-2))), Some(-2));
        assert_eq!(integer(Some(&json!(2.9))), Some(2));
        assert_eq!(integer(Some(&json!(-0.5))), Some(0));
        assert_eq!(integer(Some(&json!(" 4 "))), Some(4));
        assert_eq!(integer(Some(&json!("450.7"))), Some(450));
    }

    #[test]
    fn integer_rejects_everything_else() {
        assert_eq!(integer(None), None);
        assert_eq!(integer(Some(&json!(null))), None);
        assert_eq!(integer(Some(&json!(true))), None);
        assert_eq!(integer(Some(&json!("H2"))), None);
        assert_eq!(integer(Some(&json!("NaN"))), None);
        assert_eq!(integer(Some(&json!("inf"))), None);
        assert_eq!(integer(Some(&json!([2]))), None);
        assert_eq!(integer(Some(&json!({"level": 2}))), None);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(integer(Some(&json!(1e300))), Some(i64::MAX));
        assert_eq!(integer(Some(&json!(u64::MAX))), Some(i64::MAX));
    }

    #[test]
    fn clamp_level_bounds() {
        assert_eq!(clamp_level(-7, 2, 6), 2);
        assert_eq!(clamp_level(4, 2, 6), 4);
        assert_eq!(clamp_level(i64::MAX, 2, 6), 6);
    }
}
