//! Reusable field validators
//!
//! These operate on raw form values (`None` when the field was not submitted) and are
//! composed into the invoice rule table in [`super::schema`].

/// Validator: field was submitted at all
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw
}

/// Coerce a raw form value to a number
///
/// Missing and blank values coerce to `0`, surrounding whitespace is ignored, and
/// anything unparseable coerces to `NaN` so that range checks reject it.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(s) => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Validator: number is finite and strictly greater than `min`
pub fn greater_than(min: f64) -> impl Fn(f64) -> bool + Send + Sync + Clone {
    move |value: f64| value.is_finite() && value > min
}

/// Validator: value is exactly one of the allowed strings
pub fn one_of(allowed: &'static [&'static str]) -> impl Fn(Option<&str>) -> bool + Send + Sync + Clone {
    move |raw: Option<&str>| raw.is_some_and(|s| allowed.contains(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    // === present() ===

    #[test]
    fn test_present_missing_value() {
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_present_keeps_empty_string() {
        assert_eq!(present(Some("")), Some(""));
    }

    #[test]
    fn test_present_keeps_whitespace() {
        assert_eq!(present(Some("  ")), Some("  "));
    }

    // === coerce_number() ===

    #[test]
    fn test_coerce_number_missing_is_zero() {
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn test_coerce_number_blank_is_zero() {
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("  ")), 0.0);
    }

    #[test]
    fn test_coerce_number_parses_decimal() {
        assert_eq!(coerce_number(Some("42.50")), 42.5);
        assert_eq!(coerce_number(Some(" 7 ")), 7.0);
        assert_eq!(coerce_number(Some("1e3")), 1000.0);
    }

    #[test]
    fn test_coerce_number_garbage_is_nan() {
        assert!(coerce_number(Some("abc")).is_nan());
        assert!(coerce_number(Some("12,50")).is_nan());
    }

    // === greater_than() ===

    #[test]
    fn test_greater_than_is_strict() {
        let v = greater_than(0.0);
        assert!(!v(0.0));
        assert!(!v(-0.01));
        assert!(v(0.01));
    }

    #[test]
    fn test_greater_than_rejects_non_finite() {
        let v = greater_than(0.0);
        assert!(!v(f64::NAN));
        assert!(!v(f64::INFINITY));
    }

    // === one_of() ===

    #[test]
    fn test_one_of_exact_match() {
        let v = one_of(&["pending", "paid"]);
        assert!(v(Some("pending")));
        assert!(v(Some("paid")));
        assert!(!v(Some("PAID")));
        assert!(!v(Some("overdue")));
        assert!(!v(None));
    }
}
