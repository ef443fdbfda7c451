//! Boundary normalization for loosely-typed truthy flags.
//!
//! The Events System stores "allow outsiders" flags in mixed forms
//! (boolean, number, string). They are normalized exactly once, here,
//! against an enumerated accepted-literal set instead of ad hoc
//! comparisons at each call site.

use serde_json::Value;

/// Normalize an "allow outsiders" flag.
///
/// Accepted true literals: boolean `true`, number `1`, strings `"true"`
/// and `"1"`. Everything else (including absence) is false.
pub fn allows_outsiders(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.as_str(), "true" | "1"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_enumerated_true_literals() {
        assert!(allows_outsiders(Some(&json!(true))));
        assert!(allows_outsiders(Some(&json!(1))));
        assert!(allows_outsiders(Some(&json!("true"))));
        assert!(allows_outsiders(Some(&json!("1"))));
    }

    #[test]
    fn everything_else_is_false() {
        assert!(!allows_outsiders(None));
        assert!(!allows_outsiders(Some(&json!(false))));
        assert!(!allows_outsiders(Some(&json!(0))));
        assert!(!allows_outsiders(Some(&json!(2))));
        assert!(!allows_outsiders(Some(&json!("false"))));
        assert!(!allows_outsiders(Some(&json!("TRUE"))));
        assert!(!allows_outsiders(Some(&json!("yes"))));
        assert!(!allows_outsiders(Some(&json!(""))));
        assert!(!allows_outsiders(Some(&json!(null))));
        assert!(!allows_outsiders(Some(&json!([1]))));
        assert!(!allows_outsiders(Some(&json!({"allowed": true}))));
    }

    #[test]
    fn non_integer_numbers_are_false() {
        assert!(!allows_outsiders(Some(&json!(1.5))));
        assert!(!allows_outsiders(Some(&json!(-1))));
    }
}
