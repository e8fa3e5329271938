//! Text Fit Estimator — decides whether a field value fits its character budget.
//!
//! The budget is a monospaced-equivalent character count calibrated against the label
//! renderer, not a glyph-width measurement. Values are counted in Unicode scalar values
//! so Cyrillic and other non-ASCII text costs one slot per character, same as ASCII.
//!
//! Overflow is advisory: the renderer drops to the minimum font size and truncates as a
//! last resort, so an over-budget value yields a warning, never a rejection.

use serde::{Deserialize, Serialize};

use crate::layout::catalog::FieldId;

/// Result of measuring one field value against its budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitVerdict {
    pub is_over_limit: bool,
    /// Measured length in characters.
    pub length: usize,
    pub max_chars: u16,
    /// Characters past the budget; 0 when the value fits.
    pub overflow_chars: usize,
    pub warning: Option<String>,
}

/// Character count used for budgeting.
pub fn char_length(value: &str) -> usize {
    value.chars().count()
}

/// Measures `value` against `max_chars`. A missing or empty value always fits, and a value
/// exactly at the budget fits.
pub fn estimate_fit(
    field: FieldId,
    value: Option<&str>,
    max_chars: u16,
    min_font_size_pt: f32,
) -> FitVerdict {
    let length = value.map(char_length).unwrap_or(0);
    let budget = usize::from(max_chars);

    if length <= budget {
        return FitVerdict {
            is_over_limit: false,
            length,
            max_chars,
            overflow_chars: 0,
            warning: None,
        };
    }

    FitVerdict {
        is_over_limit: true,
        length,
        max_chars,
        overflow_chars: length - budget,
        warning: Some(format!(
            "{} is {} characters long but only {} fit; it will be shown at the minimum font size ({}pt) and may be truncated",
            field.label(),
            length,
            max_chars,
            min_font_size_pt
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_overflows() {
        let v = estimate_fit(FieldId::ProductName, None, 5, 6.0);
        assert!(!v.is_over_limit);
        assert_eq!(v.length, 0);
        assert!(v.warning.is_none());
    }

    #[test]
    fn test_empty_never_overflows() {
        let v = estimate_fit(FieldId::ProductName, Some(""), 1, 6.0);
        assert!(!v.is_over_limit);
    }

    #[test]
    fn test_exactly_at_budget_fits() {
        let value = "a".repeat(20);
        let v = estimate_fit(FieldId::ProductName, Some(&value), 20, 5.0);
        assert!(!v.is_over_limit, "value at the budget must not overflow");
        assert_eq!(v.overflow_chars, 0);
    }

    #[test]
    fn test_one_past_budget_overflows() {
        let value = "a".repeat(21);
        let v = estimate_fit(FieldId::ProductName, Some(&value), 20, 5.0);
        assert!(v.is_over_limit);
        assert_eq!(v.overflow_chars, 1);
    }

    #[test]
    fn test_warning_names_field_length_and_budget() {
        let value = "x".repeat(40);
        let v = estimate_fit(FieldId::Article, Some(&value), 20, 4.5);
        let warning = v.warning.expect("overflow should carry a warning");
        assert!(warning.starts_with("Article is 40 characters"), "{warning}");
        assert!(warning.contains("only 20 fit"), "{warning}");
        assert!(warning.contains("4.5pt"), "{warning}");
        assert!(warning.contains("may be truncated"), "{warning}");
    }

    #[test]
    fn test_non_ascii_counts_characters_not_bytes() {
        // 10 Cyrillic letters = 20 bytes
        let value = "Футболками";
        assert_eq!(value.len(), 20);
        assert_eq!(char_length(value), 10);
        let v = estimate_fit(FieldId::ProductName, Some(value), 10, 6.0);
        assert!(!v.is_over_limit);
    }
}
