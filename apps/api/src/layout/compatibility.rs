//! Field Compatibility Evaluator — per-field verdicts for a selection on a (layout, size) pair.
//!
//! # Rules
//! - Unsupported fields are forced off and carry a hint explaining why; they are not toggleable.
//! - The manufacturer field is mandatory wherever the layout places it and is never toggleable.
//! - Supported fields are measured against their budget using the supplied value, or the
//!   field's preview value when nothing was supplied.
//!
//! The caller owns the [`FieldSelection`] and re-runs [`evaluate`] after every change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::capability::{CapabilityTable, LayoutProfile};
use crate::layout::catalog::{FieldId, LabelSize, LayoutKind};
use crate::layout::text_fit::{char_length, estimate_fit, FitVerdict};
use crate::models::SourceRow;

// ────────────────────────────────────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldToggle {
    pub field: FieldId,
    pub enabled: bool,
}

/// Ordered set of fields with their on/off state. Each field appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FieldToggle>", into = "Vec<FieldToggle>")]
pub struct FieldSelection {
    toggles: Vec<FieldToggle>,
}

impl From<Vec<FieldToggle>> for FieldSelection {
    fn from(toggles: Vec<FieldToggle>) -> Self {
        FieldSelection::new(toggles)
    }
}

impl From<FieldSelection> for Vec<FieldToggle> {
    fn from(selection: FieldSelection) -> Self {
        selection.toggles
    }
}

impl FieldSelection {
    /// Builds a selection, keeping the first occurrence of any repeated field.
    pub fn new(toggles: impl IntoIterator<Item = FieldToggle>) -> Self {
        let mut kept: Vec<FieldToggle> = Vec::new();
        for toggle in toggles {
            if !kept.iter().any(|t| t.field == toggle.field) {
                kept.push(toggle);
            }
        }
        FieldSelection { toggles: kept }
    }

    pub fn all_enabled(fields: &[FieldId]) -> Self {
        Self::new(fields.iter().map(|&field| FieldToggle {
            field,
            enabled: true,
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldToggle> {
        self.toggles.iter()
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.toggles.iter().any(|t| t.field == field)
    }

    pub fn is_enabled(&self, field: FieldId) -> bool {
        self.toggles
            .iter()
            .any(|t| t.field == field && t.enabled)
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Flips a field. Returns false (and changes nothing) when the field is absent from the
    /// selection, unsupported on the profile, or not user-toggleable.
    pub fn toggle(&mut self, field: FieldId, profile: &LayoutProfile<'_>) -> bool {
        if !field.is_user_toggleable() || !profile.is_supported(field) {
            return false;
        }
        match self.toggles.iter_mut().find(|t| t.field == field) {
            Some(toggle) => {
                toggle.enabled = !toggle.enabled;
                true
            }
            None => false,
        }
    }

    /// Forces unsupported fields off and the mandatory manufacturer field on where supported.
    /// A mandatory field the layout places but the selection omits is appended.
    pub fn constrain(&mut self, profile: &LayoutProfile<'_>) {
        for toggle in &mut self.toggles {
            toggle.enabled = effective_enabled(toggle, profile);
        }

        let missing: Vec<FieldId> = profile
            .supported_fields()
            .filter(|field| !field.is_user_toggleable() && !self.contains(*field))
            .collect();
        self.toggles.extend(missing.into_iter().map(|field| FieldToggle {
            field,
            enabled: true,
        }));
    }
}

fn effective_enabled(toggle: &FieldToggle, profile: &LayoutProfile<'_>) -> bool {
    if !profile.is_supported(toggle.field) {
        false
    } else if !toggle.field.is_user_toggleable() {
        true
    } else {
        toggle.enabled
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field values
// ────────────────────────────────────────────────────────────────────────────

/// Text to measure per field. A `null` value is treated as "not supplied yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<FieldId, Option<String>>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.0.insert(field, Some(value.into()));
        self
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).and_then(|v| v.as_deref())
    }

    /// The longest value of each field across all rows, read from the column named by
    /// [`FieldId::key`]. Fields with no column in any row are left unset.
    pub fn worst_case(rows: &[SourceRow]) -> Self {
        let mut values = BTreeMap::new();
        for field in FieldId::ALL {
            let longest = rows
                .iter()
                .filter_map(|row| row.column(field.key()))
                .fold(None::<&str>, |best, candidate| match best {
                    Some(b) if char_length(b) >= char_length(candidate) => Some(b),
                    _ => Some(candidate),
                });
            if let Some(value) = longest {
                values.insert(field, Some(value.to_string()));
            }
        }
        FieldValues(values)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluation
// ────────────────────────────────────────────────────────────────────────────

/// Verdict for one field of the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub field: FieldId,
    pub supported: bool,
    /// Whether the field will be printed, after constraints.
    pub enabled: bool,
    /// Whether the user may flip this field in the current layout/size.
    pub toggleable: bool,
    /// Why the field is locked, for display next to a non-interactive control.
    pub hint: Option<String>,
    /// Present for supported fields only.
    pub fit: Option<FitVerdict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEvaluation {
    pub layout: LayoutKind,
    pub size: LabelSize,
    /// One report per selected field, in selection order, followed by any mandatory field
    /// the selection omitted.
    pub fields: Vec<FieldReport>,
}

impl FieldEvaluation {
    /// User-selectable fields that will actually be printed. The mandatory manufacturer
    /// line is printed as well but does not count: a label carrying only it is empty.
    pub fn usable_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|r| r.enabled && r.toggleable)
            .count()
    }

    /// Printed fields whose value exceeds the budget.
    pub fn overflowing(&self) -> impl Iterator<Item = (&FieldReport, &FitVerdict)> {
        self.fields.iter().filter_map(|report| match &report.fit {
            Some(fit) if report.enabled && fit.is_over_limit => Some((report, fit)),
            _ => None,
        })
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldReport> {
        self.fields.iter().find(|r| r.field == field)
    }
}

/// Evaluates `selection` against the (layout, size) pair. Pure; safe to call on every edit.
pub fn evaluate(
    table: &CapabilityTable,
    layout: LayoutKind,
    size: LabelSize,
    selection: &FieldSelection,
    values: &FieldValues,
) -> FieldEvaluation {
    let profile = table.profile(layout, size);
    let mut selection = selection.clone();
    selection.constrain(&profile);

    let fields = selection
        .iter()
        .map(|toggle| report_field(&profile, toggle, values))
        .collect();

    FieldEvaluation {
        layout,
        size,
        fields,
    }
}

fn report_field(profile: &LayoutProfile<'_>, toggle: &FieldToggle, values: &FieldValues) -> FieldReport {
    let field = toggle.field;
    let capability = profile.capability(field);

    if !capability.supported {
        return FieldReport {
            field,
            supported: false,
            enabled: false,
            toggleable: false,
            hint: Some(format!(
                "{} is not available on the {} layout at {}",
                field.label(),
                profile.layout.label(),
                profile.size.label()
            )),
            fit: None,
        };
    }

    let value = values.get(field).or_else(|| field.preview_value());
    let fit = estimate_fit(field, value, capability.max_chars, capability.min_font_size_pt);
    let toggleable = field.is_user_toggleable();

    FieldReport {
        field,
        supported: true,
        enabled: effective_enabled(toggle, profile),
        toggleable,
        hint: (!toggleable).then(|| format!("{} is always printed on this layout", field.label())),
        fit: Some(fit),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapabilityTable {
        CapabilityTable::build().unwrap()
    }

    fn selection_of(toggles: &[(FieldId, bool)]) -> FieldSelection {
        FieldSelection::new(
            toggles
                .iter()
                .map(|&(field, enabled)| FieldToggle { field, enabled }),
        )
    }

    #[test]
    fn test_selection_dedup_keeps_first() {
        let sel = selection_of(&[
            (FieldId::Article, true),
            (FieldId::Size, true),
            (FieldId::Article, false),
        ]);
        assert_eq!(sel.len(), 2);
        assert!(sel.is_enabled(FieldId::Article));
    }

    #[test]
    fn test_selection_deserializes_from_list() {
        let sel: FieldSelection = serde_json::from_str(
            r#"[{"field":"price","enabled":true},{"field":"price","enabled":false}]"#,
        )
        .unwrap();
        assert_eq!(sel.len(), 1);
        assert!(sel.is_enabled(FieldId::Price));
    }

    #[test]
    fn test_toggle_unsupported_is_noop() {
        let table = table();
        let profile = table.profile(LayoutKind::ThreeFieldSmall, LabelSize::Mm40x30);
        let mut sel = selection_of(&[(FieldId::Price, false)]);
        let before = sel.clone();
        assert!(!sel.toggle(FieldId::Price, &profile));
        assert!(!sel.toggle(FieldId::Price, &profile));
        assert_eq!(sel, before);
    }

    #[test]
    fn test_toggle_organization_is_noop() {
        let table = table();
        let profile = table.profile(LayoutKind::Standard, LabelSize::Mm58x40);
        let mut sel = selection_of(&[(FieldId::Organization, true)]);
        assert!(!sel.toggle(FieldId::Organization, &profile));
        assert!(sel.is_enabled(FieldId::Organization));
    }

    #[test]
    fn test_toggle_supported_flips() {
        let table = table();
        let profile = table.profile(LayoutKind::Standard, LabelSize::Mm58x40);
        let mut sel = selection_of(&[(FieldId::Price, false)]);
        assert!(sel.toggle(FieldId::Price, &profile));
        assert!(sel.is_enabled(FieldId::Price));
        assert!(sel.toggle(FieldId::Price, &profile));
        assert!(!sel.is_enabled(FieldId::Price));
    }

    #[test]
    fn test_constrain_forces_unsupported_off_and_organization_on() {
        let table = table();
        let profile = table.profile(LayoutKind::ThreeFieldSmall, LabelSize::Mm40x30);
        let mut sel = selection_of(&[
            (FieldId::Price, true),
            (FieldId::Organization, false),
            (FieldId::Article, true),
        ]);
        sel.constrain(&profile);
        assert!(!sel.is_enabled(FieldId::Price));
        assert!(sel.is_enabled(FieldId::Organization));
        assert!(sel.is_enabled(FieldId::Article));
    }

    #[test]
    fn test_constrain_appends_missing_organization() {
        let table = table();
        let profile = table.profile(LayoutKind::Standard, LabelSize::Mm58x40);
        let mut sel = selection_of(&[(FieldId::ProductName, true)]);
        sel.constrain(&profile);
        assert_eq!(sel.len(), 2);
        assert!(sel.is_enabled(FieldId::Organization));

        let once = sel.clone();
        sel.constrain(&profile);
        assert_eq!(sel, once);
    }

    #[test]
    fn test_evaluate_reports_omitted_organization_as_enabled() {
        let table = table();
        let sel = selection_of(&[(FieldId::ProductName, true)]);
        let eval = evaluate(
            &table,
            LayoutKind::Standard,
            LabelSize::Mm58x40,
            &sel,
            &FieldValues::new(),
        );
        assert_eq!(eval.fields.len(), 2);
        assert_eq!(eval.fields[1].field, FieldId::Organization);
        assert!(eval.fields[1].enabled);
        assert!(!eval.fields[1].toggleable);
        assert_eq!(eval.usable_count(), 1);
    }

    #[test]
    fn test_empty_selection_has_no_usable_fields() {
        let table = table();
        let eval = evaluate(
            &table,
            LayoutKind::ThreeFieldSmall,
            LabelSize::Mm40x30,
            &FieldSelection::default(),
            &FieldValues::new(),
        );
        assert_eq!(eval.fields.len(), 1);
        assert!(eval.get(FieldId::Organization).unwrap().enabled);
        assert_eq!(eval.usable_count(), 0);
    }

    #[test]
    fn test_unsupported_field_is_never_enabled_in_report() {
        let table = table();
        for layout in LayoutKind::ALL {
            for size in LabelSize::ALL {
                let sel = FieldSelection::all_enabled(&FieldId::ALL);
                let eval = evaluate(&table, layout, size, &sel, &FieldValues::new());
                for report in &eval.fields {
                    if !report.supported {
                        assert!(!report.enabled, "{layout:?}/{size:?}/{:?}", report.field);
                        assert!(!report.toggleable);
                        assert!(report.hint.is_some());
                        assert!(report.fit.is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn test_unsupported_hint_names_layout_and_size() {
        let table = table();
        let sel = selection_of(&[(FieldId::SerialNumber, true)]);
        let eval = evaluate(
            &table,
            LayoutKind::ThreeFieldSmall,
            LabelSize::Mm40x30,
            &sel,
            &FieldValues::new(),
        );
        let hint = eval.fields[0].hint.as_deref().unwrap();
        assert!(hint.contains("Serial number"), "{hint}");
        assert!(hint.contains("Three fields, small"), "{hint}");
        assert!(hint.contains("40 × 30 mm"), "{hint}");
    }

    #[test]
    fn test_organization_cannot_be_disabled() {
        let table = table();
        let sel = selection_of(&[(FieldId::Organization, false)]);
        let eval = evaluate(
            &table,
            LayoutKind::Standard,
            LabelSize::Mm58x40,
            &sel,
            &FieldValues::new(),
        );
        let report = eval.get(FieldId::Organization).unwrap();
        assert!(report.enabled);
        assert!(!report.toggleable);
        assert!(report.hint.is_some());
    }

    #[test]
    fn test_preview_value_used_when_no_value_supplied() {
        let table = table();
        let sel = selection_of(&[(FieldId::ProductName, true)]);
        let eval = evaluate(
            &table,
            LayoutKind::Standard,
            LabelSize::Mm58x40,
            &sel,
            &FieldValues::new(),
        );
        let fit = eval.fields[0].fit.as_ref().unwrap();
        assert_eq!(fit.length, char_length("Cotton T-shirt"));
        assert!(!fit.is_over_limit);
    }

    #[test]
    fn test_overflow_reported_only_for_enabled_fields() {
        let table = table();
        let long = "x".repeat(60);
        let values = FieldValues::new()
            .with(FieldId::ProductName, long.clone())
            .with(FieldId::Article, long);
        let sel = selection_of(&[(FieldId::ProductName, true), (FieldId::Article, false)]);
        let eval = evaluate(&table, LayoutKind::Standard, LabelSize::Mm58x40, &sel, &values);
        let over: Vec<_> = eval.overflowing().map(|(r, _)| r.field).collect();
        assert_eq!(over, vec![FieldId::ProductName]);
        assert!(eval.get(FieldId::Article).unwrap().fit.as_ref().unwrap().is_over_limit);
        assert_eq!(eval.usable_count(), 1);
    }

    #[test]
    fn test_worst_case_picks_longest_value() {
        let rows = vec![
            SourceRow::new("1").with_column("product-name", "Short"),
            SourceRow::new("2").with_column("product-name", "A much longer name"),
            SourceRow::new("3").with_column("article", "A-1"),
        ];
        let values = FieldValues::worst_case(&rows);
        assert_eq!(values.get(FieldId::ProductName), Some("A much longer name"));
        assert_eq!(values.get(FieldId::Article), Some("A-1"));
        assert_eq!(values.get(FieldId::Price), None);
    }

    #[test]
    fn test_null_value_falls_back_to_preview() {
        let values: FieldValues = serde_json::from_str(r#"{"size": null}"#).unwrap();
        assert_eq!(values.get(FieldId::Size), None);
        let table = table();
        let sel = selection_of(&[(FieldId::Size, true)]);
        let eval = evaluate(&table, LayoutKind::Standard, LabelSize::Mm58x40, &sel, &values);
        assert_eq!(eval.fields[0].fit.as_ref().unwrap().length, 2);
    }
}
