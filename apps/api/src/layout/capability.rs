//! Layout Capability Table — which fields each (layout, size) pair can print, and how much text.
//!
//! The budgets below are design facts of the label stock and print head, curated by hand.
//! `maxChars` is a monospaced-equivalent character budget at `minFontSizePt`; the renderer
//! shrinks to that size before it truncates.
//!
//! The source rows are checked once at startup by [`CapabilityTable::build`] and then stored
//! as a dense grid indexed by the enum discriminants, so a lookup can never miss:
//! - every (layout, size) pair must be listed exactly once, or startup fails
//! - a field not listed for a pair is stored as explicitly unsupported

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::catalog::{FieldId, LabelSize, LayoutKind};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Capability of one field on one (layout, size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCapability {
    pub supported: bool,
    pub max_chars: u16,
    pub min_font_size_pt: f32,
}

impl FieldCapability {
    pub const UNSUPPORTED: FieldCapability = FieldCapability {
        supported: false,
        max_chars: 0,
        min_font_size_pt: 0.0,
    };

    pub const fn supported(max_chars: u16, min_font_size_pt: f32) -> Self {
        FieldCapability {
            supported: true,
            max_chars,
            min_font_size_pt,
        }
    }
}

/// One hand-curated source row: a (layout, size) pair and the fields it can place.
pub struct PairSpec {
    pub layout: LayoutKind,
    pub size: LabelSize,
    /// `(field, max_chars, min_font_size_pt)`
    pub fields: &'static [(FieldId, u16, f32)],
}

#[derive(Debug, Error, PartialEq)]
pub enum CapabilityTableError {
    #[error("capability table has no entry for layout '{}' at size '{}'", .0.key(), .1.key())]
    MissingPair(LayoutKind, LabelSize),

    #[error("capability table lists layout '{}' at size '{}' more than once", .0.key(), .1.key())]
    DuplicatePair(LayoutKind, LabelSize),

    #[error("field '{}' is listed twice for layout '{}' at size '{}'", .2.key(), .0.key(), .1.key())]
    DuplicateField(LayoutKind, LabelSize, FieldId),

    #[error("field '{}' on layout '{}' at size '{}' has an unusable budget (max_chars={max_chars}, min_font_size_pt={min_font_size_pt})", .field.key(), .layout.key(), .size.key())]
    InvalidBudget {
        layout: LayoutKind,
        size: LabelSize,
        field: FieldId,
        max_chars: u16,
        min_font_size_pt: f32,
    },
}

type FieldRow = [FieldCapability; FieldId::COUNT];

/// Read-only, fully populated capability grid. Build once, share behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityTable {
    grid: [[FieldRow; LabelSize::COUNT]; LayoutKind::COUNT],
}

/// The capability row of a single (layout, size) pair.
#[derive(Debug, Clone, Copy)]
pub struct LayoutProfile<'a> {
    pub layout: LayoutKind,
    pub size: LabelSize,
    row: &'a FieldRow,
}

impl<'a> LayoutProfile<'a> {
    pub fn capability(&self, field: FieldId) -> FieldCapability {
        self.row[field.index()]
    }

    pub fn is_supported(&self, field: FieldId) -> bool {
        self.row[field.index()].supported
    }

    /// Supported fields in `FieldId::ALL` order.
    pub fn supported_fields(&self) -> impl Iterator<Item = FieldId> + 'a {
        let row = self.row;
        FieldId::ALL
            .into_iter()
            .filter(move |field| row[field.index()].supported)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Construction and lookup
// ────────────────────────────────────────────────────────────────────────────

impl CapabilityTable {
    /// Builds the table from the built-in curated rows.
    pub fn build() -> Result<Self, CapabilityTableError> {
        Self::from_specs(CAPABILITY_SPECS)
    }

    pub fn from_specs(specs: &[PairSpec]) -> Result<Self, CapabilityTableError> {
        let mut grid = [[[FieldCapability::UNSUPPORTED; FieldId::COUNT]; LabelSize::COUNT];
            LayoutKind::COUNT];
        let mut seen = [[false; LabelSize::COUNT]; LayoutKind::COUNT];

        for spec in specs {
            let (l, s) = (spec.layout.index(), spec.size.index());
            if seen[l][s] {
                return Err(CapabilityTableError::DuplicatePair(spec.layout, spec.size));
            }
            seen[l][s] = true;

            let mut listed = [false; FieldId::COUNT];
            for &(field, max_chars, min_font_size_pt) in spec.fields {
                if listed[field.index()] {
                    return Err(CapabilityTableError::DuplicateField(
                        spec.layout,
                        spec.size,
                        field,
                    ));
                }
                listed[field.index()] = true;

                if max_chars == 0 || !(min_font_size_pt.is_finite() && min_font_size_pt > 0.0) {
                    return Err(CapabilityTableError::InvalidBudget {
                        layout: spec.layout,
                        size: spec.size,
                        field,
                        max_chars,
                        min_font_size_pt,
                    });
                }
                grid[l][s][field.index()] = FieldCapability::supported(max_chars, min_font_size_pt);
            }
        }

        for layout in LayoutKind::ALL {
            for size in LabelSize::ALL {
                if !seen[layout.index()][size.index()] {
                    return Err(CapabilityTableError::MissingPair(layout, size));
                }
            }
        }

        Ok(CapabilityTable { grid })
    }

    /// Total lookup: every combination has an entry.
    pub fn capability(&self, layout: LayoutKind, size: LabelSize, field: FieldId) -> FieldCapability {
        self.grid[layout.index()][size.index()][field.index()]
    }

    pub fn profile(&self, layout: LayoutKind, size: LabelSize) -> LayoutProfile<'_> {
        LayoutProfile {
            layout,
            size,
            row: &self.grid[layout.index()][size.index()],
        }
    }

    /// Number of supported (layout, size, field) cells, for startup logging.
    pub fn supported_cell_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .filter(|cap| cap.supported)
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Curated rows
// ────────────────────────────────────────────────────────────────────────────

use FieldId::{Article, Organization, Price, ProductName, SerialNumber, Size};

#[rustfmt::skip]
pub static CAPABILITY_SPECS: &[PairSpec] = &[
    // Standard: code left, one line per field.
    PairSpec { layout: LayoutKind::Standard, size: LabelSize::Mm58x40, fields: &[
        (ProductName, 34, 6.0), (Article, 24, 6.0), (Size, 10, 6.0),
        (Organization, 40, 5.0), (SerialNumber, 20, 5.0), (Price, 12, 7.0),
    ] },
    PairSpec { layout: LayoutKind::Standard, size: LabelSize::Mm58x30, fields: &[
        (ProductName, 28, 6.0), (Article, 20, 6.0), (Size, 8, 6.0),
        (Organization, 32, 5.0), (Price, 10, 7.0),
    ] },
    PairSpec { layout: LayoutKind::Standard, size: LabelSize::Mm40x30, fields: &[
        (ProductName, 20, 5.0), (Article, 16, 5.0), (Size, 6, 5.0),
        (Organization, 24, 4.5),
    ] },
    // Stacked: code on top, full-width text underneath.
    PairSpec { layout: LayoutKind::Stacked, size: LabelSize::Mm58x40, fields: &[
        (ProductName, 44, 6.0), (Article, 30, 6.0), (Size, 12, 6.0),
        (Organization, 48, 5.0), (SerialNumber, 24, 5.0), (Price, 14, 7.0),
    ] },
    PairSpec { layout: LayoutKind::Stacked, size: LabelSize::Mm58x30, fields: &[
        (ProductName, 40, 6.0), (Article, 28, 6.0), (Size, 10, 6.0),
        (Organization, 44, 5.0),
    ] },
    PairSpec { layout: LayoutKind::Stacked, size: LabelSize::Mm40x30, fields: &[
        (ProductName, 30, 5.0), (Article, 20, 5.0),
        (Organization, 32, 4.5),
    ] },
    // Three fields, small: three short lines beside the code, manufacturer as footer.
    PairSpec { layout: LayoutKind::ThreeFieldSmall, size: LabelSize::Mm58x40, fields: &[
        (ProductName, 30, 6.0), (Article, 22, 6.0), (Size, 8, 6.0),
        (Organization, 34, 5.0),
    ] },
    PairSpec { layout: LayoutKind::ThreeFieldSmall, size: LabelSize::Mm58x30, fields: &[
        (ProductName, 26, 5.5), (Article, 18, 5.5), (Size, 8, 5.5),
        (Organization, 30, 4.5),
    ] },
    PairSpec { layout: LayoutKind::ThreeFieldSmall, size: LabelSize::Mm40x30, fields: &[
        (ProductName, 20, 5.0), (Article, 14, 5.0), (Size, 6, 5.0),
        (Organization, 22, 4.5),
    ] },
];

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CapabilityTable {
        CapabilityTable::build().expect("built-in capability table must be complete")
    }

    #[test]
    fn test_builtin_table_builds() {
        let table = table();
        assert!(table.supported_cell_count() > 0);
    }

    #[test]
    fn test_capability_is_total() {
        let table = table();
        for layout in LayoutKind::ALL {
            for size in LabelSize::ALL {
                let profile = table.profile(layout, size);
                assert!(
                    profile.supported_fields().count() > 0,
                    "{layout:?}/{size:?} should support at least one field"
                );
                for field in FieldId::ALL {
                    let cap = table.capability(layout, size, field);
                    assert_eq!(cap, profile.capability(field));
                    if cap.supported {
                        assert!(cap.max_chars > 0);
                        assert!(cap.min_font_size_pt > 0.0);
                    } else {
                        assert_eq!(cap, FieldCapability::UNSUPPORTED);
                    }
                }
            }
        }
    }

    #[test]
    fn test_unlisted_field_is_unsupported() {
        let table = table();
        let cap = table.capability(LayoutKind::ThreeFieldSmall, LabelSize::Mm40x30, Price);
        assert!(!cap.supported);
    }

    #[test]
    fn test_three_field_small_40x30_product_name_budget() {
        let cap = table().capability(LayoutKind::ThreeFieldSmall, LabelSize::Mm40x30, ProductName);
        assert!(cap.supported);
        assert_eq!(cap.max_chars, 20);
    }

    #[test]
    fn test_missing_pair_fails_closed() {
        let specs = &CAPABILITY_SPECS[..CAPABILITY_SPECS.len() - 1];
        let err = CapabilityTable::from_specs(specs).unwrap_err();
        assert_eq!(
            err,
            CapabilityTableError::MissingPair(LayoutKind::ThreeFieldSmall, LabelSize::Mm40x30)
        );
        assert!(err.to_string().contains("three-field-small"));
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let specs = [
            PairSpec { layout: LayoutKind::Standard, size: LabelSize::Mm58x40, fields: &[] },
            PairSpec { layout: LayoutKind::Standard, size: LabelSize::Mm58x40, fields: &[] },
        ];
        assert_eq!(
            CapabilityTable::from_specs(&specs).unwrap_err(),
            CapabilityTableError::DuplicatePair(LayoutKind::Standard, LabelSize::Mm58x40)
        );
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let specs = [PairSpec {
            layout: LayoutKind::Stacked,
            size: LabelSize::Mm58x30,
            fields: &[(Article, 10, 6.0), (Article, 12, 6.0)],
        }];
        assert_eq!(
            CapabilityTable::from_specs(&specs).unwrap_err(),
            CapabilityTableError::DuplicateField(LayoutKind::Stacked, LabelSize::Mm58x30, Article)
        );
    }

    #[test]
    fn test_zero_budget_rejected() {
        let specs = [PairSpec {
            layout: LayoutKind::Stacked,
            size: LabelSize::Mm58x30,
            fields: &[(Size, 0, 6.0)],
        }];
        assert!(matches!(
            CapabilityTable::from_specs(&specs),
            Err(CapabilityTableError::InvalidBudget { field: Size, .. })
        ));
    }
}
