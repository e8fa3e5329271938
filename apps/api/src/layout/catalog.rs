//! Closed enumerations for label templates: layouts, physical sizes and content fields.
//!
//! Every enum carries a dense `index()` so the capability table can be stored as a
//! fixed-size grid instead of a keyed map. `ALL` arrays list variants in index order.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Layout kind
// ────────────────────────────────────────────────────────────────────────────

/// Visual arrangement of the compliance code and text fields on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Code on the left, one text line per field in a column on the right.
    Standard,
    /// Code on top, full-width text lines underneath.
    Stacked,
    /// Code on the left, at most three short text lines beside it.
    ThreeFieldSmall,
}

impl LayoutKind {
    pub const COUNT: usize = 3;
    pub const ALL: [LayoutKind; Self::COUNT] = [
        LayoutKind::Standard,
        LayoutKind::Stacked,
        LayoutKind::ThreeFieldSmall,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::Stacked => "stacked",
            LayoutKind::ThreeFieldSmall => "three-field-small",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutKind::Standard => "Standard",
            LayoutKind::Stacked => "Stacked",
            LayoutKind::ThreeFieldSmall => "Three fields, small",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Label size
// ────────────────────────────────────────────────────────────────────────────

/// Physical label stock, width × height in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LabelSize {
    #[serde(rename = "58x40")]
    Mm58x40,
    #[serde(rename = "58x30")]
    Mm58x30,
    #[serde(rename = "40x30")]
    Mm40x30,
}

impl LabelSize {
    pub const COUNT: usize = 3;
    pub const ALL: [LabelSize; Self::COUNT] =
        [LabelSize::Mm58x40, LabelSize::Mm58x30, LabelSize::Mm40x30];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            LabelSize::Mm58x40 => "58x40",
            LabelSize::Mm58x30 => "58x30",
            LabelSize::Mm40x30 => "40x30",
        }
    }

    /// `(width_mm, height_mm)`
    pub fn dimensions_mm(self) -> (u16, u16) {
        match self {
            LabelSize::Mm58x40 => (58, 40),
            LabelSize::Mm58x30 => (58, 30),
            LabelSize::Mm40x30 => (40, 30),
        }
    }

    pub fn label(self) -> String {
        let (w, h) = self.dimensions_mm();
        format!("{w} × {h} mm")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field id
// ────────────────────────────────────────────────────────────────────────────

/// A piece of text content that can be placed on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    ProductName,
    Article,
    Size,
    /// Organization / manufacturer. Printed wherever the layout has room for it;
    /// never toggled by the user.
    Organization,
    SerialNumber,
    Price,
}

impl FieldId {
    pub const COUNT: usize = 6;
    pub const ALL: [FieldId; Self::COUNT] = [
        FieldId::ProductName,
        FieldId::Article,
        FieldId::Size,
        FieldId::Organization,
        FieldId::SerialNumber,
        FieldId::Price,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column key used to read this field from a spreadsheet row.
    pub fn key(self) -> &'static str {
        match self {
            FieldId::ProductName => "product-name",
            FieldId::Article => "article",
            FieldId::Size => "size",
            FieldId::Organization => "organization",
            FieldId::SerialNumber => "serial-number",
            FieldId::Price => "price",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::ProductName => "Product name",
            FieldId::Article => "Article",
            FieldId::Size => "Size",
            FieldId::Organization => "Manufacturer",
            FieldId::SerialNumber => "Serial number",
            FieldId::Price => "Price",
        }
    }

    /// Sample text shown (and measured) before real data is uploaded.
    pub fn preview_value(self) -> Option<&'static str> {
        match self {
            FieldId::ProductName => Some("Cotton T-shirt"),
            FieldId::Article => Some("TS-1042-BLK"),
            FieldId::Size => Some("XL"),
            FieldId::Organization => Some("Northwind Textiles LLC"),
            FieldId::SerialNumber => None,
            FieldId::Price => Some("1290.00"),
        }
    }

    pub fn is_user_toggleable(self) -> bool {
        !matches!(self, FieldId::Organization)
    }
}
