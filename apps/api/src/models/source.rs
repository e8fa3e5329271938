use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything that can be correlated by a shared product identifier.
pub trait Identified {
    fn identifier(&self) -> &str;
}

/// One spreadsheet row as delivered by the upload parser.
///
/// `identifier` is the product barcode (GTIN); `columns` holds the remaining cells keyed by
/// column name, including any label field values (`product-name`, `article`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    pub identifier: String,
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl SourceRow {
    pub fn new(identifier: impl Into<String>) -> Self {
        SourceRow {
            identifier: identifier.into(),
            columns: BTreeMap::new(),
        }
    }

    pub fn with_column(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(key.into(), value.into());
        self
    }

    pub fn column(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }
}

impl Identified for SourceRow {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// One decoded compliance code from the uploaded document.
///
/// `identifier` is the product identifier the decoder extracted; `code` keeps the full
/// decoded payload when the decoder supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceEntry {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ComplianceEntry {
    pub fn new(identifier: impl Into<String>) -> Self {
        ComplianceEntry {
            identifier: identifier.into(),
            code: None,
        }
    }
}

impl Identified for ComplianceEntry {
    fn identifier(&self) -> &str {
        &self.identifier
    }
}
