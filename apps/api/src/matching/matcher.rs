//! Cross-Source Matcher — correlates spreadsheet rows with decoded compliance codes.
//!
//! Identifiers are compared exactly after trimming and lowercasing. There is no fuzzy
//! matching: identifiers are machine-generated codes, and a near miss is a data error the
//! user must see. Duplicates on either side mark the identifier ambiguous instead of
//! picking one occurrence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Identified;

/// Outcome for one normalized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub identifier: String,
    /// Zero-based positions of the spreadsheet rows carrying this identifier.
    pub left_rows: Vec<usize>,
    /// Zero-based positions of the compliance entries carrying this identifier.
    pub right_entries: Vec<usize>,
    pub ambiguous: bool,
}

impl MatchRecord {
    pub fn left_present(&self) -> bool {
        !self.left_rows.is_empty()
    }

    pub fn right_present(&self) -> bool {
        !self.right_entries.is_empty()
    }

    pub fn is_matched(&self) -> bool {
        self.left_present() && self.right_present()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub matched_count: usize,
    pub unmatched_left_count: usize,
    pub unmatched_right_count: usize,
    pub ambiguous_count: usize,
    /// Rows whose identifier was blank after normalization; these are never matched.
    pub blank_left_count: usize,
    pub blank_right_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Sorted by normalized identifier.
    pub records: Vec<MatchRecord>,
    pub left_total: usize,
    pub right_total: usize,
    pub blank_left_count: usize,
    pub blank_right_count: usize,
}

impl MatchReport {
    pub fn summary(&self) -> MatchSummary {
        let mut summary = MatchSummary {
            blank_left_count: self.blank_left_count,
            blank_right_count: self.blank_right_count,
            ..MatchSummary::default()
        };
        for record in &self.records {
            match (record.left_present(), record.right_present()) {
                (true, true) => summary.matched_count += 1,
                (true, false) => summary.unmatched_left_count += 1,
                (false, true) => summary.unmatched_right_count += 1,
                (false, false) => {}
            }
            if record.ambiguous {
                summary.ambiguous_count += 1;
            }
        }
        summary
    }

    pub fn ambiguous(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.ambiguous)
    }

    /// Orphans and duplicates, in identifier order: the records a user has to fix.
    pub fn needing_attention(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|r| r.ambiguous || !r.is_matched())
    }

    /// Both sources had rows yet not a single identifier lines up.
    pub fn is_total_mismatch(&self) -> bool {
        self.left_total > 0 && self.right_total > 0 && !self.records.iter().any(|r| r.is_matched())
    }
}

pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Correlates `left` and `right` by normalized identifier, one record per identifier.
pub fn match_sources<L: Identified, R: Identified>(left: &[L], right: &[R]) -> MatchReport {
    let mut index: BTreeMap<String, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    let mut blank_left_count = 0;
    let mut blank_right_count = 0;

    for (pos, row) in left.iter().enumerate() {
        let key = normalize_identifier(row.identifier());
        if key.is_empty() {
            blank_left_count += 1;
            continue;
        }
        index.entry(key).or_default().0.push(pos);
    }

    for (pos, entry) in right.iter().enumerate() {
        let key = normalize_identifier(entry.identifier());
        if key.is_empty() {
            blank_right_count += 1;
            continue;
        }
        index.entry(key).or_default().1.push(pos);
    }

    let records = index
        .into_iter()
        .map(|(identifier, (left_rows, right_entries))| MatchRecord {
            ambiguous: left_rows.len() > 1 || right_entries.len() > 1,
            identifier,
            left_rows,
            right_entries,
        })
        .collect();

    MatchReport {
        records,
        left_total: left.len(),
        right_total: right.len(),
        blank_left_count,
        blank_right_count,
    }
}
