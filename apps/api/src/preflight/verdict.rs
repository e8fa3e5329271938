use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::catalog::FieldId;
use crate::layout::compatibility::FieldReport;
use crate::matching::{MatchRecord, MatchSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// Rendering must not start.
    Blocked,
    /// Rendering may start once the user acknowledges the warnings.
    Warned,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockingKind {
    /// Nothing printable remains after unsupported fields are forced off.
    NoUsableFields,
    /// Both sources have rows but no identifier appears on both sides.
    TotalMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingIssue {
    pub kind: BlockingKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    TextOverflow,
    UnmatchedRows,
    UnmatchedCodes,
    DuplicateIdentifiers,
    BlankIdentifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldId>,
    pub message: String,
}

/// The single result of a preflight check. Owns no input data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightVerdict {
    pub status: VerdictStatus,
    pub blocking: Vec<BlockingIssue>,
    pub warnings: Vec<Warning>,
    pub field_verdicts: BTreeMap<FieldId, FieldReport>,
    pub match_summary: MatchSummary,
    /// Unmatched and duplicated identifiers with their row positions, capped; the summary
    /// holds the full counts.
    pub match_details: Vec<MatchRecord>,
}

impl PreflightVerdict {
    pub fn is_blocked(&self) -> bool {
        !self.blocking.is_empty()
    }
}
