//! Preflight Orchestrator — merges field compatibility and source matching into one verdict.
//!
//! # Blocking vs. advisory
//! - Blocking: no printable field remains, or both sources have rows and none match.
//! - Advisory: text overflow, unmatched rows or codes, duplicate or blank identifiers.
//!
//! [`preflight`] is pure and deterministic: identical requests give equal verdicts.
//! The HTTP handler runs the two halves on separate blocking threads and calls
//! [`merge_verdict`] itself.

use serde::Deserialize;
use tracing::debug;

use crate::layout::capability::CapabilityTable;
use crate::layout::catalog::{LabelSize, LayoutKind};
use crate::layout::compatibility::{evaluate, FieldEvaluation, FieldSelection, FieldValues};
use crate::matching::{match_sources, MatchReport};
use crate::models::{ComplianceEntry, SourceRow};
use crate::preflight::verdict::{
    BlockingIssue, BlockingKind, PreflightVerdict, VerdictStatus, Warning, WarningKind,
};

/// How many duplicate identifiers a warning lists before summarizing.
const MAX_LISTED_DUPLICATES: usize = 5;

/// How many orphan or duplicate records a verdict carries.
pub const MAX_MATCH_DETAILS: usize = 200;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightRequest {
    pub layout: LayoutKind,
    pub size: LabelSize,
    pub selection: FieldSelection,
    /// When absent, the longest spreadsheet value per field is checked.
    #[serde(default)]
    pub values: Option<FieldValues>,
    #[serde(default)]
    pub left: Vec<SourceRow>,
    #[serde(default)]
    pub right: Vec<ComplianceEntry>,
}

impl PreflightRequest {
    pub fn effective_values(&self) -> FieldValues {
        match &self.values {
            Some(values) => values.clone(),
            None => FieldValues::worst_case(&self.left),
        }
    }
}

/// Runs both checks and merges them. Does not mutate the request.
pub fn preflight(table: &CapabilityTable, request: &PreflightRequest) -> PreflightVerdict {
    let values = request.effective_values();
    let fields = evaluate(
        table,
        request.layout,
        request.size,
        &request.selection,
        &values,
    );
    let matches = match_sources(&request.left, &request.right);
    merge_verdict(&fields, &matches)
}

pub fn merge_verdict(fields: &FieldEvaluation, matches: &MatchReport) -> PreflightVerdict {
    let summary = matches.summary();
    let mut blocking = Vec::new();
    let mut warnings = Vec::new();

    if fields.usable_count() == 0 {
        blocking.push(BlockingIssue {
            kind: BlockingKind::NoUsableFields,
            message: format!(
                "None of the selected fields can be printed on the {} layout at {}; enable at least one supported field",
                fields.layout.label(),
                fields.size.label()
            ),
        });
    }

    if matches.is_total_mismatch() {
        blocking.push(BlockingIssue {
            kind: BlockingKind::TotalMismatch,
            message: format!(
                "None of the {} spreadsheet rows match any of the {} compliance codes; check that both files belong to the same products",
                matches.left_total, matches.right_total
            ),
        });
    }

    for (report, fit) in fields.overflowing() {
        if let Some(message) = &fit.warning {
            warnings.push(Warning {
                kind: WarningKind::TextOverflow,
                field: Some(report.field),
                message: message.clone(),
            });
        }
    }

    if summary.unmatched_left_count > 0 {
        warnings.push(Warning {
            kind: WarningKind::UnmatchedRows,
            field: None,
            message: format!(
                "{} product identifiers in the spreadsheet have no compliance code",
                summary.unmatched_left_count
            ),
        });
    }

    if summary.unmatched_right_count > 0 {
        warnings.push(Warning {
            kind: WarningKind::UnmatchedCodes,
            field: None,
            message: format!(
                "{} product identifiers in the compliance codes have no spreadsheet row",
                summary.unmatched_right_count
            ),
        });
    }

    if summary.ambiguous_count > 0 {
        let listed: Vec<&str> = matches
            .ambiguous()
            .take(MAX_LISTED_DUPLICATES)
            .map(|r| r.identifier.as_str())
            .collect();
        let more = summary.ambiguous_count.saturating_sub(listed.len());
        let suffix = if more > 0 {
            format!(" and {more} more")
        } else {
            String::new()
        };
        warnings.push(Warning {
            kind: WarningKind::DuplicateIdentifiers,
            field: None,
            message: format!(
                "{} identifiers appear more than once: {}{}",
                summary.ambiguous_count,
                listed.join(", "),
                suffix
            ),
        });
    }

    if summary.blank_left_count > 0 || summary.blank_right_count > 0 {
        warnings.push(Warning {
            kind: WarningKind::BlankIdentifiers,
            field: None,
            message: format!(
                "{} spreadsheet rows and {} compliance codes have no identifier and were skipped",
                summary.blank_left_count, summary.blank_right_count
            ),
        });
    }

    let status = if !blocking.is_empty() {
        VerdictStatus::Blocked
    } else if !warnings.is_empty() {
        VerdictStatus::Warned
    } else {
        VerdictStatus::Clear
    };

    debug!(
        layout = fields.layout.key(),
        size = fields.size.key(),
        ?status,
        blocking = blocking.len(),
        warnings = warnings.len(),
        matched = summary.matched_count,
        "preflight evaluated"
    );

    PreflightVerdict {
        status,
        blocking,
        warnings,
        field_verdicts: fields
            .fields
            .iter()
            .map(|report| (report.field, report.clone()))
            .collect(),
        match_summary: summary,
        match_details: matches
            .needing_attention()
            .take(MAX_MATCH_DETAILS)
            .cloned()
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
