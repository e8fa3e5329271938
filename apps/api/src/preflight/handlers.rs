//! Axum route handler for the Preflight API.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::layout::capability::CapabilityTable;
use crate::layout::compatibility::evaluate;
use crate::matching::match_sources;
use crate::preflight::orchestrator::{merge_verdict, PreflightRequest};
use crate::preflight::verdict::PreflightVerdict;
use crate::state::AppState;

/// POST /api/v1/preflight
///
/// Checks field compatibility and source correlation before rendering.
/// A blocked or warned verdict is still a 200; the caller decides whether to proceed.
pub async fn handle_preflight(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PreflightRequest>,
) -> Result<Json<PreflightVerdict>, AppError> {
    let max_rows = state.config.max_source_rows;
    if request.left.len() > max_rows || request.right.len() > max_rows {
        warn!(
            left = request.left.len(),
            right = request.right.len(),
            max_rows,
            "preflight payload over row limit"
        );
        return Err(AppError::PayloadTooLarge(format!(
            "each source may contain at most {max_rows} rows"
        )));
    }

    let verdict = within_deadline(
        state.config.preflight_timeout_ms,
        run_preflight(state.capabilities.clone(), request),
    )
    .await?;

    info!(
        status = ?verdict.status,
        matched = verdict.match_summary.matched_count,
        warnings = verdict.warnings.len(),
        "preflight completed"
    );

    Ok(Json(verdict))
}

/// Drops `work` once `timeout_ms` has passed. There are no partial verdicts.
async fn within_deadline<F>(timeout_ms: u64, work: F) -> Result<PreflightVerdict, AppError>
where
    F: Future<Output = Result<PreflightVerdict, AppError>>,
{
    tokio::time::timeout(Duration::from_millis(timeout_ms), work)
        .await
        .map_err(|_| {
            warn!(timeout_ms, "preflight timed out; result discarded");
            AppError::Timeout(timeout_ms)
        })?
}

/// Runs field evaluation and source matching on separate blocking threads, then merges.
async fn run_preflight(
    table: Arc<CapabilityTable>,
    request: PreflightRequest,
) -> Result<PreflightVerdict, AppError> {
    let values = request.effective_values();
    let PreflightRequest {
        layout,
        size,
        selection,
        left,
        right,
        ..
    } = request;

    let fields_task =
        tokio::task::spawn_blocking(move || evaluate(&table, layout, size, &selection, &values));
    let matches_task = tokio::task::spawn_blocking(move || match_sources(&left, &right));

    let (fields, matches) = tokio::join!(fields_task, matches_task);
    let fields = fields.map_err(|e| AppError::Internal(e.into()))?;
    let matches = matches.map_err(|e| AppError::Internal(e.into()))?;

    Ok(merge_verdict(&fields, &matches))
}
