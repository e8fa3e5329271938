//! Axum route handlers for the layout catalog and the reactive field check.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::extract::ApiJson;
use crate::layout::capability::FieldCapability;
use crate::layout::catalog::{FieldId, LabelSize, LayoutKind};
use crate::layout::compatibility::{evaluate, FieldEvaluation, FieldSelection, FieldValues};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub id: LayoutKind,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInfo {
    pub id: LabelSize,
    pub label: String,
    pub width_mm: u16,
    pub height_mm: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub id: FieldId,
    pub label: &'static str,
    pub preview_value: Option<&'static str>,
    pub toggleable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCapabilities {
    pub layout: LayoutKind,
    pub size: LabelSize,
    pub fields: BTreeMap<FieldId, FieldCapability>,
}

#[derive(Debug, Serialize)]
pub struct LayoutCatalog {
    pub layouts: Vec<LayoutInfo>,
    pub sizes: Vec<SizeInfo>,
    pub fields: Vec<FieldInfo>,
    pub capabilities: Vec<PairCapabilities>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub layout: LayoutKind,
    pub size: LabelSize,
    pub selection: FieldSelection,
    #[serde(default)]
    pub values: FieldValues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub layout: LayoutKind,
    pub size: LabelSize,
    pub selection: FieldSelection,
    pub field: FieldId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub changed: bool,
    pub selection: FieldSelection,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/layouts
///
/// Every layout, size and field with the full capability grid, for building the picker UI.
pub async fn handle_list_layouts(State(state): State<AppState>) -> Json<LayoutCatalog> {
    let table = &state.capabilities;

    let capabilities = LayoutKind::ALL
        .into_iter()
        .flat_map(|layout| LabelSize::ALL.into_iter().map(move |size| (layout, size)))
        .map(|(layout, size)| PairCapabilities {
            layout,
            size,
            fields: FieldId::ALL
                .into_iter()
                .map(|field| (field, table.capability(layout, size, field)))
                .collect(),
        })
        .collect();

    Json(LayoutCatalog {
        layouts: LayoutKind::ALL
            .into_iter()
            .map(|id| LayoutInfo {
                id,
                label: id.label(),
            })
            .collect(),
        sizes: LabelSize::ALL
            .into_iter()
            .map(|id| {
                let (width_mm, height_mm) = id.dimensions_mm();
                SizeInfo {
                    id,
                    label: id.label(),
                    width_mm,
                    height_mm,
                }
            })
            .collect(),
        fields: FieldId::ALL
            .into_iter()
            .map(|id| FieldInfo {
                id,
                label: id.label(),
                preview_value: id.preview_value(),
                toggleable: id.is_user_toggleable(),
            })
            .collect(),
        capabilities,
    })
}

/// POST /api/v1/fields/evaluate
///
/// Re-run by the client after every layout, size, toggle or value change. An empty
/// selection is not an error: the report shows what is left, and preflight blocks on it.
pub async fn handle_evaluate_fields(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Json<FieldEvaluation> {
    Json(evaluate(
        &state.capabilities,
        request.layout,
        request.size,
        &request.selection,
        &request.values,
    ))
}

/// POST /api/v1/fields/toggle
///
/// Applies one toggle and returns the constrained selection. Unsupported and mandatory
/// fields come back unchanged with `changed = false`; a mandatory field the layout places
/// is added if the client left it out.
pub async fn handle_toggle_field(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ToggleRequest>,
) -> Json<ToggleResponse> {
    let profile = state.capabilities.profile(request.layout, request.size);
    let mut selection = request.selection;
    let changed = selection.toggle(request.field, &profile);
    selection.constrain(&profile);

    Json(ToggleResponse { changed, selection })
}
