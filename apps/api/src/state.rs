use std::sync::Arc;

use crate::config::Config;
use crate::layout::CapabilityTable;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built and verified once at startup; read-only afterwards.
    pub capabilities: Arc<CapabilityTable>,
}
