// Preflight: the single check the caller runs before committing to a render.
// Field evaluation and source matching are independent; the handler runs them in
// parallel via tokio::task::spawn_blocking and merges with merge_verdict.

pub mod handlers;
pub mod orchestrator;
pub mod verdict;

pub use orchestrator::{merge_verdict, preflight, PreflightRequest};
pub use verdict::{PreflightVerdict, VerdictStatus};
