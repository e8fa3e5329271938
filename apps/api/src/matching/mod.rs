// Cross-source matching: spreadsheet rows vs. decoded compliance codes.
// Pure and synchronous; handlers run it inside tokio::task::spawn_blocking.

pub mod matcher;

pub use matcher::{match_sources, normalize_identifier, MatchRecord, MatchReport, MatchSummary};
