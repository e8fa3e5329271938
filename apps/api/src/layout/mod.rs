// Label layouts: catalog enums, the capability table, text fit and field compatibility.
// Everything here is pure; the capability table is built once in main and shared via AppState.

pub mod capability;
pub mod catalog;
pub mod compatibility;
pub mod handlers;
pub mod text_fit;

// Re-export the public API consumed by main and AppState.
pub use capability::CapabilityTable;
