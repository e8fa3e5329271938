pub mod source;

pub use source::{ComplianceEntry, Identified, SourceRow};
