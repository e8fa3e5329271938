//! Label preflight engine and the HTTP service that exposes it.
//!
//! Given a label layout, a physical size, a field selection and two uploaded data sources,
//! the engine decides before rendering which fields can be printed, whether their text
//! fits, and whether the sources correlate by product identifier.

pub mod config;
pub mod errors;
pub mod extract;
pub mod layout;
pub mod matching;
pub mod models;
pub mod preflight;
pub mod routes;
pub mod state;
