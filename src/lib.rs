//! Enrich CI/CD pipeline failure events with the author of the triggering
//! commit and their chat handle.
//!
//! The flow lives in [`handler::Enricher`]; external systems are reached
//! through the traits in [`clients`].

pub mod cli;
pub mod clients;
pub mod enrichment;
pub mod envelope;
pub mod error;
pub mod ext;
pub mod handler;
pub mod logging;
pub mod model;
pub mod util;
pub mod validate;

pub use error::EnrichError;
pub use handler::{Enricher, EnrichmentSettings, Outcome, Stage};
