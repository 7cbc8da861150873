//! Core types: the currency registry, snapshots and error taxonomy

pub mod config;
pub mod error;
pub mod log;
pub mod registry;
pub mod snapshot;
pub mod source;

// Re-export main types for cleaner imports
pub use error::RateError;
pub use registry::Currency;
pub use snapshot::{MalformedPrice, PriceSnapshot, Quote};
pub use source::{DocumentSource, FetchFailure};
