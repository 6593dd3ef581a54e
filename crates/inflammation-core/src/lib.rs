//! Core types for the inflammation toolkit.
//!
//! Holds the measurement [`models::Matrix`], the daily statistics and
//! normalisation functions, the graph data handed to renderers, CLI settings
//! and the shared error type.

pub mod error;
pub mod formatting;
pub mod graph;
pub mod models;
pub mod settings;
pub mod statistics;

pub use error::{InflammationError, Result};
pub use models::Matrix;
