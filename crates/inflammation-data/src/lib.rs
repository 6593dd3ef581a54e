//! Data ingestion layer for the inflammation toolkit.
//!
//! Responsible for discovering and parsing CSV/JSON dataset files, the
//! [`source::DataSource`] abstraction over them, and the cross-dataset
//! analysis pipeline.

pub mod analysis;
pub mod reader;
pub mod source;

pub use inflammation_core as core;
