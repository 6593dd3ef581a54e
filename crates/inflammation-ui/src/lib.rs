//! Rendering layer for the inflammation toolkit.
//!
//! Provides the [`inflammation_core::graph::Visualizer`] implementations:
//! a full-screen [`ratatui`] chart/table renderer and a plain-text writer,
//! plus the themes and pure render functions they share.

pub mod app;
pub mod chart_view;
pub mod table_view;
pub mod text;
pub mod themes;

pub use inflammation_core as core;
