//! Core data types
//!
//! Defines the in-memory dataset model shared across ingestion, prompt
//! building, and the UI.

pub mod dataset;

pub use dataset::{CellValue, Dataset};
