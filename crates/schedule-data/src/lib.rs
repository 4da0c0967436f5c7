//! Data layer for the course-schedule cleaner.
//!
//! Reads the raw CSV extract, drives rows through the normalization
//! pipeline, and writes the resulting meeting records as JSON.

pub mod pipeline;
pub mod reader;
pub mod writer;
