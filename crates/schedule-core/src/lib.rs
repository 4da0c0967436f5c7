//! Domain layer for the course-schedule cleaner.
//!
//! Holds the record types, the pipeline configuration, and the per-row
//! transformation steps: normalization, filtering, time encoding, day
//! expansion and record emission.

pub mod config;
pub mod days;
pub mod emitter;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalizer;
pub mod settings;
pub mod time_utils;

pub use error::{Result, ScheduleError};
