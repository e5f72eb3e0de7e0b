//! Per-student metric derivation.
//!
//! This module computes the cohort average GPA, evaluates the six per-student
//! metrics (band, trend, variance, graduation projection, on-track status,
//! break detection), and assembles the final report rows.

pub mod band;
pub mod engine;
pub mod types;
pub mod utility;
