//! What-if scenario overlays and stress-test portfolio generation.

pub mod scenario;
pub mod stress_test;
