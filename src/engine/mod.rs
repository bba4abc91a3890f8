//! The baseline simulation: merge, generation, and memoization.

pub mod fingerprint;
pub mod generator;
pub mod merger;
