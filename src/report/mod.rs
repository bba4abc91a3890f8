//! Bounded display output: sampling and calendar-period aggregation.

pub mod aggregator;
pub mod sampler;
