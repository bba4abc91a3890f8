//! # cashflow-engine
//!
//! Cash-flow forecasting and scenario simulation engine for personal finance.
//!
//! Given a set of recurring incomes, bills, and expenses, the engine
//! projects a running account balance forward in time, supports what-if
//! parameter overlays, and produces bounded, aggregated output for
//! charts and monthly summaries.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: financial items, categories, forecast events
//! - **recurrence** — Calendar arithmetic and recurrence-rule expansion
//! - **engine** — Event-stream merging, balance accumulation, memoization
//! - **simulation** — What-if scenario overlays and stress-test portfolios
//! - **report** — Display sampling and calendar-period aggregation

pub mod core;
pub mod engine;
pub mod recurrence;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::category::{Category, OptionalCategories};
    pub use crate::core::forecast::{EventKind, ForecastItem};
    pub use crate::core::item::{
        BalanceAdjustment, FinancialItem, Frequency, ItemKind, RecurrenceRule,
    };
    pub use crate::engine::fingerprint::{Fingerprint, ForecastMemo};
    pub use crate::engine::generator::{Forecast, ForecastGenerator};
    pub use crate::recurrence::expander::RecurrenceExpander;
    pub use crate::report::aggregator::{PeriodAggregator, PeriodBucket};
    pub use crate::report::sampler::OutputSampler;
    pub use crate::simulation::scenario::{ScenarioOverlay, ScenarioParameters};
}
