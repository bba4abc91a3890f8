//! Calendar arithmetic and recurrence-rule expansion.

pub mod calendar;
pub mod expander;
