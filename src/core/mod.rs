//! Foundational value types: financial items, categories, forecast events.

pub mod category;
pub mod forecast;
pub mod item;
