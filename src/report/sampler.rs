use crate::core::forecast::ForecastItem;

/// Number of near-term items kept unsampled when the budget allows.
///
/// Recent projections matter most to the user, so the head of the
/// forecast is preserved verbatim and only the far middle is strided.
pub const NEAR_TERM_KEEP: usize = 100;

/// Bounds an arbitrarily long forecast to a fixed display budget.
///
/// The sampler only selects a true subsequence: it never interpolates
/// or recomputes balances, and output stays ascending by date. The
/// first and last items are always retained for boundary fidelity.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
/// use cashflow_engine::engine::generator::ForecastGenerator;
/// use cashflow_engine::report::sampler::OutputSampler;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let daily = FinancialItem::new(
///     "Coffee",
///     ItemKind::Expense,
///     dec!(4),
///     RecurrenceRule::new(Frequency::Daily, today),
/// );
/// let forecast = ForecastGenerator::generate(dec!(500), &[], &[], &[daily], &[], 365, today);
///
/// let sampled = OutputSampler::sample(forecast.items(), 150);
/// assert!(sampled.len() <= 150);
/// assert_eq!(sampled.first(), forecast.items().first());
/// assert_eq!(sampled.last(), forecast.items().last());
/// ```
pub struct OutputSampler;

impl OutputSampler {
    /// Reduce `items` to at most `cap` entries.
    ///
    /// Lists already within the cap are returned unchanged.
    pub fn sample(items: &[ForecastItem], cap: usize) -> Vec<ForecastItem> {
        if items.len() <= cap {
            return items.to_vec();
        }
        match cap {
            0 => return Vec::new(),
            1 => return vec![items[0].clone()],
            2 => {
                return vec![items[0].clone(), items[items.len() - 1].clone()];
            }
            _ => {}
        }

        // Head: near-term fidelity. Leave room for at least one
        // middle pick and the final item.
        let head_len = NEAR_TERM_KEEP.min(cap - 2);
        let middle = &items[head_len..items.len() - 1];
        let budget = cap - head_len - 1;
        let stride = middle.len().div_ceil(budget);

        let mut sampled = Vec::with_capacity(cap);
        sampled.extend_from_slice(&items[..head_len]);
        sampled.extend(middle.iter().step_by(stride).cloned());
        sampled.push(items[items.len() - 1].clone());
        sampled
    }
}
