use crate::core::item::{FinancialItem, Frequency, RecurrenceRule};
use crate::recurrence::calendar::{add_months, months_between};
use chrono::{Duration, NaiveDate};
use log::warn;

/// Hard cap on occurrences emitted for a single item.
///
/// A year-long horizon of daily occurrences is 366 dates; the cap
/// leaves generous headroom while keeping expansion bounded even for
/// degenerate rules.
pub const MAX_OCCURRENCES: usize = 1024;

/// Expands one recurring financial item into concrete dated
/// occurrences within a window.
///
/// Occurrences are emitted in ascending order and never fall before
/// the rule's anchor, after its end date, or outside the requested
/// window. For anchors far in the past the expander fast-forwards by
/// a ceiling-divided period count instead of iterating day by day.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
/// use cashflow_engine::recurrence::expander::RecurrenceExpander;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let rent = FinancialItem::new(
///     "Rent",
///     ItemKind::Bill,
///     dec!(1450),
///     RecurrenceRule::new(Frequency::Monthly, anchor),
/// );
///
/// let start = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
/// let dates = RecurrenceExpander::expand(&rent, start, end);
/// assert_eq!(dates.len(), 3); // Jun 1, Jul 1, Aug 1
/// ```
pub struct RecurrenceExpander;

impl RecurrenceExpander {
    /// Expand `item` into its occurrence dates within
    /// `[window_start, window_end]`.
    pub fn expand(
        item: &FinancialItem,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        Self::expand_rule(item.rule(), item.name(), window_start, window_end)
    }

    /// Expand a bare rule. `label` identifies the source in warnings.
    pub fn expand_rule(
        rule: &RecurrenceRule,
        label: &str,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        if window_end < window_start {
            return Vec::new();
        }
        let effective_end = match rule.end {
            Some(end) => end.min(window_end),
            None => window_end,
        };

        match rule.frequency {
            Frequency::Once => Self::expand_once(rule.anchor, window_start, effective_end),
            Frequency::Unrecognized => {
                warn!(
                    "unrecognized frequency on '{}'; degrading to a single occurrence at {}",
                    label, rule.anchor
                );
                Self::expand_once(rule.anchor, window_start, effective_end)
            }
            Frequency::Daily | Frequency::Weekly | Frequency::Biweekly => {
                // fixed_period_days is Some for exactly these variants
                let period = rule.frequency.fixed_period_days().unwrap_or(1);
                Self::expand_fixed(rule.anchor, period, window_start, effective_end)
            }
            Frequency::Monthly | Frequency::Quarterly | Frequency::Annual => {
                let step = rule.frequency.period_months().unwrap_or(1);
                Self::expand_calendar(rule.anchor, step, window_start, effective_end)
            }
        }
    }

    fn expand_once(
        anchor: NaiveDate,
        window_start: NaiveDate,
        effective_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        if anchor >= window_start && anchor <= effective_end {
            vec![anchor]
        } else {
            Vec::new()
        }
    }

    /// Fixed-length periods: days, weeks, fortnights.
    fn expand_fixed(
        anchor: NaiveDate,
        period_days: i64,
        window_start: NaiveDate,
        effective_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        let mut current = if anchor >= window_start {
            anchor
        } else {
            // Fast-forward: ceiling division of elapsed days by the
            // period length, never day-by-day iteration.
            let elapsed = (window_start - anchor).num_days();
            let periods = (elapsed + period_days - 1) / period_days;
            anchor + Duration::days(periods * period_days)
        };

        let mut dates = Vec::new();
        while current <= effective_end && dates.len() < MAX_OCCURRENCES {
            dates.push(current);
            current += Duration::days(period_days);
        }
        dates
    }

    /// Calendar periods: months, quarters, years. Each occurrence is
    /// derived from the anchor plus a whole number of periods, so a
    /// Jan-31 monthly anchor yields Feb 28/29 and then Mar 31 rather
    /// than drifting to Mar 28.
    fn expand_calendar(
        anchor: NaiveDate,
        step_months: i32,
        window_start: NaiveDate,
        effective_end: NaiveDate,
    ) -> Vec<NaiveDate> {
        let mut k: i32 = if anchor >= window_start {
            0
        } else {
            let elapsed = months_between(anchor, window_start);
            // Day-of-month clamping can land the estimate a period
            // early; settle with at most a couple of forward steps.
            (elapsed / step_months - 1).max(0)
        };
        while add_months(anchor, k * step_months) < window_start {
            k += 1;
        }

        let mut dates = Vec::new();
        loop {
            let date = add_months(anchor, k * step_months);
            if date > effective_end || dates.len() >= MAX_OCCURRENCES {
                break;
            }
            dates.push(date);
            k += 1;
        }
        dates
    }
}
