use crate::core::category::OptionalCategories;
use crate::core::forecast::{EventKind, ForecastItem};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hard cap on the number of buckets produced for any horizon.
pub const MAX_BUCKETS: usize = 20;

/// How many contributing items each bucket retains for detail display.
pub const BUCKET_SAMPLE_CAP: usize = 10;

/// Cash-flow totals for one calendar period.
///
/// `net_cash_flow` always includes optional expenses; a display toggle
/// that hides them affects rendering only, never the stored total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub income: Decimal,
    pub mandatory_expenses: Decimal,
    pub optional_expenses: Decimal,
    pub net_cash_flow: Decimal,
    /// Last observed running balance within the period; an empty
    /// period inherits the previous bucket's balance.
    pub running_balance: Decimal,
}

/// One aggregated calendar period of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub label: String,
    pub period_start: NaiveDate,
    /// Inclusive end of the period.
    pub period_end: NaiveDate,
    pub baseline: BucketTotals,
    /// Mirrored totals for the scenario run, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<BucketTotals>,
    /// Capped sample of contributing items for inspection; totals
    /// always reflect every contributing item, not just the sample.
    pub items: Vec<ForecastItem>,
}

/// Buckets forecast output into calendar periods for charting and
/// monthly breakdowns.
///
/// Granularity follows the horizon (daily up to 30 days, weekly up to
/// 90, bi-weekly up to 180, monthly up to a year), widened further
/// whenever the bucket count would exceed [`MAX_BUCKETS`].
pub struct PeriodAggregator;

impl PeriodAggregator {
    pub fn aggregate(
        baseline_items: &[ForecastItem],
        scenario_items: Option<&[ForecastItem]>,
        horizon_days: i64,
        today: NaiveDate,
        optional_categories: &OptionalCategories,
    ) -> Vec<PeriodBucket> {
        let horizon = horizon_days.max(0);
        let window_end = today + Duration::days(horizon);
        let interval = Self::interval_days(horizon);

        // Pre-first-event balance, recovered from the first item via
        // the conservation law; used when leading buckets are empty.
        let mut baseline_balance = Self::initial_balance(baseline_items);
        let mut scenario_balance = scenario_items.map(Self::initial_balance);

        let mut buckets = Vec::new();
        let mut baseline_cursor = 0usize;
        let mut scenario_cursor = 0usize;
        let mut start = today;

        while start <= window_end {
            let end = (start + Duration::days(interval - 1)).min(window_end);

            let (baseline_totals, sample) = Self::accumulate(
                baseline_items,
                &mut baseline_cursor,
                end,
                optional_categories,
                &mut baseline_balance,
                true,
            );

            let scenario_totals = scenario_items.map(|items| {
                let balance = scenario_balance.as_mut().unwrap_or(&mut baseline_balance);
                let (totals, _) = Self::accumulate(
                    items,
                    &mut scenario_cursor,
                    end,
                    optional_categories,
                    balance,
                    false,
                );
                totals
            });

            buckets.push(PeriodBucket {
                label: Self::label(start, interval),
                period_start: start,
                period_end: end,
                baseline: baseline_totals,
                scenario: scenario_totals,
                items: sample,
            });

            start = end + Duration::days(1);
        }

        buckets
    }

    /// Bucket width in days for the given horizon, widened so the
    /// bucket count never exceeds [`MAX_BUCKETS`].
    fn interval_days(horizon: i64) -> i64 {
        let base = if horizon <= 30 {
            1
        } else if horizon <= 90 {
            7
        } else if horizon <= 180 {
            14
        } else {
            30
        };
        let span = horizon + 1;
        let bucket_count = (span + base - 1) / base;
        if bucket_count as usize > MAX_BUCKETS {
            (span + MAX_BUCKETS as i64 - 1) / MAX_BUCKETS as i64
        } else {
            base
        }
    }

    fn initial_balance(items: &[ForecastItem]) -> Decimal {
        items
            .first()
            .map(|item| item.running_balance - item.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Consume items up to and including `end`, accumulating totals.
    /// The cursor advances so each item is counted exactly once.
    fn accumulate(
        items: &[ForecastItem],
        cursor: &mut usize,
        end: NaiveDate,
        optional_categories: &OptionalCategories,
        balance: &mut Decimal,
        keep_sample: bool,
    ) -> (BucketTotals, Vec<ForecastItem>) {
        let mut totals = BucketTotals::default();
        let mut sample = Vec::new();

        while *cursor < items.len() && items[*cursor].date <= end {
            let item = &items[*cursor];
            match item.kind {
                EventKind::Income => totals.income += item.amount,
                EventKind::Bill | EventKind::Expense => {
                    if optional_categories.contains(&item.category) {
                        totals.optional_expenses += item.amount.abs();
                    } else {
                        totals.mandatory_expenses += item.amount.abs();
                    }
                }
                // Adjustments move the balance but sit outside the
                // income/expense categorization.
                EventKind::Adjustment => {}
            }
            *balance = item.running_balance;
            if keep_sample && sample.len() < BUCKET_SAMPLE_CAP {
                sample.push(item.clone());
            }
            *cursor += 1;
        }

        totals.net_cash_flow =
            totals.income - totals.mandatory_expenses - totals.optional_expenses;
        totals.running_balance = *balance;
        (totals, sample)
    }

    fn label(start: NaiveDate, interval: i64) -> String {
        if interval == 1 {
            start.format("%b %d").to_string()
        } else if interval >= 28 {
            start.format("%b %Y").to_string()
        } else {
            let end = start + Duration::days(interval - 1);
            format!("{} - {}", start.format("%b %d"), end.format("%b %d"))
        }
    }
}

/// Percentage of `whole` represented by `part`, guarding near-zero
/// denominators with a small epsilon instead of dividing by zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    // 0.01 in minor units
    let epsilon = Decimal::new(1, 2);
    let denominator = if whole.abs() < epsilon { epsilon } else { whole };
    (part / denominator) * Decimal::ONE_HUNDRED
}
