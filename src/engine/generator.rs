use crate::core::forecast::ForecastItem;
use crate::core::item::{BalanceAdjustment, FinancialItem};
use crate::engine::merger::{EventStreamMerger, RawOccurrence};
use crate::recurrence::expander::RecurrenceExpander;
use chrono::{Duration, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A generated balance projection over a forward-looking window.
///
/// Wraps the chronological [`ForecastItem`] list together with the
/// inputs that shaped it. The conservation law holds over the full
/// list: the final running balance equals the starting balance plus
/// the sum of all signed amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    starting_balance: Decimal,
    window_start: NaiveDate,
    window_end: NaiveDate,
    items: Vec<ForecastItem>,
    /// Items dropped during validation; reported, never fatal.
    skipped: usize,
}

impl Forecast {
    /// An empty forecast, used as the recoverable fallback when the
    /// calling boundary cannot generate one.
    pub fn empty(starting_balance: Decimal, today: NaiveDate) -> Self {
        Self {
            starting_balance,
            window_start: today,
            window_end: today,
            items: Vec::new(),
            skipped: 0,
        }
    }

    pub fn starting_balance(&self) -> Decimal {
        self.starting_balance
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window_start
    }

    pub fn window_end(&self) -> NaiveDate {
        self.window_end
    }

    pub fn items(&self) -> &[ForecastItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ForecastItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Balance after the last projected event; the "projected"
    /// headline figure.
    pub fn closing_balance(&self) -> Decimal {
        self.items
            .last()
            .map(|item| item.running_balance)
            .unwrap_or(self.starting_balance)
    }

    /// Net signed movement over the window.
    pub fn net_change(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// The lowest balance reached anywhere in the projection.
    pub fn minimum_balance(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.running_balance)
            .min()
            .unwrap_or(self.starting_balance)
    }

    /// Verify the conservation law:
    /// `closing == starting + Σ signed amounts`.
    pub fn is_conserved(&self) -> bool {
        self.closing_balance() == self.starting_balance + self.net_change()
    }
}

impl std::fmt::Display for Forecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Forecast ===")?;
        writeln!(f, "Window:    {} → {}", self.window_start, self.window_end)?;
        writeln!(f, "Events:    {}", self.items.len())?;
        writeln!(f, "Opening:   {}", self.starting_balance)?;
        writeln!(f, "Closing:   {}", self.closing_balance())?;
        writeln!(f, "Net:       {}", self.net_change())?;
        writeln!(f, "Minimum:   {}", self.minimum_balance())?;
        if self.skipped > 0 {
            writeln!(f, "Skipped:   {} malformed item(s)", self.skipped)?;
        }
        Ok(())
    }
}

/// The baseline simulation: expansion, merge, and running-balance
/// accumulation.
///
/// Pure over its explicit inputs, including `today`; identical inputs
/// always produce identical output, and cost is proportional to the
/// number of occurrences actually generated.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
/// use cashflow_engine::engine::generator::ForecastGenerator;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let rent = FinancialItem::new(
///     "Rent",
///     ItemKind::Bill,
///     dec!(100),
///     RecurrenceRule::new(Frequency::Monthly, today),
/// );
///
/// let forecast = ForecastGenerator::generate(dec!(1000), &[], &[rent], &[], &[], 90, today);
/// assert_eq!(forecast.len(), 3);
/// assert_eq!(forecast.closing_balance(), dec!(700));
/// assert!(forecast.is_conserved());
/// ```
pub struct ForecastGenerator;

impl ForecastGenerator {
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        starting_balance: Decimal,
        incomes: &[FinancialItem],
        bills: &[FinancialItem],
        expenses: &[FinancialItem],
        adjustments: &[BalanceAdjustment],
        horizon_days: i64,
        today: NaiveDate,
    ) -> Forecast {
        let window_end = today + Duration::days(horizon_days.max(0));
        let mut skipped = 0usize;

        let income_events = Self::expand_all(incomes, today, window_end, &mut skipped);
        let bill_events = Self::expand_all(bills, today, window_end, &mut skipped);
        let expense_events = Self::expand_all(expenses, today, window_end, &mut skipped);

        let windowed_adjustments: Vec<BalanceAdjustment> = adjustments
            .iter()
            .filter(|adj| adj.date >= today && adj.date <= window_end)
            .cloned()
            .collect();

        let merged = EventStreamMerger::merge(
            income_events,
            bill_events,
            expense_events,
            &windowed_adjustments,
        );

        let mut balance = starting_balance;
        let items = merged
            .into_iter()
            .map(|event| {
                balance += event.amount;
                ForecastItem {
                    date: event.date,
                    kind: event.kind,
                    name: event.name,
                    category: event.category,
                    amount: event.amount,
                    running_balance: balance,
                    source_id: event.source_id,
                    occurrence: event.occurrence,
                }
            })
            .collect();

        Forecast {
            starting_balance,
            window_start: today,
            window_end,
            items,
            skipped,
        }
    }

    /// Expand every valid item in `items`; malformed items are skipped
    /// individually so one bad record cannot blank the whole forecast.
    fn expand_all(
        items: &[FinancialItem],
        window_start: NaiveDate,
        window_end: NaiveDate,
        skipped: &mut usize,
    ) -> Vec<RawOccurrence> {
        let mut occurrences = Vec::new();
        for item in items {
            if let Err(err) = item.validate() {
                warn!("skipping malformed item: {}", err);
                *skipped += 1;
                continue;
            }
            let dates = RecurrenceExpander::expand(item, window_start, window_end);
            occurrences.extend(dates.into_iter().enumerate().map(|(idx, date)| {
                RawOccurrence {
                    date,
                    name: item.name().to_string(),
                    category: item.category().clone(),
                    magnitude: item.amount(),
                    source_id: item.id(),
                    occurrence: idx as u32,
                }
            }));
        }
        occurrences
    }
}
