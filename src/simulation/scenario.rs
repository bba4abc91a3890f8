use crate::core::item::{BalanceAdjustment, FinancialItem};
use crate::engine::generator::{Forecast, ForecastGenerator};
use crate::recurrence::calendar::add_months;
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of synthetic monthly savings boosts injected into a
/// scenario, regardless of horizon length.
pub const MAX_SAVINGS_INJECTIONS: usize = 12;

/// User-editable what-if knobs for a scenario simulation.
///
/// All fields default to neutral; a neutral scenario reproduces the
/// baseline forecast exactly.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParameters {
    /// Percentage applied to every income amount (10 = +10%).
    pub income_adjustment_percent: Decimal,
    /// Percentage applied to every bill and expense amount.
    pub expense_adjustment_percent: Decimal,
    /// Extra amount saved on the 1st of each future month, if positive.
    pub monthly_savings_delta: Decimal,
    /// A single unexpected expense dated today, if positive.
    pub one_time_expense: Decimal,
    /// A single unexpected income dated today, if positive.
    pub one_time_income: Decimal,
    /// Forward-looking window length in days.
    pub horizon_days: i64,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            income_adjustment_percent: Decimal::ZERO,
            expense_adjustment_percent: Decimal::ZERO,
            monthly_savings_delta: Decimal::ZERO,
            one_time_expense: Decimal::ZERO,
            one_time_income: Decimal::ZERO,
            horizon_days: 90,
        }
    }
}

impl ScenarioParameters {
    /// True when every knob is at its neutral position.
    pub fn is_neutral(&self) -> bool {
        self.income_adjustment_percent == Decimal::ZERO
            && self.expense_adjustment_percent == Decimal::ZERO
            && self.monthly_savings_delta == Decimal::ZERO
            && self.one_time_expense == Decimal::ZERO
            && self.one_time_income == Decimal::ZERO
    }
}

/// Runs the forecast generator against a cloned, parameter-adjusted
/// copy of the baseline inputs.
///
/// The baseline items are never mutated; the scenario result shares
/// the baseline's horizon and starting balance so the two are directly
/// comparable side by side.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
/// use cashflow_engine::simulation::scenario::{ScenarioOverlay, ScenarioParameters};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
/// let rent = FinancialItem::new(
///     "Rent",
///     ItemKind::Bill,
///     dec!(1000),
///     RecurrenceRule::new(Frequency::Monthly, today),
/// );
///
/// let params = ScenarioParameters {
///     expense_adjustment_percent: dec!(-10),
///     horizon_days: 90,
///     ..Default::default()
/// };
/// let scenario = ScenarioOverlay::simulate(&[], &[rent], &[], &params, dec!(5000), today);
/// assert_eq!(scenario.items()[0].amount, dec!(-900));
/// ```
pub struct ScenarioOverlay;

impl ScenarioOverlay {
    pub fn simulate(
        baseline_incomes: &[FinancialItem],
        baseline_bills: &[FinancialItem],
        baseline_expenses: &[FinancialItem],
        params: &ScenarioParameters,
        starting_balance: Decimal,
        today: NaiveDate,
    ) -> Forecast {
        let income_factor = Decimal::ONE + params.income_adjustment_percent / Decimal::ONE_HUNDRED;
        let expense_factor =
            Decimal::ONE + params.expense_adjustment_percent / Decimal::ONE_HUNDRED;

        let incomes = Self::scaled_copy(baseline_incomes, income_factor);
        let bills = Self::scaled_copy(baseline_bills, expense_factor);
        let expenses = Self::scaled_copy(baseline_expenses, expense_factor);

        let adjustments = Self::synthetic_adjustments(params, today);

        ForecastGenerator::generate(
            starting_balance,
            &incomes,
            &bills,
            &expenses,
            &adjustments,
            params.horizon_days,
            today,
        )
    }

    fn scaled_copy(items: &[FinancialItem], factor: Decimal) -> Vec<FinancialItem> {
        if factor == Decimal::ONE {
            return items.to_vec();
        }
        items.iter().map(|item| item.scaled(factor)).collect()
    }

    /// Build the one-off deltas a scenario injects: monthly savings
    /// boosts on the 1st of each future month (capped) and the
    /// one-time expense/income dated today.
    fn synthetic_adjustments(
        params: &ScenarioParameters,
        today: NaiveDate,
    ) -> Vec<BalanceAdjustment> {
        let mut adjustments = Vec::new();
        let window_end = today + Duration::days(params.horizon_days.max(0));

        if params.monthly_savings_delta > Decimal::ZERO {
            // First of the month after today, then first of each
            // following month while inside the horizon.
            let current_month_first = today.with_day(1).unwrap_or(today);
            let mut date = add_months(current_month_first, 1);
            let mut injected = 0;
            while date <= window_end && injected < MAX_SAVINGS_INJECTIONS {
                adjustments.push(BalanceAdjustment::new(
                    date,
                    "Monthly savings boost",
                    params.monthly_savings_delta,
                ));
                date = add_months(date, 1);
                injected += 1;
            }
        }

        if params.one_time_expense > Decimal::ZERO {
            adjustments.push(BalanceAdjustment::new(
                today,
                "One-time expense",
                -params.one_time_expense,
            ));
        }
        if params.one_time_income > Decimal::ZERO {
            adjustments.push(BalanceAdjustment::new(
                today,
                "One-time income",
                params.one_time_income,
            ));
        }

        adjustments
    }
}
