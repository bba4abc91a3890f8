use cashflow_engine::core::category::OptionalCategories;
use cashflow_engine::core::forecast::EventKind;
use cashflow_engine::core::item::{
    BalanceAdjustment, FinancialItem, Frequency, ItemKind, RecurrenceRule,
};
use cashflow_engine::engine::generator::ForecastGenerator;
use cashflow_engine::recurrence::expander::RecurrenceExpander;
use cashflow_engine::report::aggregator::PeriodAggregator;
use cashflow_engine::report::sampler::OutputSampler;
use cashflow_engine::simulation::scenario::{ScenarioOverlay, ScenarioParameters};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

/// Generate a date within a few years around the forecast window.
fn arb_anchor() -> impl Strategy<Value = NaiveDate> {
    (-1500i64..400i64).prop_map(|offset| epoch() + Duration::days(offset))
}

/// Generate a recurrence frequency from the full supported set.
fn arb_frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(vec![
        Frequency::Once,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Annual,
    ])
}

/// Generate a positive amount (0.01 to 10,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_kind() -> impl Strategy<Value = ItemKind> {
    prop::sample::select(vec![ItemKind::Income, ItemKind::Bill, ItemKind::Expense])
}

fn arb_category() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["housing", "groceries", "dining", "subscriptions", "salary"])
}

/// Generate a valid financial item with a deterministic id.
fn arb_item() -> impl Strategy<Value = FinancialItem> {
    (arb_anchor(), arb_frequency(), arb_amount(), arb_kind(), arb_category(), 0u128..u128::MAX)
        .prop_map(|(anchor, frequency, amount, kind, category, id)| {
            FinancialItem::with_id(
                Uuid::from_u128(id),
                format!("item-{}", id % 1000),
                kind,
                amount,
                RecurrenceRule::new(frequency, anchor),
            )
            .with_category(category)
        })
}

fn arb_items(max: usize) -> impl Strategy<Value = Vec<FinancialItem>> {
    prop::collection::vec(arb_item(), 0..max)
}

fn arb_adjustments() -> impl Strategy<Value = Vec<BalanceAdjustment>> {
    prop::collection::vec(
        ((0i64..365i64), -500_000i64..500_000i64).prop_map(|(offset, cents)| {
            BalanceAdjustment::new(
                epoch() + Duration::days(offset),
                "adjustment",
                Decimal::new(cents, 2),
            )
        }),
        0..5,
    )
}

fn split_by_kind(
    items: Vec<FinancialItem>,
) -> (Vec<FinancialItem>, Vec<FinancialItem>, Vec<FinancialItem>) {
    let mut incomes = Vec::new();
    let mut bills = Vec::new();
    let mut expenses = Vec::new();
    for item in items {
        match item.kind() {
            ItemKind::Income => incomes.push(item),
            ItemKind::Bill => bills.push(item),
            ItemKind::Expense => expenses.push(item),
        }
    }
    (incomes, bills, expenses)
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Conservation law.
    //
    // The final running balance always equals the starting balance plus
    // the sum of all signed amounts, over the unsampled list.
    // ===================================================================
    #[test]
    fn conservation_law_holds(
        items in arb_items(12),
        adjustments in arb_adjustments(),
        balance_cents in -10_000_000i64..10_000_000i64,
        horizon in 1i64..400i64,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let balance = Decimal::new(balance_cents, 2);
        let forecast = ForecastGenerator::generate(
            balance, &incomes, &bills, &expenses, &adjustments, horizon, epoch(),
        );

        prop_assert!(forecast.is_conserved());
        let manual: Decimal = forecast.items().iter().map(|i| i.amount).sum();
        prop_assert_eq!(forecast.closing_balance(), balance + manual);
    }

    // ===================================================================
    // INVARIANT 2: Output is sorted and deterministically collated.
    //
    // Ascending by date; ties broken by kind precedence. Running the
    // generator twice on the same inputs gives identical output.
    // ===================================================================
    #[test]
    fn output_ordered_and_deterministic(
        items in arb_items(10),
        horizon in 1i64..400i64,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let a = ForecastGenerator::generate(
            Decimal::ZERO, &incomes, &bills, &expenses, &[], horizon, epoch(),
        );
        let b = ForecastGenerator::generate(
            Decimal::ZERO, &incomes, &bills, &expenses, &[], horizon, epoch(),
        );
        prop_assert_eq!(&a, &b);

        for pair in a.items().windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
            if pair[0].date == pair[1].date {
                prop_assert!(pair[0].kind.precedence() <= pair[1].kind.precedence());
            }
        }
    }

    // ===================================================================
    // INVARIANT 3: Expansion stays inside its bounds.
    //
    // No occurrence before the anchor, before the window start, or
    // after the window end.
    // ===================================================================
    #[test]
    fn expansion_respects_bounds(item in arb_item(), horizon in 1i64..400i64) {
        let start = epoch();
        let end = start + Duration::days(horizon);
        let dates = RecurrenceExpander::expand(&item, start, end);

        for date in &dates {
            prop_assert!(*date >= item.rule().anchor);
            prop_assert!(*date >= start);
            prop_assert!(*date <= end);
        }
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    // ===================================================================
    // INVARIANT 4: The sampler returns a true subsequence.
    //
    // Length within cap, boundaries retained, order preserved, and no
    // balance ever recomputed.
    // ===================================================================
    #[test]
    fn sampler_is_bounded_subsequence(
        items in arb_items(8),
        cap in 3usize..60usize,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let forecast = ForecastGenerator::generate(
            Decimal::ZERO, &incomes, &bills, &expenses, &[], 365, epoch(),
        );
        let sampled = OutputSampler::sample(forecast.items(), cap);

        prop_assert!(sampled.len() <= cap.max(forecast.len().min(cap)));
        if forecast.len() > cap {
            prop_assert!(sampled.len() <= cap);
            prop_assert_eq!(sampled.first(), forecast.items().first());
            prop_assert_eq!(sampled.last(), forecast.items().last());
        }

        // Subsequence check: every sampled element appears in order.
        let mut cursor = 0usize;
        for item in &sampled {
            let found = forecast.items()[cursor..]
                .iter()
                .position(|orig| orig == item);
            prop_assert!(found.is_some());
            cursor += found.unwrap() + 1;
        }
    }

    // ===================================================================
    // INVARIANT 5: Aggregation reconciles with the item list.
    //
    // Bucket income sums to the income items' total; mandatory plus
    // optional expenses sum to the expense items' magnitude total.
    // ===================================================================
    #[test]
    fn aggregation_reconciles(
        items in arb_items(10),
        horizon in 1i64..400i64,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let forecast = ForecastGenerator::generate(
            Decimal::ZERO, &incomes, &bills, &expenses, &[], horizon, epoch(),
        );
        let buckets = PeriodAggregator::aggregate(
            forecast.items(), None, horizon, epoch(), &OptionalCategories::default(),
        );

        let bucket_income: Decimal = buckets.iter().map(|b| b.baseline.income).sum();
        let bucket_expense: Decimal = buckets
            .iter()
            .map(|b| b.baseline.mandatory_expenses + b.baseline.optional_expenses)
            .sum();

        let item_income: Decimal = forecast
            .items()
            .iter()
            .filter(|i| i.kind == EventKind::Income)
            .map(|i| i.amount)
            .sum();
        let item_expense: Decimal = forecast
            .items()
            .iter()
            .filter(|i| i.kind.is_expense_like())
            .map(|i| i.amount.abs())
            .sum();

        prop_assert_eq!(bucket_income, item_income);
        prop_assert_eq!(bucket_expense, item_expense);
        prop_assert!(buckets.len() <= cashflow_engine::report::aggregator::MAX_BUCKETS);
    }

    // ===================================================================
    // INVARIANT 6: Neutral scenario equals the baseline exactly.
    // ===================================================================
    #[test]
    fn neutral_scenario_is_identity(
        items in arb_items(10),
        balance_cents in -1_000_000i64..1_000_000i64,
        horizon in 1i64..400i64,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let balance = Decimal::new(balance_cents, 2);
        let params = ScenarioParameters { horizon_days: horizon, ..Default::default() };

        let baseline = ForecastGenerator::generate(
            balance, &incomes, &bills, &expenses, &[], horizon, epoch(),
        );
        let scenario = ScenarioOverlay::simulate(
            &incomes, &bills, &expenses, &params, balance, epoch(),
        );
        prop_assert_eq!(scenario, baseline);
    }

    // ===================================================================
    // INVARIANT 7: Scenario runs never mutate the baseline inputs.
    // ===================================================================
    #[test]
    fn scenario_leaves_baseline_untouched(
        items in arb_items(8),
        income_pct in -90i64..200i64,
        expense_pct in -90i64..200i64,
    ) {
        let (incomes, bills, expenses) = split_by_kind(items);
        let before = (incomes.clone(), bills.clone(), expenses.clone());

        let params = ScenarioParameters {
            income_adjustment_percent: Decimal::from(income_pct),
            expense_adjustment_percent: Decimal::from(expense_pct),
            horizon_days: 120,
            ..Default::default()
        };
        let _ = ScenarioOverlay::simulate(
            &incomes, &bills, &expenses, &params, Decimal::ZERO, epoch(),
        );

        prop_assert_eq!(&before.0, &incomes);
        prop_assert_eq!(&before.1, &bills);
        prop_assert_eq!(&before.2, &expenses);
    }

    // ===================================================================
    // INVARIANT 8: Per-frequency occurrence counts match the period
    // arithmetic for fixed-length frequencies.
    // ===================================================================
    #[test]
    fn fixed_frequency_occurrence_count(
        offset in 0i64..60i64,
        horizon in 1i64..400i64,
        period_choice in 0usize..3usize,
    ) {
        let (frequency, period) = match period_choice {
            0 => (Frequency::Daily, 1i64),
            1 => (Frequency::Weekly, 7i64),
            _ => (Frequency::Biweekly, 14i64),
        };
        let anchor = epoch() + Duration::days(offset);
        let rule = RecurrenceRule::new(frequency, anchor);
        let dates = RecurrenceExpander::expand_rule(
            &rule, "counted", epoch(), epoch() + Duration::days(horizon),
        );

        let window_end = epoch() + Duration::days(horizon);
        let expected = if anchor > window_end {
            0
        } else {
            ((window_end - anchor).num_days() / period + 1) as usize
        };
        prop_assert_eq!(dates.len(), expected.min(1024));
    }
}
