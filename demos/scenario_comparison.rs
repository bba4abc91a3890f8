//! Scenario overlay example.
//!
//! Runs a baseline forecast next to a what-if scenario (income cut,
//! trimmed discretionary spending, monthly savings boost) and compares
//! the outcomes.

use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
use cashflow_engine::engine::generator::ForecastGenerator;
use cashflow_engine::simulation::scenario::{ScenarioOverlay, ScenarioParameters};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  cashflow-engine: Scenario Comparison Example ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let incomes = vec![FinancialItem::new(
        "Salary",
        ItemKind::Income,
        dec!(4_100),
        RecurrenceRule::new(Frequency::Monthly, NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()),
    )
    .with_category("salary")];
    let bills = vec![FinancialItem::new(
        "Rent",
        ItemKind::Bill,
        dec!(1_600),
        RecurrenceRule::new(Frequency::Monthly, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()),
    )
    .with_category("housing")];
    let expenses = vec![
        FinancialItem::new(
            "Groceries",
            ItemKind::Expense,
            dec!(140),
            RecurrenceRule::new(Frequency::Weekly, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
        )
        .with_category("groceries"),
        FinancialItem::new(
            "Dining out",
            ItemKind::Expense,
            dec!(90),
            RecurrenceRule::new(Frequency::Weekly, NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()),
        )
        .with_category("dining"),
    ];

    let starting_balance = dec!(3_400);
    let horizon = 180;

    // --- Baseline ---
    println!("━━━ Baseline (180 days) ━━━\n");

    let baseline = ForecastGenerator::generate(
        starting_balance,
        &incomes,
        &bills,
        &expenses,
        &[],
        horizon,
        today,
    );
    println!("{}", baseline);

    // --- What-if: pay cut, belt tightening, savings boost ---
    println!("━━━ Scenario: -15% income, -20% expenses, +250/month savings ━━━\n");

    let params = ScenarioParameters {
        income_adjustment_percent: dec!(-15),
        expense_adjustment_percent: dec!(-20),
        monthly_savings_delta: dec!(250),
        horizon_days: horizon,
        ..Default::default()
    };
    let scenario = ScenarioOverlay::simulate(
        &incomes,
        &bills,
        &expenses,
        &params,
        starting_balance,
        today,
    );
    println!("{}", scenario);

    // --- Comparison ---
    println!("━━━ Comparison ━━━\n");

    let delta = scenario.closing_balance() - baseline.closing_balance();
    println!("  Baseline closing balance:  {:>12}", baseline.closing_balance());
    println!("  Scenario closing balance:  {:>12}", scenario.closing_balance());
    println!("  Difference:                {:>12}", delta);
    println!("  Baseline minimum balance:  {:>12}", baseline.minimum_balance());
    println!("  Scenario minimum balance:  {:>12}", scenario.minimum_balance());
}
