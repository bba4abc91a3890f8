//! Basic cash-flow forecast example.
//!
//! Builds a small household portfolio, generates a 90-day forecast,
//! and prints the dated event stream with running balances.

use cashflow_engine::core::category::OptionalCategories;
use cashflow_engine::core::item::{
    BalanceAdjustment, FinancialItem, Frequency, ItemKind, RecurrenceRule,
};
use cashflow_engine::engine::generator::ForecastGenerator;
use cashflow_engine::report::aggregator::PeriodAggregator;
use cashflow_engine::report::sampler::OutputSampler;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════╗");
    println!("║  cashflow-engine: Basic Forecast Example  ║");
    println!("╚═══════════════════════════════════════════╝\n");

    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let incomes = vec![
        FinancialItem::new(
            "Salary",
            ItemKind::Income,
            dec!(3_200),
            RecurrenceRule::new(Frequency::Monthly, NaiveDate::from_ymd_opt(2026, 1, 25).unwrap()),
        )
        .with_category("salary"),
        FinancialItem::new(
            "Freelance",
            ItemKind::Income,
            dec!(400),
            RecurrenceRule::new(Frequency::Biweekly, NaiveDate::from_ymd_opt(2026, 3, 6).unwrap()),
        )
        .with_category("side income"),
    ];
    let bills = vec![
        FinancialItem::new(
            "Rent",
            ItemKind::Bill,
            dec!(1_450),
            RecurrenceRule::new(Frequency::Monthly, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        )
        .with_category("housing"),
        FinancialItem::new(
            "Car insurance",
            ItemKind::Bill,
            dec!(320),
            RecurrenceRule::new(Frequency::Quarterly, NaiveDate::from_ymd_opt(2026, 2, 12).unwrap()),
        )
        .with_category("insurance"),
    ];
    let expenses = vec![
        FinancialItem::new(
            "Groceries",
            ItemKind::Expense,
            dec!(120),
            RecurrenceRule::new(Frequency::Weekly, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
        )
        .with_category("groceries"),
        FinancialItem::new(
            "Streaming",
            ItemKind::Expense,
            dec!(35),
            RecurrenceRule::new(Frequency::Monthly, NaiveDate::from_ymd_opt(2026, 1, 8).unwrap()),
        )
        .with_category("subscriptions"),
    ];
    let adjustments = vec![BalanceAdjustment::new(
        NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
        "Car repair",
        dec!(-540),
    )];

    // --- Scenario 1: 90-day forecast ---
    println!("━━━ Scenario 1: 90-Day Forecast ━━━\n");

    let forecast = ForecastGenerator::generate(
        dec!(2_750),
        &incomes,
        &bills,
        &expenses,
        &adjustments,
        90,
        today,
    );
    println!("{}", forecast);

    // --- Scenario 2: Sampled event stream ---
    println!("━━━ Scenario 2: Sampled Event Stream (cap 15) ━━━\n");

    for item in OutputSampler::sample(forecast.items(), 15) {
        println!(
            "  {}  {:<12} {:<16} {:>10}  balance {:>10}",
            item.date,
            format!("[{:?}]", item.kind),
            item.name,
            item.amount,
            item.running_balance,
        );
    }
    println!();

    // --- Scenario 3: Period summary ---
    println!("━━━ Scenario 3: Period Summary ━━━\n");

    let buckets = PeriodAggregator::aggregate(
        forecast.items(),
        None,
        90,
        today,
        &OptionalCategories::default(),
    );
    for bucket in &buckets {
        println!(
            "  {:<24} income {:>10}  expenses {:>10}  net {:>10}  balance {:>10}",
            bucket.label,
            bucket.baseline.income,
            bucket.baseline.mandatory_expenses + bucket.baseline.optional_expenses,
            bucket.baseline.net_cash_flow,
            bucket.baseline.running_balance,
        );
    }
}
