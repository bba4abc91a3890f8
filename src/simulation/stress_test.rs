//! Stress testing utilities for the forecast engine.
//!
//! Generates random financial-item portfolios to exercise expansion,
//! merging, and aggregation under load.

use crate::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of income sources.
    pub income_count: usize,
    /// Number of recurring bills.
    pub bill_count: usize,
    /// Number of recurring discretionary expenses.
    pub expense_count: usize,
    /// Minimum item amount.
    pub min_amount: Decimal,
    /// Maximum item amount.
    pub max_amount: Decimal,
    /// Anchors are spread up to this many days before `today`.
    pub anchor_spread_days: i64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            income_count: 2,
            bill_count: 8,
            expense_count: 10,
            min_amount: Decimal::from(10),
            max_amount: Decimal::from(3_000),
            anchor_spread_days: 365 * 3,
        }
    }
}

/// A randomly generated set of incomes, bills, and expenses.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    pub incomes: Vec<FinancialItem>,
    pub bills: Vec<FinancialItem>,
    pub expenses: Vec<FinancialItem>,
}

impl Portfolio {
    pub fn len(&self) -> usize {
        self.incomes.len() + self.bills.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const FREQUENCIES: [Frequency; 7] = [
    Frequency::Once,
    Frequency::Daily,
    Frequency::Weekly,
    Frequency::Biweekly,
    Frequency::Monthly,
    Frequency::Quarterly,
    Frequency::Annual,
];

const EXPENSE_CATEGORIES: [&str; 6] = [
    "groceries",
    "dining",
    "entertainment",
    "transport",
    "subscriptions",
    "utilities",
];

/// Generate a random portfolio anchored around `today`.
pub fn generate_random_portfolio(config: &PortfolioConfig, today: NaiveDate) -> Portfolio {
    let mut rng = rand::thread_rng();
    let mut portfolio = Portfolio::default();

    for i in 0..config.income_count {
        let item = random_item(
            &mut rng,
            config,
            today,
            format!("INCOME-{:03}", i),
            ItemKind::Income,
            "salary",
        );
        portfolio.incomes.push(item);
    }
    for i in 0..config.bill_count {
        let item = random_item(
            &mut rng,
            config,
            today,
            format!("BILL-{:03}", i),
            ItemKind::Bill,
            "housing",
        );
        portfolio.bills.push(item);
    }
    for i in 0..config.expense_count {
        let category = EXPENSE_CATEGORIES[rng.gen_range(0..EXPENSE_CATEGORIES.len())];
        let item = random_item(
            &mut rng,
            config,
            today,
            format!("EXPENSE-{:03}", i),
            ItemKind::Expense,
            category,
        );
        portfolio.expenses.push(item);
    }

    portfolio
}

fn random_item<R: Rng>(
    rng: &mut R,
    config: &PortfolioConfig,
    today: NaiveDate,
    name: String,
    kind: ItemKind,
    category: &str,
) -> FinancialItem {
    let min_f64: f64 = config.min_amount.to_string().parse().unwrap_or(10.0);
    let max_f64: f64 = config.max_amount.to_string().parse().unwrap_or(3_000.0);
    let amount = Decimal::from_f64_retain(rng.gen_range(min_f64..max_f64))
        .unwrap_or(Decimal::from(100))
        .round_dp(2);

    let frequency = FREQUENCIES[rng.gen_range(0..FREQUENCIES.len())];
    let anchor = today - Duration::days(rng.gen_range(0..config.anchor_spread_days.max(1)));

    FinancialItem::new(
        name,
        kind,
        amount.max(Decimal::ONE),
        RecurrenceRule::new(frequency, anchor),
    )
    .with_category(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::ForecastGenerator;
    use rust_decimal_macros::dec;

    #[test]
    fn test_random_portfolio_counts() {
        let config = PortfolioConfig {
            income_count: 3,
            bill_count: 5,
            expense_count: 7,
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let portfolio = generate_random_portfolio(&config, today);
        assert_eq!(portfolio.incomes.len(), 3);
        assert_eq!(portfolio.bills.len(), 5);
        assert_eq!(portfolio.expenses.len(), 7);
        assert_eq!(portfolio.len(), 15);
    }

    #[test]
    fn test_random_portfolio_forecasts_cleanly() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let portfolio = generate_random_portfolio(&PortfolioConfig::default(), today);
        let forecast = ForecastGenerator::generate(
            dec!(5000),
            &portfolio.incomes,
            &portfolio.bills,
            &portfolio.expenses,
            &[],
            365,
            today,
        );
        assert!(forecast.is_conserved());
        assert_eq!(forecast.skipped(), 0);
        for pair in forecast.items().windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }
}
