//! cashflow-engine CLI
//!
//! Run balance forecasts and what-if scenarios from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Project a balance forward from a JSON item file
//! cashflow-engine forecast --input items.json --balance 2500 --horizon 90
//!
//! # What-if: income down 10%, expenses up 5%
//! cashflow-engine scenario --input items.json --balance 2500 --horizon 90 \
//!     --income-adjust -10 --expense-adjust 5
//!
//! # Monthly breakdown buckets
//! cashflow-engine summary --input items.json --balance 2500 --horizon 180
//!
//! # Generate a random portfolio for testing
//! cashflow-engine generate --incomes 2 --bills 8 --expenses 10
//! ```

use cashflow_engine::core::category::OptionalCategories;
use cashflow_engine::core::item::{BalanceAdjustment, FinancialItem, ItemKind, RecurrenceRule};
use cashflow_engine::engine::generator::{Forecast, ForecastGenerator};
use cashflow_engine::report::aggregator::{percent_of, PeriodAggregator};
use cashflow_engine::report::sampler::OutputSampler;
use cashflow_engine::simulation::scenario::{ScenarioOverlay, ScenarioParameters};
use cashflow_engine::simulation::stress_test::{generate_random_portfolio, PortfolioConfig};
use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"cashflow-engine — cash-flow forecasting and scenario simulation

USAGE:
    cashflow-engine <COMMAND> [OPTIONS]

COMMANDS:
    forecast    Project the running balance over a horizon
    scenario    Run a what-if overlay against the baseline
    summary     Aggregate the forecast into calendar-period buckets
    generate    Generate a random item portfolio (for testing)
    help        Show this message

OPTIONS (forecast, scenario, summary):
    --input <FILE>        Path to JSON items file
    --balance <AMOUNT>    Starting balance (default: 0)
    --horizon <DAYS>      Forward window length in days (default: 90)
    --today <DATE>        Override today (YYYY-MM-DD, default: system date)
    --format <FORMAT>     Output format: text (default) or json
    --cap <N>             Sample output down to at most N items (forecast)

OPTIONS (scenario):
    --income-adjust <P>     Percent applied to incomes (e.g. -10)
    --expense-adjust <P>    Percent applied to bills and expenses
    --savings <AMOUNT>      Monthly savings boost on the 1st of each month
    --one-time-expense <AMOUNT>   Single unexpected expense dated today
    --one-time-income <AMOUNT>    Single unexpected income dated today

OPTIONS (summary):
    --optional <LIST>     Comma-separated optional-expense categories

OPTIONS (generate):
    --incomes <N>         Number of income sources (default: 2)
    --bills <N>           Number of bills (default: 8)
    --expenses <N>        Number of expenses (default: 10)
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    cashflow-engine forecast --input items.json --balance 2500 --horizon 365 --cap 200
    cashflow-engine scenario --input items.json --balance 2500 --income-adjust -10
    cashflow-engine summary --input items.json --horizon 180 --optional dining,travel
    cashflow-engine generate --bills 12 --output items.json"#
    );
}

/// JSON schema for one input item.
#[derive(serde::Deserialize)]
struct ItemInput {
    name: String,
    #[serde(rename = "type")]
    kind: ItemKind,
    #[serde(default = "default_category")]
    category: String,
    amount: Decimal,
    #[serde(flatten)]
    rule: RecurrenceRule,
}

fn default_category() -> String {
    "uncategorized".to_string()
}

/// JSON schema for one input adjustment.
#[derive(serde::Deserialize)]
struct AdjustmentInput {
    date: NaiveDate,
    label: String,
    amount: Decimal,
}

#[derive(serde::Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    #[serde(default)]
    adjustments: Vec<AdjustmentInput>,
}

/// The parsed input boundary: items bucketed by kind, bad records
/// skipped with a warning rather than aborting the whole run.
#[derive(Default)]
struct LoadedItems {
    incomes: Vec<FinancialItem>,
    bills: Vec<FinancialItem>,
    expenses: Vec<FinancialItem>,
    adjustments: Vec<BalanceAdjustment>,
}

fn load_items(path: &str) -> LoadedItems {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ItemsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "items": [
    {{ "name": "Rent", "type": "bill", "category": "housing",
      "amount": "1450", "frequency": "monthly", "anchor": "2026-01-01" }}
  ],
  "adjustments": [
    {{ "date": "2026-09-10", "label": "Car repair", "amount": "-600" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut loaded = LoadedItems::default();
    for (index, raw) in file.items.into_iter().enumerate() {
        let input: ItemInput = match serde_json::from_value(raw) {
            Ok(input) => input,
            Err(e) => {
                warn!("skipping item #{}: {}", index, e);
                continue;
            }
        };
        let item = FinancialItem::new(input.name, input.kind, input.amount, input.rule)
            .with_category(input.category.as_str());
        match input.kind {
            ItemKind::Income => loaded.incomes.push(item),
            ItemKind::Bill => loaded.bills.push(item),
            ItemKind::Expense => loaded.expenses.push(item),
        }
    }
    for adj in file.adjustments {
        loaded
            .adjustments
            .push(BalanceAdjustment::new(adj.date, adj.label, adj.amount));
    }
    loaded
}

/// Shared options for the forecast-shaped commands.
struct CommonOptions {
    input_path: Option<String>,
    balance: Decimal,
    horizon: i64,
    today: NaiveDate,
    format: String,
    cap: Option<usize>,
    params: ScenarioParameters,
    optional: OptionalCategories,
}

impl CommonOptions {
    fn defaults() -> Self {
        Self {
            input_path: None,
            balance: Decimal::ZERO,
            horizon: 90,
            today: chrono::Local::now().date_naive(),
            format: "text".to_string(),
            cap: None,
            params: ScenarioParameters::default(),
            optional: OptionalCategories::default(),
        }
    }
}

fn required_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value '{}' for {}", value, flag);
        process::exit(1);
    })
}

fn parse_common(args: &[String]) -> CommonOptions {
    let mut opts = CommonOptions::defaults();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].clone();
        match flag.as_str() {
            "--input" => {
                i += 1;
                opts.input_path = Some(required_value(args, i, "--input"));
            }
            "--balance" => {
                i += 1;
                opts.balance = parse_or_exit(&required_value(args, i, "--balance"), "--balance");
            }
            "--horizon" => {
                i += 1;
                opts.horizon = parse_or_exit(&required_value(args, i, "--horizon"), "--horizon");
            }
            "--today" => {
                i += 1;
                opts.today = parse_or_exit(&required_value(args, i, "--today"), "--today");
            }
            "--format" => {
                i += 1;
                opts.format = required_value(args, i, "--format");
            }
            "--cap" => {
                i += 1;
                opts.cap = Some(parse_or_exit(&required_value(args, i, "--cap"), "--cap"));
            }
            "--income-adjust" => {
                i += 1;
                opts.params.income_adjustment_percent =
                    parse_or_exit(&required_value(args, i, "--income-adjust"), "--income-adjust");
            }
            "--expense-adjust" => {
                i += 1;
                opts.params.expense_adjustment_percent = parse_or_exit(
                    &required_value(args, i, "--expense-adjust"),
                    "--expense-adjust",
                );
            }
            "--savings" => {
                i += 1;
                opts.params.monthly_savings_delta =
                    parse_or_exit(&required_value(args, i, "--savings"), "--savings");
            }
            "--one-time-expense" => {
                i += 1;
                opts.params.one_time_expense = parse_or_exit(
                    &required_value(args, i, "--one-time-expense"),
                    "--one-time-expense",
                );
            }
            "--one-time-income" => {
                i += 1;
                opts.params.one_time_income = parse_or_exit(
                    &required_value(args, i, "--one-time-income"),
                    "--one-time-income",
                );
            }
            "--optional" => {
                i += 1;
                let list = required_value(args, i, "--optional");
                opts.optional = OptionalCategories::from_iter(list.split(',').map(str::trim));
            }
            _ => {
                eprintln!("Unknown option: {}", flag);
                process::exit(1);
            }
        }
        i += 1;
    }
    opts.params.horizon_days = opts.horizon;
    opts
}

fn require_input(opts: &CommonOptions) -> LoadedItems {
    let path = opts.input_path.clone().unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    load_items(&path)
}

/// Generate with a recoverable fallback: a failure must surface an
/// empty forecast and a message, never a crash.
fn generate_or_empty(opts: &CommonOptions, loaded: &LoadedItems) -> Forecast {
    let result = std::panic::catch_unwind(|| {
        ForecastGenerator::generate(
            opts.balance,
            &loaded.incomes,
            &loaded.bills,
            &loaded.expenses,
            &loaded.adjustments,
            opts.horizon,
            opts.today,
        )
    });
    result.unwrap_or_else(|_| {
        eprintln!("could not generate forecast; showing an empty one");
        Forecast::empty(opts.balance, opts.today)
    })
}

fn print_items_text(forecast: &Forecast, cap: Option<usize>) {
    let items = match cap {
        Some(cap) if forecast.len() > cap => OutputSampler::sample(forecast.items(), cap),
        _ => forecast.items().to_vec(),
    };
    println!("{}", forecast);
    println!(
        "{:<12} {:<11} {:<24} {:>12} {:>14}",
        "DATE", "TYPE", "NAME", "AMOUNT", "BALANCE"
    );
    for item in &items {
        println!(
            "{:<12} {:<11} {:<24} {:>12} {:>14}",
            item.date.to_string(),
            item.kind.to_string(),
            item.name,
            item.amount,
            item.running_balance
        );
    }
    if items.len() < forecast.len() {
        println!("({} of {} events shown)", items.len(), forecast.len());
    }
}

fn cmd_forecast(args: &[String]) {
    let opts = parse_common(args);
    let loaded = require_input(&opts);
    let forecast = generate_or_empty(&opts, &loaded);

    if opts.format == "json" {
        let output = match opts.cap {
            Some(cap) if forecast.len() > cap => {
                let sampled = OutputSampler::sample(forecast.items(), cap);
                serde_json::json!({
                    "starting_balance": forecast.starting_balance(),
                    "closing_balance": forecast.closing_balance(),
                    "window_start": forecast.window_start(),
                    "window_end": forecast.window_end(),
                    "total_events": forecast.len(),
                    "items": sampled,
                })
            }
            _ => serde_json::to_value(&forecast).unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
    } else {
        print_items_text(&forecast, opts.cap);
    }
}

fn cmd_scenario(args: &[String]) {
    let opts = parse_common(args);
    let loaded = require_input(&opts);
    let baseline = generate_or_empty(&opts, &loaded);
    let scenario = ScenarioOverlay::simulate(
        &loaded.incomes,
        &loaded.bills,
        &loaded.expenses,
        &opts.params,
        opts.balance,
        opts.today,
    );

    if opts.format == "json" {
        let output = serde_json::json!({
            "baseline": {
                "closing_balance": baseline.closing_balance(),
                "net_change": baseline.net_change(),
                "minimum_balance": baseline.minimum_balance(),
            },
            "scenario": {
                "closing_balance": scenario.closing_balance(),
                "net_change": scenario.net_change(),
                "minimum_balance": scenario.minimum_balance(),
                "items": scenario.items(),
            },
            "difference": scenario.closing_balance() - baseline.closing_balance(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
    } else {
        println!("=== Baseline ===");
        print!("{}", baseline);
        println!("\n=== Scenario ===");
        print!("{}", scenario);
        println!(
            "\nDifference at horizon: {}",
            scenario.closing_balance() - baseline.closing_balance()
        );
    }
}

fn cmd_summary(args: &[String]) {
    let opts = parse_common(args);
    let loaded = require_input(&opts);
    let forecast = generate_or_empty(&opts, &loaded);

    let scenario = if opts.params.is_neutral() {
        None
    } else {
        Some(ScenarioOverlay::simulate(
            &loaded.incomes,
            &loaded.bills,
            &loaded.expenses,
            &opts.params,
            opts.balance,
            opts.today,
        ))
    };
    let scenario_items = scenario.as_ref().map(|f| f.items());

    let buckets = PeriodAggregator::aggregate(
        forecast.items(),
        scenario_items,
        opts.horizon,
        opts.today,
        &opts.optional,
    );

    if opts.format == "json" {
        println!("{}", serde_json::to_string_pretty(&buckets).unwrap_or_default());
    } else {
        println!(
            "{:<16} {:>10} {:>11} {:>10} {:>10} {:>12}",
            "PERIOD", "INCOME", "MANDATORY", "OPTIONAL", "NET", "BALANCE"
        );
        for bucket in &buckets {
            println!(
                "{:<16} {:>10} {:>11} {:>10} {:>10} {:>12}",
                bucket.label,
                bucket.baseline.income,
                bucket.baseline.mandatory_expenses,
                bucket.baseline.optional_expenses,
                bucket.baseline.net_cash_flow,
                bucket.baseline.running_balance,
            );
        }
        let income: Decimal = buckets.iter().map(|b| b.baseline.income).sum();
        let spent: Decimal = buckets
            .iter()
            .map(|b| b.baseline.mandatory_expenses + b.baseline.optional_expenses)
            .sum();
        println!(
            "\nSpent {} of {} income ({:.1}%)",
            spent,
            income,
            percent_of(spent, income)
        );
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = PortfolioConfig::default();
    let mut output_path: Option<String> = None;
    let mut today = chrono::Local::now().date_naive();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--incomes" => {
                i += 1;
                config.income_count =
                    parse_or_exit(&required_value(args, i, "--incomes"), "--incomes");
            }
            "--bills" => {
                i += 1;
                config.bill_count = parse_or_exit(&required_value(args, i, "--bills"), "--bills");
            }
            "--expenses" => {
                i += 1;
                config.expense_count =
                    parse_or_exit(&required_value(args, i, "--expenses"), "--expenses");
            }
            "--today" => {
                i += 1;
                today = parse_or_exit(&required_value(args, i, "--today"), "--today");
            }
            "--output" => {
                i += 1;
                output_path = Some(required_value(args, i, "--output"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let portfolio = generate_random_portfolio(&config, today);

    #[derive(serde::Serialize)]
    struct OutputItem<'a> {
        name: &'a str,
        #[serde(rename = "type")]
        kind: ItemKind,
        category: String,
        amount: Decimal,
        #[serde(flatten)]
        rule: &'a RecurrenceRule,
    }

    #[derive(serde::Serialize)]
    struct OutputFile<'a> {
        items: Vec<OutputItem<'a>>,
    }

    let items: Vec<OutputItem> = portfolio
        .incomes
        .iter()
        .chain(&portfolio.bills)
        .chain(&portfolio.expenses)
        .map(|item| OutputItem {
            name: item.name(),
            kind: item.kind(),
            category: item.category().to_string(),
            amount: item.amount(),
            rule: item.rule(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&OutputFile { items }).unwrap_or_default();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} items → {}", portfolio.len(), path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "forecast" => cmd_forecast(rest),
        "scenario" => cmd_scenario(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
