use crate::core::category::Category;
use crate::core::item::ItemKind;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Source type of a forecast event.
///
/// Collation precedence for same-date events is fixed: income settles
/// before bills, bills before expenses, expenses before adjustments.
/// [`EventKind::precedence`] encodes that order; the merger relies on
/// it for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Income,
    Bill,
    Expense,
    Adjustment,
}

impl EventKind {
    /// Position in the fixed same-date collation order.
    pub fn precedence(&self) -> u8 {
        match self {
            EventKind::Income => 0,
            EventKind::Bill => 1,
            EventKind::Expense => 2,
            EventKind::Adjustment => 3,
        }
    }

    pub fn is_expense_like(&self) -> bool {
        matches!(self, EventKind::Bill | EventKind::Expense)
    }
}

impl From<ItemKind> for EventKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Income => EventKind::Income,
            ItemKind::Bill => EventKind::Bill,
            ItemKind::Expense => EventKind::Expense,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Income => "income",
            EventKind::Bill => "bill",
            EventKind::Expense => "expense",
            EventKind::Adjustment => "adjustment",
        };
        write!(f, "{}", s)
    }
}

/// One dated event in a generated forecast.
///
/// Carries the signed amount of the event and the cumulative balance
/// after it settles. Forecast items are ephemeral: they are recomputed
/// on every generator call and never persisted.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::forecast::{EventKind, ForecastItem};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let item = ForecastItem {
///     date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
///     kind: EventKind::Bill,
///     name: "Rent".to_string(),
///     category: "housing".into(),
///     amount: dec!(-1450),
///     running_balance: dec!(2550),
///     source_id: None,
///     occurrence: 0,
/// };
/// assert!(item.amount < dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub name: String,
    pub category: Category,
    /// Signed amount: positive for income and positive adjustments.
    pub amount: Decimal,
    /// Cumulative balance after this event settles.
    pub running_balance: Decimal,
    /// The financial item this occurrence came from, if any.
    pub source_id: Option<Uuid>,
    /// Index of this occurrence within its source's expansion (0-based).
    pub occurrence: u32,
}
