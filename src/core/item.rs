use crate::core::category::Category;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// How often a financial item recurs.
///
/// This is a closed set of date-arithmetic strategies, not an open
/// hierarchy: each variant maps to one stepping rule in the
/// recurrence expander. Unknown strings arriving from the input
/// boundary deserialize into [`Frequency::Unrecognized`], which the
/// expander degrades to a single occurrence rather than aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annual,
    #[serde(other)]
    Unrecognized,
}

impl Frequency {
    /// Fixed period length in days, for the frequencies that have one.
    ///
    /// Month-based frequencies return `None`; they require calendar
    /// arithmetic rather than a fixed day count.
    pub fn fixed_period_days(&self) -> Option<i64> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Biweekly => Some(14),
            _ => None,
        }
    }

    /// Period length in whole months, for the month-based frequencies.
    pub fn period_months(&self) -> Option<i32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Annual => Some(12),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Once => "once",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annual => "annual",
            Frequency::Unrecognized => "unrecognized",
        };
        write!(f, "{}", s)
    }
}

/// When a recurring item occurs: how often, starting when, ending when.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// The first scheduled date of the series.
    pub anchor: NaiveDate,
    /// Optional last date on which an occurrence may fall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, anchor: NaiveDate) -> Self {
        Self {
            frequency,
            anchor,
            end: None,
        }
    }

    pub fn once(date: NaiveDate) -> Self {
        Self::new(Frequency::Once, date)
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }
}

/// Signed-type tag of a financial item.
///
/// Incomes add to the running balance; bills and expenses subtract.
/// The distinction between bills and expenses matters for merge
/// ordering and for the mandatory/optional split in aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Income,
    Bill,
    Expense,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemKind::Income => "income",
            ItemKind::Bill => "bill",
            ItemKind::Expense => "expense",
        };
        write!(f, "{}", s)
    }
}

/// Validation failures for a single financial item.
///
/// A failed item is skipped with a warning; it never aborts forecast
/// generation for the remaining items.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("item '{name}' has non-positive amount {amount}")]
    NonPositiveAmount { name: String, amount: Decimal },
    #[error("item '{name}' ends {end} before its anchor {anchor}")]
    EndBeforeAnchor {
        name: String,
        anchor: NaiveDate,
        end: NaiveDate,
    },
}

/// A recurring or one-off source of money movement.
///
/// The amount is stored as a non-negative magnitude; the sign is
/// applied at merge time from [`ItemKind`]. Items are supplied
/// read-only per invocation by the persistence layer and are never
/// mutated by the engine.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::item::{FinancialItem, Frequency, ItemKind, RecurrenceRule};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let rent = FinancialItem::new(
///     "Rent",
///     ItemKind::Bill,
///     dec!(1450),
///     RecurrenceRule::new(
///         Frequency::Monthly,
///         NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     ),
/// );
///
/// assert_eq!(rent.amount(), dec!(1450));
/// assert!(rent.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct FinancialItem {
    id: Uuid,
    name: String,
    category: Category,
    kind: ItemKind,
    /// Non-negative magnitude; sign is derived from `kind`.
    amount: Decimal,
    rule: RecurrenceRule,
}

impl FinancialItem {
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        amount: Decimal,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: Category::new("uncategorized"),
            kind,
            amount,
            rule,
        }
    }

    /// Create an item with a specific id (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        kind: ItemKind,
        amount: Decimal,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: Category::new("uncategorized"),
            kind,
            amount,
            rule,
        }
    }

    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    /// Return a copy with the amount scaled by `factor`, used by the
    /// scenario overlay. The baseline item is untouched.
    pub fn scaled(&self, factor: Decimal) -> Self {
        let mut copy = self.clone();
        copy.amount = (self.amount * factor).round_dp(2);
        copy
    }

    /// Check the item is well formed enough to expand.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.amount <= Decimal::ZERO {
            return Err(ItemError::NonPositiveAmount {
                name: self.name.clone(),
                amount: self.amount,
            });
        }
        if let Some(end) = self.rule.end {
            if end < self.rule.anchor {
                return Err(ItemError::EndBeforeAnchor {
                    name: self.name.clone(),
                    anchor: self.rule.anchor,
                    end,
                });
            }
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }
}

/// A pre-expanded, already-dated one-off signed delta.
///
/// Used for unexpected expenses or incomes and for the synthetic
/// savings boosts injected by scenario simulation. The merger treats
/// an adjustment like a non-recurring item whose sign is already
/// applied.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct BalanceAdjustment {
    pub date: NaiveDate,
    pub label: String,
    /// Explicit signed amount: positive adds to the balance.
    pub amount: Decimal,
}

impl BalanceAdjustment {
    pub fn new(date: NaiveDate, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            label: label.into(),
            amount,
        }
    }
}
