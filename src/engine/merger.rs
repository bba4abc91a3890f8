use crate::core::category::Category;
use crate::core::forecast::EventKind;
use crate::core::item::BalanceAdjustment;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One dated occurrence of a financial item, before sign application.
///
/// Produced by recurrence expansion; the amount is still the item's
/// non-negative magnitude.
#[derive(Debug, Clone)]
pub struct RawOccurrence {
    pub date: NaiveDate,
    pub name: String,
    pub category: Category,
    pub magnitude: Decimal,
    pub source_id: Uuid,
    /// Index of this occurrence within its source's expansion.
    pub occurrence: u32,
}

/// A signed, merge-ordered event ready for balance accumulation.
#[derive(Debug, Clone)]
pub struct MergedEvent {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub name: String,
    pub category: Category,
    /// Signed amount: the item's sign convention, applied at merge time.
    pub amount: Decimal,
    pub source_id: Option<Uuid>,
    pub occurrence: u32,
}

/// Merges heterogeneous dated event streams into one deterministically
/// ordered chronological list.
///
/// The sign convention is applied here: incomes count positive, bills
/// and expenses negative, adjustments carry their own explicit sign.
/// Equal dates are broken by the fixed kind precedence (income, bill,
/// expense, adjustment) and then by original input order, so identical
/// inputs always produce identical output.
pub struct EventStreamMerger;

impl EventStreamMerger {
    pub fn merge(
        incomes: Vec<RawOccurrence>,
        bills: Vec<RawOccurrence>,
        expenses: Vec<RawOccurrence>,
        adjustments: &[BalanceAdjustment],
    ) -> Vec<MergedEvent> {
        let mut events = Vec::with_capacity(
            incomes.len() + bills.len() + expenses.len() + adjustments.len(),
        );

        events.extend(Self::signed(incomes, EventKind::Income));
        events.extend(Self::signed(bills, EventKind::Bill));
        events.extend(Self::signed(expenses, EventKind::Expense));
        events.extend(adjustments.iter().map(|adj| MergedEvent {
            date: adj.date,
            kind: EventKind::Adjustment,
            name: adj.label.clone(),
            category: Category::new("adjustment"),
            amount: adj.amount,
            source_id: None,
            occurrence: 0,
        }));

        // Stable sort: input order survives within (date, kind).
        events.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.kind.precedence().cmp(&b.kind.precedence()))
        });
        events
    }

    fn signed(
        occurrences: Vec<RawOccurrence>,
        kind: EventKind,
    ) -> impl Iterator<Item = MergedEvent> {
        let sign = if kind == EventKind::Income {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };
        occurrences.into_iter().map(move |occ| MergedEvent {
            date: occ.date,
            kind,
            name: occ.name,
            category: occ.category,
            amount: occ.magnitude * sign,
            source_id: Some(occ.source_id),
            occurrence: occ.occurrence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn occ(date_: NaiveDate, name: &str, magnitude: Decimal) -> RawOccurrence {
        RawOccurrence {
            date: date_,
            name: name.to_string(),
            category: Category::new("test"),
            magnitude,
            source_id: Uuid::nil(),
            occurrence: 0,
        }
    }

    #[test]
    fn test_sign_convention_applied_at_merge() {
        let merged = EventStreamMerger::merge(
            vec![occ(date(2026, 9, 1), "salary", dec!(3000))],
            vec![occ(date(2026, 9, 2), "rent", dec!(1450))],
            vec![occ(date(2026, 9, 3), "groceries", dec!(80))],
            &[BalanceAdjustment::new(date(2026, 9, 4), "car repair", dec!(-600))],
        );
        let amounts: Vec<Decimal> = merged.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![dec!(3000), dec!(-1450), dec!(-80), dec!(-600)]);
    }

    #[test]
    fn test_equal_dates_break_by_kind_precedence() {
        let day = date(2026, 9, 1);
        let merged = EventStreamMerger::merge(
            vec![occ(day, "salary", dec!(3000))],
            vec![occ(day, "rent", dec!(1450))],
            vec![occ(day, "coffee", dec!(5))],
            &[BalanceAdjustment::new(day, "boost", dec!(50))],
        );
        let kinds: Vec<EventKind> = merged.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Income,
                EventKind::Bill,
                EventKind::Expense,
                EventKind::Adjustment,
            ]
        );
    }

    #[test]
    fn test_equal_date_and_kind_preserve_input_order() {
        let day = date(2026, 9, 1);
        let merged = EventStreamMerger::merge(
            Vec::new(),
            vec![occ(day, "first", dec!(10)), occ(day, "second", dec!(20))],
            Vec::new(),
            &[],
        );
        assert_eq!(merged[0].name, "first");
        assert_eq!(merged[1].name, "second");
    }

    #[test]
    fn test_chronological_across_streams() {
        let merged = EventStreamMerger::merge(
            vec![occ(date(2026, 9, 10), "salary", dec!(3000))],
            vec![occ(date(2026, 9, 1), "rent", dec!(1450))],
            Vec::new(),
            &[],
        );
        assert_eq!(merged[0].name, "rent");
        assert_eq!(merged[1].name, "salary");
    }

    #[test]
    fn test_empty_inputs() {
        let merged = EventStreamMerger::merge(Vec::new(), Vec::new(), Vec::new(), &[]);
        assert!(merged.is_empty());
    }
}
