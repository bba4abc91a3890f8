use crate::engine::generator::Forecast;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A derived key summarizing forecast inputs.
///
/// Callers fingerprint {starting balance, item content, horizon,
/// scenario parameters} and skip regeneration when the fingerprint is
/// unchanged. Hash any tuple of the inputs that shape the forecast:
///
/// ```
/// use cashflow_engine::engine::fingerprint::Fingerprint;
/// use rust_decimal_macros::dec;
///
/// let a = Fingerprint::of(&(dec!(1000), 90i64));
/// let b = Fingerprint::of(&(dec!(1000), 90i64));
/// let c = Fingerprint::of(&(dec!(1000), 365i64));
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn of<T: Hash + ?Sized>(inputs: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        inputs.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Caller-owned memoization of the last generated forecast.
///
/// Each independent consumer (baseline view, scenario view, chart,
/// monthly breakdown) owns its own memo, so memoization never
/// cross-contaminates. A new result replaces the stored one wholesale:
/// last writer wins, never a partial or stale mix.
#[derive(Debug, Default)]
pub struct ForecastMemo {
    last: Option<(Fingerprint, Forecast)>,
}

impl ForecastMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached forecast if `fingerprint` matches the last
    /// generation; otherwise run `compute` and store its result.
    pub fn get_or_compute<F>(&mut self, fingerprint: Fingerprint, compute: F) -> &Forecast
    where
        F: FnOnce() -> Forecast,
    {
        let stale = !matches!(&self.last, Some((fp, _)) if *fp == fingerprint);
        if stale {
            self.last = Some((fingerprint, compute()));
        }
        // Populated just above when it was stale or empty.
        &self.last.as_ref().unwrap().1
    }

    /// Discard the cached result entirely.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn cached(&self) -> Option<&Forecast> {
        self.last.as_ref().map(|(_, forecast)| forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::generator::ForecastGenerator;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn forecast(balance: rust_decimal::Decimal) -> Forecast {
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        ForecastGenerator::generate(balance, &[], &[], &[], &[], 30, today)
    }

    #[test]
    fn test_unchanged_fingerprint_skips_regeneration() {
        let mut memo = ForecastMemo::new();
        let fp = Fingerprint::of(&(dec!(1000), 30i64));
        let calls = Cell::new(0);

        memo.get_or_compute(fp, || {
            calls.set(calls.get() + 1);
            forecast(dec!(1000))
        });
        memo.get_or_compute(fp, || {
            calls.set(calls.get() + 1);
            forecast(dec!(1000))
        });

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_changed_fingerprint_replaces_wholesale() {
        let mut memo = ForecastMemo::new();
        let first = Fingerprint::of(&(dec!(1000), 30i64));
        let second = Fingerprint::of(&(dec!(2000), 30i64));

        memo.get_or_compute(first, || forecast(dec!(1000)));
        let result = memo.get_or_compute(second, || forecast(dec!(2000)));
        assert_eq!(result.starting_balance(), dec!(2000));
        assert_eq!(memo.cached().unwrap().starting_balance(), dec!(2000));
    }

    #[test]
    fn test_invalidate_clears_cache() {
        let mut memo = ForecastMemo::new();
        let fp = Fingerprint::of(&42u64);
        memo.get_or_compute(fp, || forecast(dec!(1)));
        memo.invalidate();
        assert!(memo.cached().is_none());
    }

    #[test]
    fn test_fingerprint_sensitive_to_content() {
        let a = Fingerprint::of(&("salary", dec!(3000)));
        let b = Fingerprint::of(&("salary", dec!(3001)));
        assert_ne!(a, b);
    }
}
