use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Spending category assigned to a financial item.
///
/// Categories are free-form labels ("rent", "groceries", "dining").
/// Comparison is case-insensitive so that "Dining" and "dining"
/// accumulate into the same aggregation slot.
///
/// # Examples
///
/// ```
/// use cashflow_engine::core::category::Category;
///
/// let a = Category::new("Dining");
/// let b = Category::new("dining");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized form used for equality and set membership.
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Category {}

impl std::hash::Hash for Category {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The set of categories treated as optional (discretionary) spending
/// by the period aggregator.
///
/// Supplied by the caller; the aggregation engine does not bake in a
/// domain taxonomy. `Default` seeds the usual discretionary categories
/// as a convenient starting point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionalCategories {
    categories: HashSet<String>,
}

impl OptionalCategories {
    /// An empty set: every expense counts as mandatory.
    pub fn none() -> Self {
        Self {
            categories: HashSet::new(),
        }
    }

    pub fn from_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: iter
                .into_iter()
                .map(|s| Category::new(s).normalized())
                .collect(),
        }
    }

    pub fn insert(&mut self, category: impl Into<String>) {
        self.categories.insert(Category::new(category).normalized());
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(&category.normalized())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for OptionalCategories {
    fn default() -> Self {
        Self::from_iter([
            "entertainment",
            "dining",
            "hobbies",
            "subscriptions",
            "shopping",
            "travel",
        ])
    }
}
