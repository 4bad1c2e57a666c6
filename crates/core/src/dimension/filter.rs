//! Secondary-dimension filtering for ledger rows.
//!
//! The same [`RowFilter`] is applied to period-closing snapshots and to raw
//! GL entries so both opening-balance sources see identical filtering.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ledger::DimensionedRow;

/// Finance books a row may be tagged with.
///
/// Rows without a finance book always pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceBookRule {
    /// Accepted finance books.
    pub books: BTreeSet<String>,
}

impl FinanceBookRule {
    /// Creates a rule accepting the given books plus untagged rows.
    #[must_use]
    pub fn accepting<I, S>(books: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            books: books
                .into_iter()
                .map(Into::into)
                .filter(|book: &String| !book.is_empty())
                .collect(),
        }
    }

    /// Returns true if a row tagged with `book` passes.
    #[must_use]
    pub fn allows(&self, book: Option<&str>) -> bool {
        book.is_none_or(|book| self.books.contains(book))
    }
}

/// Set-membership filter over a row's secondary dimensions.
///
/// A `None` set means the dimension is not filtered. An active set only
/// admits rows whose value is a member, so untagged rows are excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    /// Accepted cost centers, already expanded to descendants.
    pub cost_centers: Option<BTreeSet<String>>,
    /// Accepted projects.
    pub projects: Option<BTreeSet<String>>,
    /// Finance book rule, `None` when the company uses no finance books.
    pub finance_books: Option<FinanceBookRule>,
    /// Accepted values per custom dimension field name.
    pub dimensions: BTreeMap<String, BTreeSet<String>>,
}

impl RowFilter {
    /// Creates a filter that accepts every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts rows to the given cost centers.
    #[must_use]
    pub fn with_cost_centers<I: IntoIterator<Item = String>>(mut self, values: I) -> Self {
        self.cost_centers = Some(values.into_iter().collect());
        self
    }

    /// Restricts rows to the given projects.
    #[must_use]
    pub fn with_projects<I: IntoIterator<Item = String>>(mut self, values: I) -> Self {
        self.projects = Some(values.into_iter().collect());
        self
    }

    /// Sets the finance book rule.
    #[must_use]
    pub fn with_finance_books(mut self, rule: FinanceBookRule) -> Self {
        self.finance_books = Some(rule);
        self
    }

    /// Restricts a custom dimension to the given values.
    #[must_use]
    pub fn with_dimension<I: IntoIterator<Item = String>>(
        mut self,
        fieldname: impl Into<String>,
        values: I,
    ) -> Self {
        self.dimensions
            .insert(fieldname.into(), values.into_iter().collect());
        self
    }

    /// Returns true if the filter matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cost_centers.is_none()
            && self.projects.is_none()
            && self.finance_books.is_none()
            && self.dimensions.is_empty()
    }

    /// Returns true if the row passes every active restriction.
    pub fn matches<R: DimensionedRow + ?Sized>(&self, row: &R) -> bool {
        member(self.cost_centers.as_ref(), row.cost_center())
            && member(self.projects.as_ref(), row.project())
            && self
                .finance_books
                .as_ref()
                .is_none_or(|rule| rule.allows(row.finance_book()))
            && self
                .dimensions
                .iter()
                .all(|(field, values)| member(Some(values), row.dimension(field)))
    }
}

fn member(set: Option<&BTreeSet<String>>, value: Option<&str>) -> bool {
    match set {
        None => true,
        Some(set) => value.is_some_and(|value| set.contains(value)),
    }
}
