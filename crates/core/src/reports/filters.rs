//! Report request filters.
//!
//! [`ReportFilters`] is the raw request as received; [`ValidatedFilters`] is
//! the checked, parsed form the pipeline reads. Validation happens once,
//! before any store access.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ReportError;

/// A filter value given either as a single string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// Single value.
    One(String),
    /// List of values.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Returns the non-blank values as a list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        let values = match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        };
        values
            .into_iter()
            .filter(|value| !value.trim().is_empty())
            .collect()
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

/// Raw balance-report request.
///
/// Unknown keys are collected into `dimensions` and matched against the
/// configured accounting dimensions; only string and string-list values
/// survive validation. Flags accept booleans as well as `0`/`1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Company to report on.
    #[serde(default)]
    pub company: Option<String>,
    /// First day of the period, `YYYY-MM-DD`.
    #[serde(default)]
    pub from_date: Option<String>,
    /// Last day of the period, `YYYY-MM-DD`.
    #[serde(default)]
    pub to_date: Option<String>,
    /// Restrict the report to this account's subtree.
    #[serde(default)]
    pub main_account: Option<String>,
    /// Collapse opening and closing pairs onto one side.
    #[serde(default, deserialize_with = "flag")]
    pub show_net_values: bool,
    /// Keep rows without any value.
    #[serde(default, deserialize_with = "flag")]
    pub show_zero_values: bool,
    /// Restrict to a cost center and its descendants.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Restrict to one or more projects.
    #[serde(default)]
    pub project: Option<OneOrMany>,
    /// Restrict to a finance book.
    #[serde(default)]
    pub finance_book: Option<String>,
    /// Also accept entries of the company's default finance book.
    #[serde(default, deserialize_with = "flag")]
    pub include_default_book_entries: bool,
    /// Present amounts in this currency.
    #[serde(default)]
    pub presentation_currency: Option<String>,
    /// Keep period-closing entries posted inside the period. Defaults to true.
    #[serde(default, deserialize_with = "optional_flag")]
    pub with_period_closing_entry_for_current_period: Option<bool>,
    /// Keep period-closing entries in opening balances. Defaults to true.
    #[serde(default, deserialize_with = "optional_flag")]
    pub with_period_closing_entry_for_opening: Option<bool>,
    /// Accounting-dimension filters by field name.
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, Value>,
}

impl ReportFilters {
    /// Creates filters for a company and date range.
    #[must_use]
    pub fn new(company: &str, from_date: &str, to_date: &str) -> Self {
        Self {
            company: Some(company.to_string()),
            from_date: Some(from_date.to_string()),
            to_date: Some(to_date.to_string()),
            ..Self::default()
        }
    }

    /// Checks required fields and parses dates.
    ///
    /// Checks run in order: company, from date, to date, date parsing,
    /// date range.
    pub fn validate(self) -> Result<ValidatedFilters, ReportError> {
        let company = present(self.company).ok_or(ReportError::CompanyRequired)?;
        let from_raw = present(self.from_date).ok_or(ReportError::FromDateRequired)?;
        let to_raw = present(self.to_date).ok_or(ReportError::ToDateRequired)?;

        let from_date = parse_date("from_date", &from_raw)?;
        let to_date = parse_date("to_date", &to_raw)?;
        if from_date > to_date {
            return Err(ReportError::InvalidDateRange { from_date, to_date });
        }

        let dimensions = self
            .dimensions
            .into_iter()
            .map(|(field, value)| (field, dimension_values(value)))
            .filter(|(_, values)| !values.is_empty())
            .collect();

        Ok(ValidatedFilters {
            company,
            from_date,
            to_date,
            main_account: present(self.main_account),
            show_net_values: self.show_net_values,
            show_zero_values: self.show_zero_values,
            cost_center: present(self.cost_center),
            projects: self.project.map(OneOrMany::into_vec).unwrap_or_default(),
            finance_book: present(self.finance_book),
            include_default_book_entries: self.include_default_book_entries,
            presentation_currency: present(self.presentation_currency),
            with_period_closing_entry_for_current_period: self
                .with_period_closing_entry_for_current_period
                .unwrap_or(true),
            with_period_closing_entry_for_opening: self
                .with_period_closing_entry_for_opening
                .unwrap_or(true),
            dimensions,
        })
    }
}

/// Checked report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedFilters {
    /// Company to report on.
    pub company: String,
    /// First day of the period.
    pub from_date: NaiveDate,
    /// Last day of the period.
    pub to_date: NaiveDate,
    /// Subtree root.
    pub main_account: Option<String>,
    /// Collapse opening and closing pairs onto one side.
    pub show_net_values: bool,
    /// Keep rows without any value.
    pub show_zero_values: bool,
    /// Cost center, before expansion.
    pub cost_center: Option<String>,
    /// Project list; empty means no project filter.
    pub projects: Vec<String>,
    /// Requested finance book.
    pub finance_book: Option<String>,
    /// Also accept the company's default finance book.
    pub include_default_book_entries: bool,
    /// Presentation currency.
    pub presentation_currency: Option<String>,
    /// Keep period-closing entries posted inside the period.
    pub with_period_closing_entry_for_current_period: bool,
    /// Keep period-closing entries in opening balances.
    pub with_period_closing_entry_for_opening: bool,
    /// Accounting-dimension values by field name, before expansion.
    pub dimensions: BTreeMap<String, Vec<String>>,
}

/// Checkbox-style flag: `true`/`false`, `0`/`1`, or their string forms.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagValue {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            Self::Bool(value) => Ok(value),
            Self::Int(value) => Ok(value != 0),
            Self::Text(text) => match text.trim() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(E::custom(format!("invalid flag value: {other}"))),
            },
        }
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    FlagValue::deserialize(deserializer)?.into_bool()
}

fn optional_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Option::<FlagValue>::deserialize(deserializer)?
        .map(FlagValue::into_bool)
        .transpose()
}

/// Non-blank strings of a dimension filter value; anything else is ignored.
fn dimension_values(value: Value) -> Vec<String> {
    let values = match value {
        Value::String(value) => vec![value],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(value) => Some(value),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect()
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ReportError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
