//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;
use ledgerbal_shared::AppError;

/// Broad class of a report failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The request conflicts with company configuration.
    Configuration,
    /// A collaborator failed.
    Store,
}

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Company filter missing.
    #[error("Company is required")]
    CompanyRequired,

    /// From date filter missing.
    #[error("From Date is required")]
    FromDateRequired,

    /// To date filter missing.
    #[error("To Date is required")]
    ToDateRequired,

    /// A date filter could not be parsed.
    #[error("Invalid {field}: {value}")]
    InvalidDate {
        /// Filter name.
        field: &'static str,
        /// Rejected input.
        value: String,
    },

    /// From date after to date.
    #[error("From Date {from_date} cannot be greater than To Date {to_date}")]
    InvalidDateRange {
        /// Start date.
        from_date: NaiveDate,
        /// End date.
        to_date: NaiveDate,
    },

    /// Main account not found for the company.
    #[error("Account {account} not found for company {company}")]
    AccountNotFound {
        /// Requested account.
        account: String,
        /// Requested company.
        company: String,
    },

    /// Requested finance book conflicts with the company default.
    #[error(
        "To use a different finance book ({requested}), please uncheck 'Include Default FB Entries' (company default: {default})"
    )]
    FinanceBookConflict {
        /// Requested finance book.
        requested: String,
        /// Company default finance book.
        default: String,
    },

    /// Collaborator failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// Returns the error class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CompanyRequired
            | Self::FromDateRequired
            | Self::ToDateRequired
            | Self::InvalidDate { .. }
            | Self::InvalidDateRange { .. } => ErrorKind::Validation,
            Self::AccountNotFound { .. } => ErrorKind::NotFound,
            Self::FinanceBookConflict { .. } => ErrorKind::Configuration,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CompanyRequired => "COMPANY_REQUIRED",
            Self::FromDateRequired => "FROM_DATE_REQUIRED",
            Self::ToDateRequired => "TO_DATE_REQUIRED",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::FinanceBookConflict { .. } => "FINANCE_BOOK_CONFLICT",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Configuration => 422,
            ErrorKind::Store => 500,
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Configuration => Self::Configuration(message),
            ErrorKind::Store => Self::Store(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ReportError::CompanyRequired.error_code(), "COMPANY_REQUIRED");
        assert_eq!(
            ReportError::Store(StoreError::Unavailable("down".into())).error_code(),
            "STORE_ERROR"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ReportError::ToDateRequired.http_status_code(), 400);
        assert_eq!(
            ReportError::AccountNotFound {
                account: "Cash".into(),
                company: "TestCo".into()
            }
            .http_status_code(),
            404
        );
        assert_eq!(
            ReportError::FinanceBookConflict {
                requested: "Tax".into(),
                default: "Main".into()
            }
            .http_status_code(),
            422
        );
    }

    #[test]
    fn test_error_display() {
        let err = ReportError::InvalidDateRange {
            from_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "From Date 2024-02-01 cannot be greater than To Date 2024-01-01"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_into_app_error_keeps_status() {
        let errors = [
            ReportError::CompanyRequired,
            ReportError::AccountNotFound {
                account: "Cash".into(),
                company: "TestCo".into(),
            },
            ReportError::FinanceBookConflict {
                requested: "Tax".into(),
                default: "Main".into(),
            },
            ReportError::Store(StoreError::Unavailable("down".into())),
        ];
        for err in errors {
            let status = err.http_status_code();
            let message = err.to_string();
            let app: AppError = err.into();
            assert_eq!(app.status_code(), status);
            assert!(app.to_string().contains(&message));
        }
    }
}
