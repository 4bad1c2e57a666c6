//! Core business logic for Ledgerbal.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every read goes through the collaborator traits in [`store`].
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts loading and hierarchy indexing
//! - `ledger` - GL entries, closing snapshots, and balance accumulators
//! - `currency` - Exchange rates and presentation-currency conversion
//! - `fiscal` - Period closing vouchers
//! - `dimension` - Cost center, project, finance book, and dimension filtering
//! - `reports` - The account balance report pipeline
//! - `workflow` - Journal-entry approval and the depreciation batch approver
//! - `store` - Collaborator interfaces

pub mod accounts;
pub mod currency;
pub mod dimension;
pub mod fiscal;
pub mod ledger;
pub mod reports;
pub mod store;
pub mod workflow;
