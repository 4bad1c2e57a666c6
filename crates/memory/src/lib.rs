//! In-memory collaborators for Ledgerbal.
//!
//! This crate provides:
//! - `MemoryStore`, implementing every collaborator trait of `ledgerbal_core::store`
//! - A chart builder that assigns nested-set bounds from parent links
//! - Generic parent/child trees for cost centers and dimension records
//! - JSON dataset loading

pub mod chart;
pub mod dataset;
pub mod store;
pub mod tree;

pub use chart::{AccountSpec, build_chart};
pub use dataset::{CompanyRecord, Dataset, DatasetError, DimensionSpec};
pub use store::MemoryStore;
pub use tree::{Tree, TreeNode};
