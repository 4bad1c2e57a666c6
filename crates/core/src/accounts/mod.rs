//! Chart of accounts: domain types, subtree loading, and hierarchy indexing.
//!
//! # Pipeline
//!
//! ```text
//! company accounts ──▶ loader (subtree, lft order) ──▶ hierarchy (pre-order, indent)
//! ```
//!
//! Forward order of the hierarchy is a pre-order walk of the tree, so
//! iterating it in reverse visits every child before its parent.

pub mod hierarchy;
pub mod loader;
pub mod types;

pub use hierarchy::{AccountHierarchy, HierarchyNode, MAX_DEPTH};
pub use loader::{LoadedChart, SubtreeRoot, load_chart};
pub use types::{Account, BalanceSide, NestedSetBounds, ReportType, RootType};
