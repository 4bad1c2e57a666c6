//! Hierarchy indexing and bottom-up roll-up.
//!
//! The hierarchy owns one [`BalanceRow`] per listed account. Accumulators
//! start at zero and are rolled up into parents exactly once.

use std::collections::{BTreeMap, HashMap};

use super::loader::LoadedChart;
use super::types::Account;
use crate::ledger::BalanceRow;

/// Deepest indent level listed; accounts nested deeper are dropped.
pub const MAX_DEPTH: usize = 20;

/// One listed account with its depth and balance accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    /// The account.
    pub account: Account,
    /// Parent used for this run; `None` for roots and the subtree root.
    pub parent: Option<String>,
    /// Depth below the nearest root.
    pub indent: usize,
    /// Balance accumulator.
    pub balance: BalanceRow,
}

/// Indented pre-order listing of a chart with parent/child lookups.
#[derive(Debug, Clone)]
pub struct AccountHierarchy {
    nodes: Vec<HierarchyNode>,
    index: HashMap<String, usize>,
    children: BTreeMap<String, Vec<String>>,
    subtree_root: Option<String>,
    rolled_up: bool,
}

impl AccountHierarchy {
    /// Indexes a loaded chart.
    ///
    /// The subtree root, when present, is listed as a root for this run.
    #[must_use]
    pub fn build(chart: &LoadedChart) -> Self {
        let subtree_root = chart.subtree.as_ref().map(|root| root.name.clone());

        let mut by_parent: HashMap<Option<&str>, Vec<&Account>> = HashMap::new();
        for account in &chart.accounts {
            let parent = if subtree_root.as_deref() == Some(account.name.as_str()) {
                None
            } else {
                account.parent_account.as_deref()
            };
            by_parent.entry(parent).or_default().push(account);
        }

        let mut nodes = Vec::with_capacity(chart.accounts.len());
        list_children(&by_parent, None, 0, &mut nodes);

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.account.name.clone(), i))
            .collect();

        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in &nodes {
            if let Some(parent) = &node.parent {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.account.name.clone());
            }
        }

        Self {
            nodes,
            index,
            children,
            subtree_root,
            rolled_up: false,
        }
    }

    /// Returns the listed accounts in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    /// Returns the listed accounts in pre-order, mutably.
    pub fn nodes_mut(&mut self) -> &mut [HierarchyNode] {
        &mut self.nodes
    }

    /// Returns the number of listed accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a listed account by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HierarchyNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// Returns the listing position of `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the direct children of `name`, in listing order.
    #[must_use]
    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `name` has listed children.
    #[must_use]
    pub fn has_children(&self, name: &str) -> bool {
        !self.children_of(name).is_empty()
    }

    /// Returns the nodes listed without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter().filter(|node| node.parent.is_none())
    }

    /// Returns the subtree root, if the chart was restricted.
    #[must_use]
    pub fn subtree_root(&self) -> Option<&str> {
        self.subtree_root.as_deref()
    }

    /// Adds each node's balance into its parent, leaves first.
    ///
    /// Runs at most once; later calls are no-ops so a parent never counts a
    /// child twice.
    pub fn roll_up(&mut self) {
        if self.rolled_up {
            return;
        }
        for i in (0..self.nodes.len()).rev() {
            let Some(parent) = self.nodes[i].parent.as_deref() else {
                continue;
            };
            let Some(&parent_index) = self.index.get(parent) else {
                continue;
            };
            let child = self.nodes[i].balance;
            self.nodes[parent_index].balance += &child;
        }
        self.rolled_up = true;
    }

    /// Returns the field-wise sum of all parentless nodes.
    #[must_use]
    pub fn root_total(&self) -> BalanceRow {
        let mut total = BalanceRow::zero();
        for root in self.roots() {
            total += &root.balance;
        }
        total
    }
}

fn list_children(
    by_parent: &HashMap<Option<&str>, Vec<&Account>>,
    parent: Option<&str>,
    level: usize,
    out: &mut Vec<HierarchyNode>,
) {
    if level >= MAX_DEPTH {
        return;
    }
    let Some(children) = by_parent.get(&parent) else {
        return;
    };
    for child in children {
        out.push(HierarchyNode {
            account: (*child).clone(),
            parent: parent.map(str::to_string),
            indent: level,
            balance: BalanceRow::zero(),
        });
        list_children(by_parent, Some(child.name.as_str()), level + 1, out);
    }
}
