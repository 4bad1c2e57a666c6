//! Parent/child trees for cost centers and dimension records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One record of a tree-structured document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Record name.
    pub name: String,
    /// Parent record, `None` for a root.
    #[serde(default)]
    pub parent: Option<String>,
}

impl TreeNode {
    /// Creates a node.
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
        }
    }
}

/// Child index over a set of tree nodes.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    children: BTreeMap<String, Vec<String>>,
}

impl Tree {
    /// Indexes `nodes`; children keep their input order.
    pub fn new(nodes: &[TreeNode]) -> Self {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for node in nodes {
            children.entry(node.name.clone()).or_default();
            if let Some(parent) = &node.parent {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(node.name.clone());
            }
        }
        Self { children }
    }

    /// Returns true if `name` is a node of the tree.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Returns `name` and all its descendants in pre-order.
    ///
    /// Unknown names yield an empty list.
    #[must_use]
    pub fn with_descendants(&self, name: &str) -> Vec<String> {
        if !self.contains(name) {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut stack = vec![name.to_string()];
        while let Some(current) = stack.pop() {
            if out.contains(&current) {
                continue;
            }
            if let Some(children) = self.children.get(&current) {
                stack.extend(children.iter().rev().cloned());
            }
            out.push(current);
        }
        out
    }
}
