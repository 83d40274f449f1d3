use std::collections::BTreeSet;

use super::node::TaxonomyNode;
use crate::search::SearchOutcome;

/// Which nodes currently show their children.
///
/// Owned by the caller (the UI), not by the tree. Search results are folded
/// in with [`apply`](Self::apply).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

impl ExpansionState {
    /// Initial state after a load: only the root is open
    pub fn root_only(root: &TaxonomyNode) -> Self {
        Self {
            expanded: BTreeSet::from([root.id().to_string()]),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip a node between expanded and collapsed; returns the new state
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    pub fn expanded_ids(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    /// Fold a search result into the expansion state.
    ///
    /// A cleared query resets to root-only, a query with no matches leaves the
    /// state exactly as it was, and matches replace the state with the
    /// root-to-match paths.
    pub fn apply(&mut self, outcome: &SearchOutcome, root: &TaxonomyNode) {
        match outcome {
            SearchOutcome::Cleared => *self = Self::root_only(root),
            SearchOutcome::NoMatches => {}
            SearchOutcome::Matches(hits) => self.expanded = hits.to_expand.clone(),
        }
    }
}

/// One visible row of the tree, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem<'a> {
    pub node: &'a TaxonomyNode,
    /// Distance from the root, independent of the source indentation
    pub depth: usize,
    pub is_expanded: bool,
    pub has_children: bool,
    pub is_match: bool,
}

/// Flatten the tree into the rows a renderer should show.
///
/// A node is listed when every ancestor is expanded. The root is always listed.
pub fn visible_items<'a>(
    root: &'a TaxonomyNode,
    expansion: &ExpansionState,
    matched: &BTreeSet<String>,
) -> Vec<TreeItem<'a>> {
    let mut items = Vec::new();
    collect_visible(root, 0, expansion, matched, &mut items);
    items
}

fn collect_visible<'a>(
    node: &'a TaxonomyNode,
    depth: usize,
    expansion: &ExpansionState,
    matched: &BTreeSet<String>,
    items: &mut Vec<TreeItem<'a>>,
) {
    let is_expanded = expansion.is_expanded(node.id());
    items.push(TreeItem {
        node,
        depth,
        is_expanded,
        has_children: !node.is_leaf(),
        is_match: matched.contains(node.id()),
    });

    if is_expanded {
        for child in node.children() {
            collect_visible(child, depth + 1, expansion, matched, items);
        }
    }
}
