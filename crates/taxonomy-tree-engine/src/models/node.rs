use serde::Serialize;
use std::collections::BTreeMap;

use super::label::NodeLabel;

/// Position hint used when a line carries no `{x: Npx}` marker
pub const DEFAULT_X_COORD: u32 = 20;

/// One taxonomic entry parsed from a single line of the dump.
///
/// Children are owned by their parent and kept in source order. The node
/// carries no UI state; expansion and match highlighting live in
/// [`ExpansionState`](super::ExpansionState) and
/// [`SearchOutcome`](crate::search::SearchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyNode {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) x_coord: u32,
    pub(crate) children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, depth: usize, x_coord: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            depth,
            x_coord,
            children: Vec::new(),
        }
    }

    /// Numeric taxonomy id, as text
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full label as found on the line, including bracketed annotations
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indentation level inferred from the source line
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pixel offset hint for renderers
    pub fn x_coord(&self) -> u32 {
        self.x_coord
    }

    pub fn children(&self) -> &[TaxonomyNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push_child(&mut self, child: TaxonomyNode) {
        self.children.push(child);
    }

    /// Derived display projection of [`name`](Self::name)
    pub fn label(&self) -> NodeLabel {
        NodeLabel::from_name(&self.name)
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth-first pre-order traversal of this subtree
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// First node in pre-order with the given id.
    ///
    /// Ids are assumed unique; when they are not, the earliest node in source
    /// order is returned. See [`duplicate_ids`](Self::duplicate_ids).
    pub fn find(&self, id: &str) -> Option<&TaxonomyNode> {
        self.walk().find(|node| node.id == id)
    }

    /// Ids from `self` down to the first node with the given id, inclusive
    pub fn path_to(&self, id: &str) -> Option<Vec<&str>> {
        if self.id == id {
            return Some(vec![self.id.as_str()]);
        }

        for child in &self.children {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self.id.as_str());
                return Some(path);
            }
        }
        None
    }

    /// Ids that appear on more than one node, sorted
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for node in self.walk() {
            *counts.entry(node.id.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Pre-order iterator returned by [`TaxonomyNode::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a TaxonomyNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TaxonomyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
