use crate::models::TaxonomyNode;

/// Assembles parsed nodes into a tree using an explicit depth stack.
///
/// The first node pushed becomes the root and sits on the stack at depth 0,
/// whatever its own indentation. Each later node closes every open node at the
/// same or greater depth, then opens beneath whatever is left on top. Closing a
/// node moves it into its parent's children, so source order is preserved.
pub struct TreeBuilder {
    open: Vec<TaxonomyNode>,
    root: Option<TaxonomyNode>,
    orphaned_lines: Vec<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            open: vec![],
            root: None,
            orphaned_lines: vec![],
        }
    }

    /// Add the node parsed from source line `line`.
    pub fn push(&mut self, line: usize, node: TaxonomyNode) {
        if self.root.is_some() {
            self.orphan(line, &node);
            return;
        }

        while let Some(top_depth) = self.top_depth()
            && top_depth >= node.depth()
        {
            self.close_top();
        }

        // Only a depth-0 line can pop the root, and nothing after it can be
        // reached from the tree.
        if self.root.is_some() {
            self.orphan(line, &node);
            return;
        }

        self.open.push(node);
    }

    /// Close every open node and return the root, if any node was pushed,
    /// along with the source lines that could not be attached.
    pub fn finish(mut self) -> (Option<TaxonomyNode>, Vec<usize>) {
        while !self.open.is_empty() {
            self.close_top();
        }
        (self.root, self.orphaned_lines)
    }

    /// Stack depth of the innermost open node. The root counts as 0.
    fn top_depth(&self) -> Option<usize> {
        match self.open.len() {
            0 => None,
            1 => Some(0),
            _ => self.open.last().map(TaxonomyNode::depth),
        }
    }

    fn close_top(&mut self) {
        let Some(done) = self.open.pop() else {
            return;
        };
        match self.open.last_mut() {
            Some(parent) => parent.push_child(done),
            None => self.root = Some(done),
        }
    }

    fn orphan(&mut self, line: usize, node: &TaxonomyNode) {
        log::warn!(
            "line {line}: '{}' starts a second top-level tree and was left out",
            node.name()
        );
        self.orphaned_lines.push(line);
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
