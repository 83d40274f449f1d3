use ratatui::widgets::ListState;
use taxonomy_tree_engine::{
    ExpansionState, ParseReport, SearchOutcome, TaxonomyNode, TreeItem, search, visible_items,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
}

/// Viewer state: the parsed tree plus everything the UI owns about it.
pub struct App {
    pub root: TaxonomyNode,
    pub expansion: ExpansionState,
    pub outcome: SearchOutcome,
    pub query: String,
    pub mode: InputMode,
    pub list_state: ListState,
    pub skipped_lines: usize,
    pub orphaned_lines: usize,
}

impl App {
    pub fn new(report: ParseReport) -> Self {
        let expansion = ExpansionState::root_only(&report.root);
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            root: report.root,
            expansion,
            outcome: SearchOutcome::Cleared,
            query: String::new(),
            mode: InputMode::Browse,
            list_state,
            skipped_lines: report.skipped_lines.len(),
            orphaned_lines: report.orphaned_lines.len(),
        }
    }

    /// Rows currently visible, in display order
    pub fn items(&self) -> Vec<TreeItem<'_>> {
        visible_items(&self.root, &self.expansion, self.outcome.matched())
    }

    pub fn selected_node(&self) -> Option<&TaxonomyNode> {
        let index = self.list_state.selected()?;
        self.items().get(index).map(|item| item.node)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_node().map(|node| node.id().to_string())
    }

    pub fn next(&mut self) {
        let len = self.items().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.items().len();
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.expansion.toggle(&id);
            self.reselect(&id);
        }
    }

    pub fn expand_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.expansion.expand(&id);
            self.reselect(&id);
        }
    }

    pub fn collapse_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.expansion.collapse(&id);
            self.reselect(&id);
        }
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.run_search();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.run_search();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.run_search();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.run_search();
    }

    /// Re-run the query and fold the result into the expansion state.
    ///
    /// Selection follows the first match when there is one, otherwise it
    /// stays on the previously selected node.
    fn run_search(&mut self) {
        let previous = self.selected_id();
        self.outcome = search(&self.root, &self.query);
        self.expansion.apply(&self.outcome, &self.root);

        let first_match = self
            .items()
            .iter()
            .find(|item| item.is_match)
            .map(|item| item.node.id().to_string());

        match first_match.or(previous) {
            Some(id) => self.reselect(&id),
            None => self.list_state.select(Some(0)),
        }
    }

    /// Point the selection at `id`, or at the root if it is no longer visible
    fn reselect(&mut self, id: &str) {
        let index = self
            .items()
            .iter()
            .position(|item| item.node.id() == id)
            .unwrap_or(0);
        self.list_state.select(Some(index));
    }
}
