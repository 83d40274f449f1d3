use std::collections::BTreeSet;

use anyhow::Result;
use taxonomy_tree_engine::{ExpansionState, SearchOutcome, TaxonomyNode, TreeItem, visible_items};

/// Text outline of the rows a viewer would show for `query`.
///
/// Expanded nodes are marked `▾`, collapsed ones `▸`, matches get a trailing `*`.
pub fn render_text(root: &TaxonomyNode, outcome: &SearchOutcome) -> String {
    let mut expansion = ExpansionState::root_only(root);
    expansion.apply(outcome, root);

    visible_items(root, &expansion, outcome.matched())
        .iter()
        .map(render_row)
        .collect()
}

fn render_row(item: &TreeItem<'_>) -> String {
    let marker = match (item.has_children, item.is_expanded) {
        (false, _) => ' ',
        (true, true) => '▾',
        (true, false) => '▸',
    };
    let hit = if item.is_match { " *" } else { "" };
    format!(
        "{}{marker} {}{hit}\n",
        "  ".repeat(item.depth),
        item.node.name()
    )
}

/// Whole tree plus search sets as pretty JSON
pub fn render_json(root: &TaxonomyNode, outcome: &SearchOutcome) -> Result<String> {
    let ids = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>();
    let value = serde_json::json!({
        "matched": ids(outcome.matched()),
        "to_expand": ids(outcome.to_expand()),
        "tree": root,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
