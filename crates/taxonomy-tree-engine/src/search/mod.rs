use std::collections::BTreeSet;

use crate::models::TaxonomyNode;

static NO_IDS: BTreeSet<String> = BTreeSet::new();

/// Matched node ids and the ids that must be expanded to reveal them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub matched: BTreeSet<String>,
    /// Every node on a root-to-match path, matches included
    pub to_expand: BTreeSet<String>,
}

/// Result of running a query over a tree.
///
/// `Cleared` and `NoMatches` both carry empty sets but ask for different
/// things: a cleared query resets expansion to the root, while a query with
/// no matches must leave expansion untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Cleared,
    NoMatches,
    Matches(SearchHits),
}

impl SearchOutcome {
    pub fn matched(&self) -> &BTreeSet<String> {
        match self {
            Self::Matches(hits) => &hits.matched,
            Self::Cleared | Self::NoMatches => &NO_IDS,
        }
    }

    pub fn to_expand(&self) -> &BTreeSet<String> {
        match self {
            Self::Matches(hits) => &hits.to_expand,
            Self::Cleared | Self::NoMatches => &NO_IDS,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matched().len()
    }
}

/// Case-insensitive substring search over every node's full name.
///
/// An empty query yields [`SearchOutcome::Cleared`].
pub fn search(root: &TaxonomyNode, query: &str) -> SearchOutcome {
    if query.is_empty() {
        return SearchOutcome::Cleared;
    }

    let needle = query.to_lowercase();
    let mut hits = SearchHits::default();
    let mut path = Vec::new();
    collect_matches(root, &needle, &mut path, &mut hits);

    if hits.matched.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(hits)
    }
}

fn collect_matches<'a>(
    node: &'a TaxonomyNode,
    needle: &str,
    path: &mut Vec<&'a str>,
    hits: &mut SearchHits,
) {
    path.push(node.id());

    if node.name().to_lowercase().contains(needle) {
        hits.matched.insert(node.id().to_string());
        hits.to_expand.extend(path.iter().map(|id| (*id).to_string()));
    }

    for child in node.children() {
        collect_matches(child, needle, path, hits);
    }

    path.pop();
}
