use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Display-friendly split of a node's stored name.
///
/// Computed on demand from `name`, never stored on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLabel {
    /// Text before ` (<id>)`
    pub display_name: String,
    pub id: String,
    /// First bracketed annotation that is not a `Group name:` entry
    pub rank: Option<String>,
    /// Text inside `[Group name: ...]`
    pub group_name: Option<String>,
}

impl NodeLabel {
    /// Project a stored name such as `Felis catus (9685) [species] [Group name: cat]`
    pub fn from_name(name: &str) -> Self {
        static NAME_ID: OnceLock<Regex> = OnceLock::new();
        static RANK: OnceLock<Regex> = OnceLock::new();
        static GROUP: OnceLock<Regex> = OnceLock::new();

        let name_id = NAME_ID
            .get_or_init(|| Regex::new(r"^(.+?)\s*\(([0-9]+)\)").expect("Invalid name regex"));
        let rank = RANK.get_or_init(|| Regex::new(r"\[([^\]:]+?)\]").expect("Invalid rank regex"));
        let group = GROUP
            .get_or_init(|| Regex::new(r"\[Group name: ([^\]]+)\]").expect("Invalid group regex"));

        let (display_name, id) = name_id
            .captures(name)
            .map(|caps| (caps[1].trim().to_string(), caps[2].to_string()))
            .unwrap_or_default();

        Self {
            display_name,
            id,
            rank: rank.captures(name).map(|caps| caps[1].to_string()),
            group_name: group.captures(name).map(|caps| caps[1].to_string()),
        }
    }
}
