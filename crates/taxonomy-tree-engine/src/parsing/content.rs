use regex::Regex;
use std::sync::OnceLock;

/// Fields extracted from the content part of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// The digit group inside `(...)`
    pub id: String,
    /// Everything left after removing position hints, including annotations
    pub name: String,
    /// Value of the first `{x: Npx}` hint, if present and in range
    pub x_hint: Option<u32>,
}

/// Parse the content of a single line, after indentation and connectors
/// have been stripped.
///
/// Returns `None` when the content does not start with `<name> (<digits>)`.
pub fn parse_content_line(content: &str) -> Option<ContentLine> {
    static X_HINT: OnceLock<Regex> = OnceLock::new();
    static NAME_ID: OnceLock<Regex> = OnceLock::new();

    let x_hint_re =
        X_HINT.get_or_init(|| Regex::new(r"\{x:\s*([0-9]+)px\}").expect("Invalid x hint regex"));
    let name_id_re =
        NAME_ID.get_or_init(|| Regex::new(r"^(.+?)\s*\(([0-9]+)\)").expect("Invalid name regex"));

    let x_hint = x_hint_re.captures(content).and_then(|caps| {
        let digits = &caps[1];
        match digits.parse::<u32>() {
            Ok(x) => Some(x),
            Err(_) => {
                log::debug!("ignoring out of range position hint {{x: {digits}px}}");
                None
            }
        }
    });

    let name = x_hint_re.replace_all(content, "");
    let name = name.trim();

    let caps = name_id_re.captures(name)?;
    Some(ContentLine {
        id: caps[2].to_string(),
        name: name.to_string(),
        x_hint,
    })
}
