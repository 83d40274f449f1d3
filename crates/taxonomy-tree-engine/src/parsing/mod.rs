pub mod builder;
pub mod classify;
pub mod content;

#[cfg(test)]
mod tests;

use crate::models::{DEFAULT_X_COORD, TaxonomyNode};

use builder::TreeBuilder;
use classify::{LineClass, TaxonomyLineClassifier, detect_indent_width};
use content::parse_content_line;

/// Indent unit of the reference dumps
pub const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed input: no line yields a taxonomy node")]
    MalformedInput,
    #[error("Invalid indent width: {0}")]
    InvalidIndentWidth(usize),
}

/// How many leading characters make up one tree level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentWidth {
    Fixed(usize),
    /// Infer the unit from the indented lines of the input
    Detect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub indent: IndentWidth,
    pub default_x_coord: u32,
    /// Lines starting with any of these are headers and carry no node
    pub header_prefixes: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            indent: IndentWidth::Fixed(DEFAULT_INDENT_WIDTH),
            default_x_coord: DEFAULT_X_COORD,
            header_prefixes: vec!["Taxonomic".to_string()],
        }
    }
}

/// Parsed tree plus the diagnostics a caller may want to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub root: TaxonomyNode,
    /// Indent width actually used, after detection
    pub indent_width: usize,
    /// 1-based lines that looked like content but had no `name (id)`
    pub skipped_lines: Vec<usize>,
    /// 1-based lines that parsed but fell outside the tree: a depth-0 line
    /// after the root, and every line following it
    pub orphaned_lines: Vec<usize>,
}

/// Parse a taxonomy dump with the default options.
pub fn parse_taxonomy(text: &str) -> Result<TaxonomyNode, ParseError> {
    parse_taxonomy_with(text, &ParseOptions::default())
}

pub fn parse_taxonomy_with(text: &str, options: &ParseOptions) -> Result<TaxonomyNode, ParseError> {
    parse_taxonomy_report(text, options).map(|report| report.root)
}

/// Parse a whole dump into a tree.
///
/// Blank, rule and header lines are dropped. Lines that do not match
/// `<name> (<digits>)` are skipped without affecting the tree. Fails with
/// [`ParseError::MalformedInput`] only when no line yields a node.
pub fn parse_taxonomy_report(
    text: &str,
    options: &ParseOptions,
) -> Result<ParseReport, ParseError> {
    let classifier = TaxonomyLineClassifier::new(&options.header_prefixes);
    let lines: Vec<LineClass<'_>> = text
        .lines()
        .enumerate()
        .map(|(index, raw)| classifier.classify(index + 1, raw))
        .filter(LineClass::is_candidate)
        .collect();

    let indent_width = match options.indent {
        IndentWidth::Fixed(0) => return Err(ParseError::InvalidIndentWidth(0)),
        IndentWidth::Fixed(width) => width,
        IndentWidth::Detect => detect_indent_width(&lines, DEFAULT_INDENT_WIDTH),
    };

    let mut builder = TreeBuilder::new();
    let mut skipped_lines = Vec::new();

    for line in &lines {
        let Some(content) = parse_content_line(line.content) else {
            log::debug!("line {}: skipping unparseable '{}'", line.number, line.content);
            skipped_lines.push(line.number);
            continue;
        };

        let node = TaxonomyNode::new(
            content.id,
            content.name,
            line.depth(indent_width),
            content.x_hint.unwrap_or(options.default_x_coord),
        );
        builder.push(line.number, node);
    }

    let (root, orphaned_lines) = builder.finish();
    let root = root.ok_or(ParseError::MalformedInput)?;

    for id in root.duplicate_ids() {
        log::warn!("taxonomy id {id} appears on more than one node; lookups return the first");
    }

    Ok(ParseReport {
        root,
        indent_width,
        skipped_lines,
        orphaned_lines,
    })
}
