/// Vertical bar used by tree dumps to continue a branch past a sibling
const VERTICAL_BAR: char = '│';
/// Horizontal rule character used both in connectors and in separator lines
const HORIZONTAL_RULE: char = '─';

/// What a line is, judged only from its own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Whitespace only
    Blank,
    /// A separator made of `─` characters
    Rule,
    /// A known header label such as `Taxonomic tree ...`
    Header,
    /// May carry a node; content parsing decides
    Candidate,
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of parsing: each line is classified independently
/// without reference to surrounding lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass<'a> {
    /// 1-based line number in the source text
    pub number: usize,
    pub kind: LineKind,
    /// Count of leading whitespace and `│` characters, in chars
    pub prefix_len: usize,
    /// Text after stripping indentation and connector glyphs, trimmed
    pub content: &'a str,
}

impl LineClass<'_> {
    pub fn is_candidate(&self) -> bool {
        self.kind == LineKind::Candidate
    }

    /// Depth for a given indent width. `indent_width` must be non-zero.
    pub fn depth(&self, indent_width: usize) -> usize {
        self.prefix_len / indent_width
    }
}

/// Classifies individual lines of a taxonomy dump.
pub struct TaxonomyLineClassifier<'p> {
    header_prefixes: &'p [String],
}

impl<'p> TaxonomyLineClassifier<'p> {
    pub fn new(header_prefixes: &'p [String]) -> Self {
        Self { header_prefixes }
    }

    /// Classifies a line into a [`LineClass`].
    ///
    /// `raw` must not contain the line terminator.
    pub fn classify<'a>(&self, number: usize, raw: &'a str) -> LineClass<'a> {
        let trimmed = raw.trim();
        let prefix_len = raw
            .chars()
            .take_while(|c| c.is_whitespace() || *c == VERTICAL_BAR)
            .count();
        let content = raw.trim_start_matches(is_tree_glyph).trim();

        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if raw.starts_with(HORIZONTAL_RULE)
            || trimmed.chars().all(|c| c == HORIZONTAL_RULE)
        {
            LineKind::Rule
        } else if self
            .header_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && raw.starts_with(prefix.as_str()))
        {
            LineKind::Header
        } else {
            LineKind::Candidate
        };

        LineClass {
            number,
            kind,
            prefix_len,
            content,
        }
    }
}

fn is_tree_glyph(c: char) -> bool {
    c.is_whitespace() || matches!(c, '│' | '├' | '└' | '─')
}

/// Guess the indent unit from the indented lines of a dump.
///
/// Uses the greatest common divisor of all non-zero prefix lengths, falling
/// back to `fallback` when nothing is indented.
pub fn detect_indent_width(lines: &[LineClass<'_>], fallback: usize) -> usize {
    lines
        .iter()
        .filter(|line| line.is_candidate())
        .map(|line| line.prefix_len)
        .filter(|len| *len > 0)
        .reduce(gcd)
        .unwrap_or(fallback)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}
