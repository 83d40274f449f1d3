//! Tests for the whole parsing pipeline: classification, content extraction
//! and tree assembly working together.


use pretty_assertions::assert_eq;

use crate::models::TaxonomyNode;
use crate::parsing::{
    IndentWidth, ParseError, ParseOptions, parse_taxonomy, parse_taxonomy_report,
    parse_taxonomy_with,
};

const FELIDAE: &str = "\
Taxonomic tree for Felidae
────────────────────────────
Felidae (9681) [family]
│   ├── Felinae (338152) [subfamily]
│   │   ├── Felis (9682) [genus]
│   │   │   └── Felis catus (9685) [species] [Group name: domestic cat]
│   │   └── Lynx (13124) [genus]
│   └── Pantherinae (338153) [subfamily]
│       └── Panthera (9688) [genus]
│           ├── Panthera leo (9689) [species] [Group name: lion]
│           └── Panthera tigris (9694) [species] {x: 140px}
";

fn ids(node: &TaxonomyNode) -> Vec<&str> {
    node.walk().map(TaxonomyNode::id).collect()
}

fn child_ids(node: &TaxonomyNode) -> Vec<&str> {
    node.children().iter().map(TaxonomyNode::id).collect()
}

#[test]
fn parses_glyph_tree() {
    let root = parse_taxonomy(FELIDAE).unwrap();
    invariants::check(&root);

    assert_eq!(root.id(), "9681");
    assert_eq!(root.name(), "Felidae (9681) [family]");
    assert_eq!(root.node_count(), 9);
    assert_eq!(child_ids(&root), vec!["338152", "338153"]);

    let felinae = root.find("338152").unwrap();
    assert_eq!(child_ids(felinae), vec!["9682", "13124"]);
    assert_eq!(felinae.depth(), 1);

    let cat = root.find("9685").unwrap();
    assert_eq!(cat.depth(), 3);
    assert_eq!(
        cat.name(),
        "Felis catus (9685) [species] [Group name: domestic cat]"
    );
}

#[test]
fn every_parseable_line_becomes_one_node() {
    let root = parse_taxonomy(FELIDAE).unwrap();
    let expected_ids: Vec<&str> = FELIDAE
        .lines()
        .filter_map(|line| {
            let open = line.find(" (")?;
            let close = line[open..].find(')')? + open;
            Some(&line[open + 2..close])
        })
        .collect();

    assert_eq!(ids(&root), expected_ids);
}

#[test]
fn position_hint_and_default() {
    let root = parse_taxonomy(FELIDAE).unwrap();
    let tiger = root.find("9694").unwrap();
    assert_eq!(tiger.x_coord(), 140);
    assert_eq!(tiger.name(), "Panthera tigris (9694) [species]");
    assert_eq!(root.find("9689").unwrap().x_coord(), 20);
}

#[test]
fn example_tree_from_plain_indentation() {
    let root = parse_taxonomy("A (1)\n    B (2)\n    C (3)\n        D (4)\n").unwrap();
    invariants::check(&root);

    assert_eq!(child_ids(&root), vec!["2", "3"]);
    assert_eq!(child_ids(&root.children()[1]), vec!["4"]);
}

#[test]
fn stray_lines_are_skipped_without_breaking_structure() {
    let text = "\
Root (1)
    Child (2)
    -- stray separator --
        Grandchild (3)
    note: see appendix
    Sibling (4)
";
    let report = parse_taxonomy_report(text, &ParseOptions::default()).unwrap();
    invariants::check(&report.root);

    assert_eq!(report.skipped_lines, vec![3, 5]);
    assert!(report.orphaned_lines.is_empty());
    assert_eq!(child_ids(&report.root), vec!["2", "4"]);
    assert_eq!(child_ids(&report.root.children()[0]), vec!["3"]);
}

#[test]
fn depth_jump_attaches_to_nearest_preceding_node() {
    let text = "\
Root (1)
    Child (2)
                    Deep (3)
        Normal (4)
";
    let root = parse_taxonomy(text).unwrap();
    invariants::check(&root);

    let child = root.find("2").unwrap();
    assert_eq!(child_ids(child), vec!["3", "4"]);
    assert_eq!(root.find("3").unwrap().depth(), 5);
    assert_eq!(root.node_count(), 4);
}

#[test]
fn leading_unparseable_line_does_not_become_root() {
    let root = parse_taxonomy("Cellular organisms\nRoot (1)\n    Child (2)\n").unwrap();
    assert_eq!(root.id(), "1");
    assert_eq!(child_ids(&root), vec!["2"]);
}

#[test]
fn ids_must_be_ascii_digits() {
    let text = "Root (1)\n    Felis (\u{0661}\u{0662})\n    Lynx (13124)\n";
    let report = parse_taxonomy_report(text, &ParseOptions::default()).unwrap();

    assert_eq!(ids(&report.root), vec!["1", "13124"]);
    assert_eq!(report.skipped_lines, vec![2]);
}

#[test]
fn crlf_line_endings() {
    let root = parse_taxonomy("Root (1)\r\n    Child (2)\r\n").unwrap();
    assert_eq!(root.name(), "Root (1)");
    assert_eq!(root.children()[0].name(), "Child (2)");
}

#[test]
fn empty_and_decorative_input_is_malformed() {
    let inputs = [
        "",
        "\n\n   \n",
        "Taxonomic tree\n──────────\n",
        "no ids anywhere\n    still none\n",
    ];
    for input in inputs {
        assert_eq!(parse_taxonomy(input), Err(ParseError::MalformedInput), "{input:?}");
    }
}

#[test]
fn orphans_after_root_are_reported() {
    let text = "Root (1)\n    Child (2)\nOther root (3)\n    Other child (4)\n";
    let report = parse_taxonomy_report(text, &ParseOptions::default()).unwrap();

    assert_eq!(ids(&report.root), vec!["1", "2"]);
    assert_eq!(report.orphaned_lines, vec![3, 4]);
}

#[test]
fn indented_root_keeps_same_indent_children() {
    let report = parse_taxonomy_report("    Root (1)\n    Child (2)\n", &ParseOptions::default())
        .unwrap();
    invariants::check(&report.root);

    assert_eq!(report.root.depth(), 1);
    assert_eq!(ids(&report.root), vec!["1", "2"]);
    assert!(report.orphaned_lines.is_empty());
}

#[test]
fn indented_glyph_root_keeps_whole_tree() {
    let text = "\
    Felidae (9681) [family]
│   ├── Felinae (338152) [subfamily]
│   │   └── Felis (9682) [genus]
│   └── Pantherinae (338153) [subfamily]
";
    let root = parse_taxonomy(text).unwrap();
    invariants::check(&root);

    assert_eq!(root.node_count(), 4);
    assert_eq!(child_ids(&root), vec!["338152", "338153"]);
    assert_eq!(child_ids(&root.children()[0]), vec!["9682"]);
}

#[test]
fn custom_indent_width() {
    let text = "Root (1)\n  Child (2)\n    Grandchild (3)\n";
    let options = ParseOptions {
        indent: IndentWidth::Fixed(2),
        ..ParseOptions::default()
    };
    let root = parse_taxonomy_with(text, &options).unwrap();
    assert_eq!(root.find("3").unwrap().depth(), 2);
    assert_eq!(root.children()[0].children()[0].id(), "3");

    // Under the default width Child lands at depth 0 and starts a second
    // top-level tree, so it and everything after it are left out.
    let report = parse_taxonomy_report(text, &ParseOptions::default()).unwrap();
    assert_eq!(report.root.node_count(), 1);
    assert_eq!(report.orphaned_lines, vec![2, 3]);
}

#[test]
fn detected_indent_width() {
    let text = "Root (1)\n  Child (2)\n    Grandchild (3)\n  Sibling (4)\n";
    let options = ParseOptions {
        indent: IndentWidth::Detect,
        ..ParseOptions::default()
    };
    let report = parse_taxonomy_report(text, &options).unwrap();
    invariants::check(&report.root);

    assert_eq!(report.indent_width, 2);
    assert_eq!(child_ids(&report.root), vec!["2", "4"]);
}

#[test]
fn zero_indent_width_is_rejected() {
    let options = ParseOptions {
        indent: IndentWidth::Fixed(0),
        ..ParseOptions::default()
    };
    assert_eq!(
        parse_taxonomy_with("Root (1)", &options),
        Err(ParseError::InvalidIndentWidth(0))
    );
}

#[test]
fn custom_header_prefixes_and_default_x() {
    let text = "Lineage report\nRoot (1)\n    Child (2) {x: 60px}\n";
    let options = ParseOptions {
        header_prefixes: vec!["Lineage".to_string()],
        default_x_coord: 8,
        ..ParseOptions::default()
    };
    let report = parse_taxonomy_report(text, &options).unwrap();

    assert!(report.skipped_lines.is_empty());
    assert_eq!(report.root.x_coord(), 8);
    assert_eq!(report.root.children()[0].x_coord(), 60);
}
