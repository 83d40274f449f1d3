// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_taxonomy_dump(breadth: usize, depth: usize) -> String {
    let mut content = String::from("Taxonomic tree for benchmarks\n────────────────────\n");
    content.push_str("root (1) [no rank]\n");
    let mut next_id = 2;
    generate_level(&mut content, &mut next_id, breadth, depth, 1);
    content
}

#[allow(dead_code)]
fn generate_level(
    content: &mut String,
    next_id: &mut usize,
    breadth: usize,
    remaining_depth: usize,
    level: usize,
) {
    if remaining_depth == 0 {
        return;
    }

    for i in 0..breadth {
        let id = *next_id;
        *next_id += 1;
        let indent = "│   ".repeat(level);
        let connector = if i + 1 == breadth { "└── " } else { "├── " };
        content.push_str(&format!(
            "{indent}{connector}Taxon {level}-{i} ({id}) [rank{level}] [Group name: group {id}]\n"
        ));
        generate_level(content, next_id, breadth, remaining_depth - 1, level + 1);
    }
}
