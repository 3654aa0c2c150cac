// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* content.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_asciidoc_content(size: usize) -> String {
    let mut content = String::from("= Title\n:product: Widget\n\n");
    for section in 0..size {
        content.push_str(&format!("== Section {section}\n\n"));
        content.push_str("Paragraph about {product} with *some* content.\n\n");
        content.push_str("* Bullet point\n** Nested item\n* Another item\n\n");
        content.push_str("[source,rust]\n----\nfn example() {\n    println!(\"Hello\");\n}\n----\n\n");
    }
    content
}
