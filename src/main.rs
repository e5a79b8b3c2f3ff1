//! Handwrite CLI: paginates text from stdin with the default page settings.
//! The main interface is through WASM bindings.

use handwrite_core::{Editor, EditorConfig};
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;

    let mut editor = Editor::new(config);
    let report = editor.paste(&text);

    println!(
        "capacity {} characters, {} page(s)",
        report.capacity, report.pages_after
    );
    for (index, page) in editor.document.pages().iter().enumerate() {
        let stats = page.stats();
        println!();
        println!(
            "--- page {} ({} characters, {} words) ---",
            index + 1,
            stats.characters,
            stats.words
        );
        println!("{}", page.text);
    }

    Ok(())
}
