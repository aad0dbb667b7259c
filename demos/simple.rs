//! Parse a document and walk its tables.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use toml_lite::{parse_str, Value};

const SOURCE: &str = r#"
title = "demo"

[owner]
name = "Tom"
age = 30
joined = 2019-03-01T09:00:00Z

[[pkg]]
name = 'core'
features = ["std", "serde"]

[[pkg]]
name = 'cli'
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse_str(SOURCE)?;

    for (path, table) in doc.tables() {
        let shown = if path.is_empty() { "<root>" } else { path };
        println!("[{}]", shown);
        for (key, value) in table {
            println!("  {} = {}  ({})", key, value, value.kind());
        }
    }

    for (path, instances) in doc.arrays() {
        let count = instances.as_array().map_or(0, Vec::len);
        println!("[[{}]] x{}", path, count);
    }

    let age = doc.value("owner", "age").and_then(Value::as_i64);
    println!("owner.age = {:?}", age);

    match parse_str("title = \"demo\"\nfoo bar") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}
