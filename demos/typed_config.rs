//! Deserialize a configuration into structs.
//!
//! Run with: cargo run --example typed_config

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::error::Error;
use toml_lite::{from_str, parse_with_options, DuplicateTables, ParseOptions};

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    ports: Vec<u16>,
    #[serde(default)]
    tls: bool,
}

#[derive(Debug, Deserialize)]
struct Release {
    version: String,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Config {
    name: String,
    server: Server,
    release: Vec<Release>,
}

const SOURCE: &str = r#"
name = "edge-proxy"

[server]
host = "0.0.0.0"
ports = [
  8080,
  8443, # tls
]
tls = true

[[release]]
version = "1.0.0"
date = 2024-01-15T10:00:00+01:00

[[release]]
version = "1.1.0"
date = 2024-06-01
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(SOURCE)?;
    println!("{:#?}", config);

    // Repeated `[server]` headers are merged instead of kept apart.
    let options = ParseOptions::new().with_duplicate_tables(DuplicateTables::Merge);
    let doc = parse_with_options(["[server]", "host = 'a'", "[server]", "tls = false"], options)?;
    let tls: bool = doc.get_as("server", "tls")?;
    println!("merged server: {} keys, tls = {}", doc["server"].len(), tls);

    Ok(())
}
