//! Writes the gateway's OpenAPI document as pretty JSON.
//!
//! ```text
//! cargo run --bin export_openapi > openapi.json
//! cargo run --bin export_openapi -- --output docs/openapi.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use leadflow::gateway::openapi::ApiDoc;
use utoipa::OpenApi;

/// Export the leadflow OpenAPI document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    match args.output {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            std::fs::write(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("OpenAPI document written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
