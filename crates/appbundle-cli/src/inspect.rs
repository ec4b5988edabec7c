//! Inspect command implementation

use crate::manifest::display_scalar;
use anyhow::{Context, Result};
use appbundle::{compute_sha256, decode_body};
use std::path::Path;

/// Decode a bundle and print what it carries.
pub fn run(bundle_path: &Path, summary_only: bool) -> Result<()> {
    let body = std::fs::read_to_string(bundle_path)
        .with_context(|| format!("Failed to read bundle: {}", bundle_path.display()))?;

    let document = decode_body(&body)
        .with_context(|| format!("Failed to decode bundle: {}", bundle_path.display()))?;

    let text = |key: &str| document.get(key).map_or_else(String::new, display_scalar);
    println!("Bundle: {} v{}", text("name"), text("version"));
    println!("Guid: {}", text("guid"));
    println!("Checksum: sha256:{}", compute_sha256(body.as_bytes()));

    if !summary_only {
        let pretty = serde_json::to_string_pretty(&document)
            .context("Failed to format bundle manifest")?;
        println!("\n{pretty}");
    }

    Ok(())
}
