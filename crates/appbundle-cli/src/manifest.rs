//! Manifest loading and the `check` command

use crate::config::Config;
use anyhow::{Context, Result};
use appbundle::{MANIFEST_FILE, Schema, ValidationReport, validate};
use serde_json::Value;
use std::path::Path;

/// Load `manifest.yaml` from `input_root`.
pub fn load(input_root: &Path) -> Result<Value> {
    let path = input_root.join(MANIFEST_FILE);
    if !path.is_file() {
        anyhow::bail!("No {MANIFEST_FILE} found in {}", input_root.display());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    parse(&content).with_context(|| format!("Invalid manifest: {}", path.display()))
}

/// Parse manifest YAML into the JSON document model.
pub fn parse(content: &str) -> Result<Value> {
    serde_yaml::from_str(content).context("Failed to parse manifest")
}

/// Print every violation in `report`, one per line.
pub fn print_violations(report: &ValidationReport) {
    for violation in report.violations() {
        println!("  ✗ {violation}");
    }
}

/// Number of elements in an array field, zero when absent.
fn count(document: &Value, key: &str) -> usize {
    document.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Check command implementation
pub fn check(input_root: &Path) -> Result<()> {
    println!(
        "Checking manifest: {}",
        input_root.join(MANIFEST_FILE).display()
    );

    let config = Config::load(input_root)?;
    let document = load(input_root)?;
    let schema = Schema::new(config.schema);

    let report = validate(&document, &schema);
    if !report.is_valid() {
        print_violations(&report);
        anyhow::bail!(
            "Manifest has {} error(s). Please fix and try again.",
            report.error_count()
        );
    }

    let text = |key: &str| document.get(key).map_or_else(String::new, display_scalar);
    println!("✓ App: {} v{}", text("name"), text("version"));
    println!("✓ Guid: {}", text("guid"));
    println!("✓ Menus: {}", count(&document, "menus"));
    println!("✓ Page contents: {}", count(&document, "pageContents"));
    println!("✓ Page columns: {}", count(&document, "pageColumns"));
    println!("✓ Dashboards: {}", count(&document, "dashboards"));
    println!("✓ Settings: {}", count(&document, "settings"));
    println!("✓ Product settings: {}", count(&document, "productSettings"));
    println!("\nManifest is valid!");

    Ok(())
}

/// Render a scalar without the quotes JSON would add to strings.
pub fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
