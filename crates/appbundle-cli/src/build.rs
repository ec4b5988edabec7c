//! Build command implementation

use crate::config::Config;
use crate::manifest;
use anyhow::{Context, Result};
use appbundle::{BundleError, ResolveOptions, Schema};
use std::path::{Path, PathBuf};

/// Run the build command.
pub fn run(input_root: &Path, output: Option<PathBuf>, no_minify: bool) -> Result<()> {
    let config = Config::load(input_root)?;
    let document = manifest::load(input_root)?;
    let schema = Schema::new(config.schema.clone());
    let options = ResolveOptions {
        no_minify: config.no_minify(no_minify),
    };
    tracing::debug!(?config, ?options, "build settings");

    println!("Building bundle from: {}", input_root.display());
    if options.no_minify {
        println!("  Minification disabled");
    }

    let artifact = match appbundle::assemble(&document, &schema, input_root, options) {
        Ok(artifact) => artifact,
        Err(BundleError::ValidationFailed(report)) => {
            manifest::print_violations(&report);
            anyhow::bail!(
                "Bundle NOT created due to {} error(s) in the manifest. Please fix and try again.",
                report.error_count()
            );
        }
        Err(err) => return Err(err).context("Bundle NOT created"),
    };

    let output_dir = config.output_dir(input_root, output);
    let path = artifact
        .write_to(&output_dir)
        .with_context(|| format!("Failed to write bundle to {}", output_dir.display()))?;

    println!(
        "✓ Created \"{}\" bundle: {}",
        artifact.display_name(),
        path.display()
    );
    println!("  Checksum: sha256:{}", artifact.checksum());

    Ok(())
}
