//! Bundle assembly: validate, inline, encode.
//!
//! The [`Bundler`] ties the schema and the resolver together. Nothing is
//! produced unless the manifest validates cleanly and every reference
//! resolves.

use crate::artifact::Artifact;
use crate::minify::{Minifier, OxcMinifier};
use crate::resolve::{ResolveOptions, Resolver};
use crate::schema::Schema;
use crate::source::{DirSource, FileSource};
use crate::validate::{ValidationReport, validate};
use crate::{BundleError, BundleResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use std::path::Path;

/// Assembles manifests into bundle artifacts.
///
/// # Example
///
/// ```no_run
/// use appbundle::{Bundler, OxcMinifier, ResolveOptions, Resolver, Schema, DirSource};
///
/// let schema = Schema::default();
/// let resolver = Resolver::new(DirSource::new("my-app"), OxcMinifier, ResolveOptions::default());
/// let bundler = Bundler::new(&schema, resolver);
///
/// let manifest = serde_json::json!({"guid": "abc", "name": "My App", "version": 1.0});
/// let artifact = bundler.assemble(&manifest)?;
/// artifact.write_to("dist")?;
/// # Ok::<(), appbundle::BundleError>(())
/// ```
pub struct Bundler<'a, S, M> {
    schema: &'a Schema,
    resolver: Resolver<S, M>,
}

impl<'a, S: FileSource, M: Minifier> Bundler<'a, S, M> {
    pub fn new(schema: &'a Schema, resolver: Resolver<S, M>) -> Self {
        Self { schema, resolver }
    }

    /// Validate without assembling.
    #[must_use]
    pub fn validate(&self, document: &Value) -> ValidationReport {
        validate(document, self.schema)
    }

    /// Validate `document`, inline every reference and encode the result.
    ///
    /// Fails with [`BundleError::ValidationFailed`] carrying the complete
    /// report when the manifest has any violation.
    pub fn assemble(&self, document: &Value) -> BundleResult<Artifact> {
        let report = self.validate(document);
        if !report.is_valid() {
            return Err(BundleError::ValidationFailed(report));
        }

        let guid = scalar_text(document.get("guid"));
        let name = scalar_text(document.get("name"));

        let serialized = serde_json::to_string(document)?;
        let resolved = self.resolver.resolve_all(&serialized, None)?;
        let body = BASE64.encode(resolved.as_bytes());

        tracing::info!(
            bundle = %name,
            guid = %guid,
            manifest_bytes = serialized.len(),
            resolved_bytes = resolved.len(),
            "bundle assembled"
        );

        Artifact::new(&guid, &name, body)
    }
}

/// Assemble a manifest whose references live under `input_root`, using the
/// default minifier.
pub fn assemble(
    document: &Value,
    schema: &Schema,
    input_root: impl AsRef<Path>,
    options: ResolveOptions,
) -> BundleResult<Artifact> {
    let resolver = Resolver::new(
        DirSource::new(input_root.as_ref()),
        OxcMinifier::new(),
        options,
    );
    Bundler::new(schema, resolver).assemble(document)
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
