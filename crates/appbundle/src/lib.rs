//! App bundle packager core
//!
//! This crate turns a plugin manifest into a single `.spiraapp` bundle file:
//!
//! 1. the manifest is validated against the versioned [`Schema`] tables;
//! 2. it is serialized to JSON and every `file://name.ext` token is replaced
//!    by the content of that file, recursively for scripts and stylesheets;
//! 3. the resolved JSON is base64-encoded into an [`Artifact`].
//!
//! # Example
//!
//! ```no_run
//! use appbundle::{ResolveOptions, Schema, assemble};
//!
//! let manifest = serde_json::json!({
//!     "guid": "0e6a1b4c-0000-4000-8000-000000000001",
//!     "name": "My App",
//!     "version": 1.0,
//!     "pageContents": [{ "pageId": 1, "name": "main", "code": "file://main.js" }]
//! });
//!
//! let schema = Schema::default();
//! let artifact = assemble(&manifest, &schema, "my-app", ResolveOptions::default())?;
//! artifact.write_to("dist")?;
//! # Ok::<(), appbundle::BundleError>(())
//! ```

mod error;

pub mod artifact;
pub mod assemble;
pub mod minify;
pub mod resolve;
pub mod schema;
pub mod source;
pub mod validate;

pub use artifact::{Artifact, compute_sha256, decode_body};
pub use assemble::{Bundler, assemble};
pub use error::BundleError;
pub use minify::{MinifyError, Minifier, OxcMinifier};
pub use resolve::{FILE_PREFIX, FileKind, ResolveOptions, Resolved, Resolver, is_encode_check};
pub use schema::{FieldType, Level, Range, SCHEMA_VERSION, Schema, SchemaBounds, SchemaRule};
pub use source::{DirSource, FileSource, MemorySource};
pub use validate::{ValidationReport, Violation, ViolationKind, check_value, validate};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Bundle file extension.
pub const BUNDLE_EXTENSION: &str = "spiraapp";

/// Manifest file name within the input root.
pub const MANIFEST_FILE: &str = "manifest.yaml";
