//! Script minification.
//!
//! Scripts are parsed as classic scripts, not ES modules.
//!
//! The resolver only depends on the [`Minifier`] trait. A failed minification
//! is never fatal: the caller keeps the original text.

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;

/// Why a script could not be minified.
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The script has syntax errors.
    #[error("script failed to parse: {0}")]
    Parse(String),
}

/// Turns script text into smaller, equivalent script text.
pub trait Minifier {
    fn minify(&self, source: &str) -> Result<String, MinifyError>;
}

/// Minifier backed by the oxc parser and code generator.
///
/// Strips whitespace and comments; identifiers are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcMinifier;

impl OxcMinifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Minifier for OxcMinifier {
    fn minify(&self, source: &str) -> Result<String, MinifyError> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::default().with_script(true)).parse();

        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MinifyError::Parse(message));
        }

        let output = Codegen::new()
            .with_options(CodegenOptions::minify())
            .build(&ret.program);

        Ok(output.code)
    }
}

impl<T: Minifier + ?Sized> Minifier for &T {
    fn minify(&self, source: &str) -> Result<String, MinifyError> {
        (**self).minify(source)
    }
}
