//! Recursive inlining of `file://` references.
//!
//! The resolver scans text for reference tokens and replaces each one with
//! the content of the named file. Scripts and stylesheets are scanned for
//! references of their own before they are embedded, so a manifest can pull
//! in a stylesheet that pulls in an image, to any depth.
//!
//! Whether embedded content is base64-encoded depends on the kind of the
//! file that contains the reference, not only on the referenced file:
//!
//! | enclosing file | referenced file                    | embedded as |
//! |----------------|------------------------------------|-------------|
//! | manifest       | anything                           | base64      |
//! | same kind      | same kind                          | literal     |
//! | script         | script, json, html, txt, md        | literal     |
//! | script         | anything else                      | base64      |
//! | other          | anything else                      | base64      |

use crate::minify::Minifier;
use crate::source::FileSource;
use crate::{BundleError, BundleResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::{Component, Path};

/// Prefix that marks a file reference.
pub const FILE_PREFIX: &str = "file://";

// The name is matched lazily: the first `.ext` ends the reference. Path
// separators are part of the character class so they can be rejected
// explicitly instead of silently not matching.
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Safe: constant pattern
    Regex::new(r#"file://([^\s"'`<>()]+?\.\w+)"#).expect("reference pattern is valid")
});

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Kind of a referenced file, derived from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Stylesheet,
    Json,
    Markup,
    Text,
    Markdown,
    Svg,
    Other(String),
}

impl FileKind {
    /// Classify an extension, ignoring case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_ascii_lowercase();
        match extension.as_str() {
            "js" => FileKind::Script,
            "css" => FileKind::Stylesheet,
            "json" => FileKind::Json,
            "html" => FileKind::Markup,
            "txt" => FileKind::Text,
            "md" => FileKind::Markdown,
            "svg" => FileKind::Svg,
            _ => FileKind::Other(extension),
        }
    }

    /// Classify a file name by its trailing extension.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let extension = name.rsplit_once('.').map_or("", |(_, ext)| ext);
        Self::from_extension(extension)
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            FileKind::Script => "js",
            FileKind::Stylesheet => "css",
            FileKind::Json => "json",
            FileKind::Markup => "html",
            FileKind::Text => "txt",
            FileKind::Markdown => "md",
            FileKind::Svg => "svg",
            FileKind::Other(extension) => extension,
        }
    }

    /// Whether references inside this kind of file are resolved too.
    #[must_use]
    pub fn has_nested_references(&self) -> bool {
        matches!(self, FileKind::Script | FileKind::Stylesheet)
    }

    /// Kinds that can sit inside script source as literal text.
    #[must_use]
    pub fn is_literal_in_script(&self) -> bool {
        matches!(
            self,
            FileKind::Script
                | FileKind::Json
                | FileKind::Markup
                | FileKind::Text
                | FileKind::Markdown
        )
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decide whether `kind` content embedded in `parent` must be base64-encoded.
///
/// `parent` is `None` for references that sit directly in the manifest.
#[must_use]
pub fn is_encode_check(kind: &FileKind, parent: Option<&FileKind>) -> bool {
    match parent {
        None => true,
        Some(parent) if parent == kind => false,
        Some(FileKind::Script) => !kind.is_literal_in_script(),
        Some(_) => true,
    }
}

/// Options that change how references are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Embed scripts exactly as written instead of minifying them.
    pub no_minify: bool,
}

/// Content produced for a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub kind: FileKind,
    pub content: String,
    pub encoded: bool,
}

/// Resolves `file://` references against a [`FileSource`].
pub struct Resolver<S, M> {
    source: S,
    minifier: M,
    options: ResolveOptions,
}

impl<S: FileSource, M: Minifier> Resolver<S, M> {
    pub fn new(source: S, minifier: M, options: ResolveOptions) -> Self {
        Self {
            source,
            minifier,
            options,
        }
    }

    /// Replace every reference in `text` with its resolved content.
    ///
    /// `parent` is the kind of the file `text` was read from, or `None` for
    /// the serialized manifest itself.
    pub fn resolve_all(&self, text: &str, parent: Option<&FileKind>) -> BundleResult<String> {
        self.resolve_text(text, parent, &mut Vec::new())
    }

    /// Resolve a single referenced file as it would be embedded in `parent`.
    pub fn resolve_one(&self, name: &str, parent: Option<&FileKind>) -> BundleResult<Resolved> {
        self.resolve_file(name, parent, &mut Vec::new())
    }

    fn resolve_text(
        &self,
        text: &str,
        parent: Option<&FileKind>,
        stack: &mut Vec<String>,
    ) -> BundleResult<String> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for captures in REFERENCE_PATTERN.captures_iter(text) {
            let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let resolved = self.resolve_file(name.as_str(), parent, stack)?;

            output.push_str(&text[last..token.start()]);
            if parent.is_none()
                && resolved.kind == FileKind::Svg
                && is_icon_value(text, token.start(), token.end())
            {
                output.push_str(SVG_DATA_URI_PREFIX);
            }
            output.push_str(&resolved.content);
            last = token.end();
        }

        output.push_str(&text[last..]);
        Ok(output)
    }

    fn resolve_file(
        &self,
        name: &str,
        parent: Option<&FileKind>,
        stack: &mut Vec<String>,
    ) -> BundleResult<Resolved> {
        check_reference_name(name)?;

        let kind = FileKind::from_name(name);
        let mut bytes = self.source.read(name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => BundleError::ReferenceNotFound(name.to_string()),
            _ => BundleError::Io(err),
        })?;

        if kind.has_nested_references() {
            if stack.iter().any(|open| open == name) {
                let mut chain = stack.clone();
                chain.push(name.to_string());
                return Err(BundleError::CircularReference(chain));
            }

            let text = into_text(name, bytes)?;
            stack.push(name.to_string());
            let nested = self.resolve_text(&text, Some(&kind), stack);
            stack.pop();

            let mut text = nested?;
            if kind == FileKind::Script && !self.options.no_minify {
                text = match self.minifier.minify(&text) {
                    Ok(minified) => minified,
                    Err(err) => {
                        tracing::warn!(file = name, error = %err, "minification failed, embedding original script");
                        text
                    }
                };
            }
            bytes = text.into_bytes();
        }

        let encoded = is_encode_check(&kind, parent);
        let content = if encoded {
            BASE64.encode(&bytes)
        } else {
            into_text(name, bytes)?
        };

        tracing::debug!(
            file = name,
            kind = %kind,
            parent = parent.map_or("manifest", FileKind::extension),
            encoded,
            size = content.len(),
            "inlined file reference"
        );

        Ok(Resolved {
            kind,
            content,
            encoded,
        })
    }
}

// A reference must be a single plain file name inside the input root.
fn check_reference_name(name: &str) -> BundleResult<()> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !is_plain || name.contains(['/', '\\', ':']) {
        return Err(BundleError::PathTraversalRejected(name.to_string()));
    }
    Ok(())
}

fn into_text(name: &str, bytes: Vec<u8>) -> BundleResult<String> {
    String::from_utf8(bytes).map_err(|_| BundleError::NotUtf8(name.to_string()))
}

// True when the token is the whole string value of an `icon` key in
// serialized JSON, e.g. `"icon":"file://logo.svg"`.
fn is_icon_value(text: &str, start: usize, end: usize) -> bool {
    if !text[end..].starts_with('"') {
        return false;
    }

    text[..start]
        .strip_suffix('"')
        .map(str::trim_end)
        .and_then(|before| before.strip_suffix(':'))
        .map(str::trim_end)
        .is_some_and(|before| before.ends_with("\"icon\""))
}
