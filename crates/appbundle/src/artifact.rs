//! The encoded bundle file.

use crate::{BUNDLE_EXTENSION, BundleError, BundleResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// A fully assembled bundle, ready to be written.
///
/// The body is the base64 encoding of the resolved manifest JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    display_name: String,
    body: String,
    checksum: String,
}

impl Artifact {
    /// Wrap an encoded body for the bundle identified by `guid`.
    pub fn new(guid: &str, display_name: &str, body: String) -> BundleResult<Self> {
        if guid.is_empty() || guid.contains(['/', '\\', ':']) || guid.starts_with('.') {
            return Err(BundleError::InvalidGuid(guid.to_string()));
        }

        Ok(Self {
            file_name: format!("{guid}.{BUNDLE_EXTENSION}"),
            display_name: display_name.to_string(),
            checksum: compute_sha256(body.as_bytes()),
            body,
        })
    }

    /// `<guid>.spiraapp`
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Human readable bundle name, used in log output.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// SHA256 of the body, hex encoded.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Decode the body back into the resolved manifest.
    pub fn decode(&self) -> BundleResult<Value> {
        decode_body(&self.body)
    }

    /// Write the artifact into `output_dir`, creating it if needed.
    ///
    /// Returns the path of the written file.
    pub fn write_to<P: AsRef<Path>>(&self, output_dir: P) -> BundleResult<PathBuf> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let path = output_dir.join(&self.file_name);
        fs::write(&path, &self.body)?;

        tracing::info!(
            bundle = %self.display_name,
            path = %path.display(),
            checksum = %self.checksum,
            "bundle written"
        );

        Ok(path)
    }
}

/// Decode an artifact body into the manifest JSON it carries.
pub fn decode_body(body: &str) -> BundleResult<Value> {
    let bytes = BASE64
        .decode(body.trim())
        .map_err(|e| BundleError::InvalidArtifact(format!("body is not base64: {e}")))?;

    Ok(serde_json::from_slice(&bytes)?)
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
