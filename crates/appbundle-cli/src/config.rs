//! Optional `appbundle.toml` in the input folder.
//!
//! ```toml
//! [build]
//! output = "../bundles"
//! no_minify = false
//!
//! [schema]
//! page_id = { min = 1, max = 24 }
//! dashboard_type = { min = 1, max = 6 }
//! ```
//!
//! Command line flags and environment variables take precedence over the
//! file; the file takes precedence over built-in defaults.

use anyhow::{Context, Result};
use appbundle::SchemaBounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file within the input folder.
pub const CONFIG_FILE: &str = "appbundle.toml";

/// appbundle.toml structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub build: BuildSection,

    /// Overrides for the id ranges in the schema tables.
    pub schema: SchemaBounds,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    /// Output folder, relative to the input folder.
    pub output: Option<PathBuf>,

    pub no_minify: bool,
}

impl Config {
    /// Load `appbundle.toml` from `input_root`, or defaults if there is none.
    pub fn load(input_root: &Path) -> Result<Self> {
        let path = input_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Output folder: the flag if given, else the configured folder under
    /// `input_root`, else the current directory.
    pub fn output_dir(&self, input_root: &Path, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.build.output.as_ref().map(|dir| input_root.join(dir)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `--no-minify` can only switch minification off.
    pub fn no_minify(&self, flag: bool) -> bool {
        flag || self.build.no_minify
    }
}
