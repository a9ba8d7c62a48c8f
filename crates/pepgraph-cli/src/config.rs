//! `pepgraph.toml` settings for the `convert` and `summary` commands.
//!
//! Every field is optional; command-line flags win over file values, and
//! file values win over built-in defaults.
//!
//! ```toml
//! feed_url = "https://peps.python.org/api/peps.json"
//! out_dir = "generated"
//! format = "turtle"
//!
//! [namespaces]
//! schema = "https://noahgorstein.com/peps/schema/"
//! instance = "https://python.org/peps/"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use pepgraph_rdf::{Namespaces, RdfFormat};
use serde::Deserialize;

pub const DEFAULT_FEED_URL: &str = "https://peps.python.org/api/peps.json";
pub const DEFAULT_OUT_DIR: &str = "generated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Turtle,
    Ntriples,
}

impl From<OutputFormat> for RdfFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Ntriples => RdfFormat::NTriples,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub namespaces: Namespaces,
    /// Local feed file.
    pub input: Option<PathBuf>,
    pub feed_url: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl ConvertConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid pepgraph config")?;
        config.namespaces.validate()?;
        Ok(config)
    }

    /// Read `path` if given; otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Namespaces after `--schema-ns` / `--instance-ns` overrides.
    pub fn namespaces_with(
        &self,
        schema: Option<&str>,
        instance: Option<&str>,
    ) -> Result<Namespaces> {
        let ns = Namespaces {
            schema: schema.map_or_else(|| self.namespaces.schema.clone(), str::to_string),
            instance: instance.map_or_else(|| self.namespaces.instance.clone(), str::to_string),
        };
        ns.validate()?;
        Ok(ns)
    }
}
