use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pyvm_catalog::DEFAULT_CATALOG_TTL_SECS;
use pyvm_installer::RootLayout;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alias_path: Option<PathBuf>,
    #[serde(default)]
    pub catalog_ttl_hours: Option<u64>,
}

impl Config {
    pub fn catalog_ttl_secs(&self) -> u64 {
        self.catalog_ttl_hours
            .map(|hours| hours * 60 * 60)
            .unwrap_or(DEFAULT_CATALOG_TTL_SECS)
    }

    pub fn effective_alias_path(&self, layout: &RootLayout) -> Result<PathBuf> {
        match &self.alias_path {
            Some(path) => Ok(path.clone()),
            None => layout.default_alias_path(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config: {}", path.display()));
        }
    };

    toml::from_str(&raw).with_context(|| format!("failed to parse config: {}", path.display()))
}
